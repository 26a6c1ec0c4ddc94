// crates/truckmap-core/src/model.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tile edge in pixels at zoom 0 for Web-Mercator maps.
const TILE_SIZE: f64 = 256.0;
const MAX_LATITUDE: f64 = 85.0511;

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lat, self.lng)
    }
}

/// A rectangular viewport, south-west to north-east.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl Bounds {
    pub const fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Approximates the viewport of a `width_px` × `height_px` map centered
    /// on `center` at `zoom`.
    ///
    /// The longitude span is exact for Web-Mercator tiles; the latitude span
    /// is scaled by `cos(lat)`, which is close enough for city-level zooms.
    pub fn around(center: LatLng, zoom: u8, width_px: u32, height_px: u32) -> Self {
        let world_px = TILE_SIZE * 2f64.powi(i32::from(zoom));
        let lng_span = (360.0 * f64::from(width_px) / world_px).min(360.0);
        let lat_span = lng_span * f64::from(height_px) / f64::from(width_px.max(1))
            * center.lat.to_radians().cos().abs();

        let half_lat = lat_span / 2.0;
        let half_lng = lng_span / 2.0;
        Self {
            south_west: LatLng::new(
                (center.lat - half_lat).max(-MAX_LATITUDE),
                (center.lng - half_lng).max(-180.0),
            ),
            north_east: LatLng::new(
                (center.lat + half_lat).min(MAX_LATITUDE),
                (center.lng + half_lng).min(180.0),
            ),
        }
    }

    pub fn contains(&self, p: LatLng) -> bool {
        p.lat >= self.south_west.lat
            && p.lat <= self.north_east.lat
            && p.lng >= self.south_west.lng
            && p.lng <= self.north_east.lng
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }
}

/// Opaque place identifier issued by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(pub String);

impl PlaceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlaceId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Geometry resolved for an autocomplete selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceGeometry {
    pub location: LatLng,
    #[serde(default)]
    pub viewport: Option<Bounds>,
}

/// What the autocomplete input hands over when the user picks an entry.
///
/// A free-text entry the service could not resolve carries no geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    #[serde(default)]
    pub geometry: Option<PlaceGeometry>,
}

impl Place {
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            geometry: None,
        }
    }

    pub fn at(name: impl Into<String>, location: LatLng) -> Self {
        Self {
            name: name.into(),
            geometry: Some(PlaceGeometry {
                location,
                viewport: None,
            }),
        }
    }
}

/// One hit of a nearby search. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub place_id: PlaceId,
    pub name: String,
    pub location: LatLng,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub author: String,
    pub text: String,
    #[serde(default)]
    pub rating: Option<f64>,
}

/// Extended attributes fetched on demand for a single place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceDetails {
    pub place_id: Option<PlaceId>,
    pub name: String,
    pub icon: Option<String>,
    /// Directory page for the place; the name links here.
    pub url: Option<String>,
    pub vicinity: Option<String>,
    pub phone: Option<String>,
    /// 0 to 5.
    pub rating: Option<f64>,
    pub website: Option<String>,
    /// One line per weekday, as formatted by the directory.
    pub opening_hours: Option<Vec<String>>,
    pub review: Option<Review>,
    pub photo: Option<String>,
}

/// A nearby search as issued to the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyRequest {
    pub bounds: Bounds,
    pub keyword: String,
}

/// Host-issued identifier of a marker on the map view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerHandle(pub u64);

impl fmt::Display for MarkerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "marker#{}", self.0)
    }
}

/// Routing key attached to a marker so clicks find their way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerKey {
    pub generation: u64,
    pub index: usize,
}

/// Everything the map view needs to create one result marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSpec {
    pub key: MarkerKey,
    pub position: LatLng,
    pub label: char,
    pub icon: String,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowShade {
    Even,
    Odd,
}

impl RowShade {
    pub const fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            Self::Even
        } else {
            Self::Odd
        }
    }

    pub const fn background(self) -> &'static str {
        match self {
            Self::Even => "#F0F0F0",
            Self::Odd => "#FFFFFF",
        }
    }
}

/// One entry of the results list, index-aligned with its marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub index: usize,
    pub label: char,
    pub icon: String,
    pub name: String,
    pub shade: RowShade,
}

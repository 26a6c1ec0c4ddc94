// crates/truckmap-core/src/fixture/mod.rs

//! # Fixture directory
//!
//! An offline [`PlacesDirectory`] over a JSON dataset. Used by the terminal
//! host, the demos and the tests.
//!
//! ```json
//! {
//!   "localities": [{ "name": "Austin, TX", "location": { "lat": 30.26, "lng": -97.74 } }],
//!   "places": [{
//!     "place_id": "atx-1",
//!     "name": "Veracruz All Natural",
//!     "location": { "lat": 30.2585, "lng": -97.7148 },
//!     "categories": ["food truck", "mexican"],
//!     "details": { "rating": 4.7, "website": "https://veracruz.example/menu" }
//!   }]
//! }
//! ```

mod io;

use crate::error::{PlacesStatus, Result};
use crate::model::{
    Bounds, LatLng, NearbyRequest, Place, PlaceDetails, PlaceGeometry, PlaceId, SearchResult,
};
use crate::text::{contains_folded, fold_key};
use crate::traits::PlacesDirectory;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub use io::open_stream;

/// Austin, TX sample bundled with the crate.
static EMBEDDED_DATASET: &str = include_str!("../../data/austin.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Locality {
    pub name: String,
    pub location: LatLng,
    #[serde(default)]
    pub viewport: Option<Bounds>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixturePlace {
    pub place_id: PlaceId,
    pub name: String,
    pub location: LatLng,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    /// Category tags matched against the search keyword.
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub details: PlaceDetails,
}

impl FixturePlace {
    fn matches(&self, keyword: &str) -> bool {
        contains_folded(&self.name, keyword)
            || self.categories.iter().any(|c| contains_folded(c, keyword))
    }

    fn to_result(&self) -> SearchResult {
        SearchResult {
            place_id: self.place_id.clone(),
            name: self.name.clone(),
            location: self.location,
            vicinity: self.vicinity.clone(),
            icon: self.icon.clone(),
        }
    }

    /// Details with the identity fields filled in from the place itself.
    fn to_details(&self) -> PlaceDetails {
        let mut d = self.details.clone();
        d.place_id = Some(self.place_id.clone());
        if d.name.is_empty() {
            d.name = self.name.clone();
        }
        if d.vicinity.is_none() {
            d.vicinity = self.vicinity.clone();
        }
        if d.icon.is_none() {
            d.icon = self.icon.clone();
        }
        d
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub localities: Vec<Locality>,
    #[serde(default)]
    pub places: Vec<FixturePlace>,
}

#[derive(Debug, Clone, Default)]
pub struct FixtureDirectory {
    dataset: Dataset,
}

impl FixtureDirectory {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    pub fn default_data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    pub fn default_dataset_filename() -> &'static str {
        "austin.json"
    }

    /// The bundled Austin sample.
    pub fn embedded() -> Result<Self> {
        Self::from_json_str(EMBEDDED_DATASET)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let dataset: Dataset = serde_json::from_str(json)?;
        Ok(Self::new(dataset))
    }

    /// Loads a `.json` or (with `compact`) `.json.gz` dataset.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = open_stream(path)?;
        let dataset: Dataset = serde_json::from_reader(reader)?;
        debug!(
            path = %path.display(),
            localities = dataset.localities.len(),
            places = dataset.places.len(),
            "fixture loaded"
        );
        Ok(Self::new(dataset))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Autocomplete stand-in: resolves a typed name to a [`Place`].
    ///
    /// Exact (folded) names win over prefixes. Unknown names yield a place
    /// without geometry, exactly like an unresolved free-text entry.
    pub fn resolve_locality(&self, name: &str) -> Place {
        let q = fold_key(name.trim());
        if q.is_empty() {
            return Place::unresolved(name);
        }
        let localities = &self.dataset.localities;
        let hit = localities
            .iter()
            .find(|l| fold_key(&l.name) == q)
            .or_else(|| localities.iter().find(|l| fold_key(&l.name).starts_with(&q)));

        match hit {
            Some(l) => Place {
                name: l.name.clone(),
                geometry: Some(PlaceGeometry {
                    location: l.location,
                    viewport: l.viewport,
                }),
            },
            None => Place::unresolved(name),
        }
    }

    pub fn find_place(&self, place_id: &PlaceId) -> Option<&FixturePlace> {
        self.dataset.places.iter().find(|p| &p.place_id == place_id)
    }

    fn nearby(&self, request: &NearbyRequest) -> std::result::Result<Vec<SearchResult>, PlacesStatus> {
        if request.keyword.trim().is_empty() {
            return Err(PlacesStatus::InvalidRequest);
        }
        let hits: Vec<SearchResult> = self
            .dataset
            .places
            .iter()
            .filter(|p| request.bounds.contains(p.location) && p.matches(&request.keyword))
            .map(FixturePlace::to_result)
            .collect();

        if hits.is_empty() {
            Err(PlacesStatus::ZeroResults)
        } else {
            Ok(hits)
        }
    }
}

impl PlacesDirectory for FixtureDirectory {
    async fn search_nearby(
        &self,
        request: &NearbyRequest,
    ) -> std::result::Result<Vec<SearchResult>, PlacesStatus> {
        self.nearby(request)
    }

    async fn get_details(
        &self,
        place_id: &PlaceId,
    ) -> std::result::Result<PlaceDetails, PlacesStatus> {
        self.find_place(place_id)
            .map(FixturePlace::to_details)
            .ok_or(PlacesStatus::NotFound)
    }
}

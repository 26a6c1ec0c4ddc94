// crates/truckmap-core/src/config.rs
use crate::error::{Result, TruckMapError};
use crate::model::LatLng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_KEYWORD: &str = "food truck";
pub const DEFAULT_MARKER_ICON_BASE: &str =
    "https://developers.google.com/maps/documentation/javascript/images/marker_green";
pub const MAX_ZOOM: u8 = 21;

/// Initial camera of the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialView {
    pub center: LatLng,
    pub zoom: u8,
}

impl Default for InitialView {
    /// Continental US.
    fn default() -> Self {
        Self {
            center: LatLng::new(37.1, -95.7),
            zoom: 3,
        }
    }
}

/// User-facing texts of the geolocation error bubble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeolocationMessages {
    pub unavailable: String,
    pub failed: String,
}

impl Default for GeolocationMessages {
    fn default() -> Self {
        Self {
            unavailable: "Error: Your browser doesn't support geolocation.".into(),
            failed: "Error: The Geolocation service failed.".into(),
        }
    }
}

/// Tunables of a [`crate::LocationSearchController`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Category keyword sent with every nearby search.
    pub keyword: String,
    /// Zoom applied after an autocomplete selection.
    pub place_zoom: u8,
    /// Zoom applied after a successful geolocation; `None` keeps the zoom.
    pub location_zoom: Option<u8>,
    /// Per-index delay of the cascading marker drop.
    pub drop_interval_ms: u64,
    /// Marker icons are `{marker_icon_base}{letter}.png`.
    pub marker_icon_base: String,
    pub initial_view: InitialView,
    /// Placeholder shown when a selection has no geometry.
    pub input_placeholder: String,
    pub geolocation: GeolocationMessages,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            keyword: DEFAULT_KEYWORD.into(),
            place_zoom: 10,
            location_zoom: None,
            drop_interval_ms: 100,
            marker_icon_base: DEFAULT_MARKER_ICON_BASE.into(),
            initial_view: InitialView::default(),
            input_placeholder: "Enter a location".into(),
            geolocation: GeolocationMessages::default(),
        }
    }
}

impl ControllerConfig {
    pub fn drop_interval(&self) -> Duration {
        Duration::from_millis(self.drop_interval_ms)
    }

    /// Rejects configurations the controller cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.keyword.trim().is_empty() {
            return Err(TruckMapError::Config("keyword must not be empty".into()));
        }
        let zooms = [
            Some(self.place_zoom),
            self.location_zoom,
            Some(self.initial_view.zoom),
        ];
        if let Some(z) = zooms.into_iter().flatten().find(|z| *z > MAX_ZOOM) {
            return Err(TruckMapError::Config(format!(
                "zoom {z} exceeds maximum of {MAX_ZOOM}"
            )));
        }
        Ok(())
    }
}

/// Builder for creating controller configurations with ergonomic defaults
#[derive(Debug, Clone, Default)]
pub struct ControllerConfigBuilder {
    config: ControllerConfig,
}

impl ControllerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search for something other than food trucks.
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.config.keyword = keyword.into();
        self
    }

    pub fn place_zoom(mut self, zoom: u8) -> Self {
        self.config.place_zoom = zoom.min(MAX_ZOOM);
        self
    }

    pub fn location_zoom(mut self, zoom: Option<u8>) -> Self {
        self.config.location_zoom = zoom.map(|z| z.min(MAX_ZOOM));
        self
    }

    /// Delay between consecutive marker drops. Zero drops all at once.
    pub fn drop_interval(mut self, interval: Duration) -> Self {
        self.config.drop_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn marker_icon_base(mut self, base: impl Into<String>) -> Self {
        self.config.marker_icon_base = base.into();
        self
    }

    pub fn initial_view(mut self, center: LatLng, zoom: u8) -> Self {
        self.config.initial_view = InitialView {
            center,
            zoom: zoom.min(MAX_ZOOM),
        };
        self
    }

    pub fn input_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.config.input_placeholder = placeholder.into();
        self
    }

    pub fn geolocation_messages(mut self, messages: GeolocationMessages) -> Self {
        self.config.geolocation = messages;
        self
    }

    pub fn build(self) -> ControllerConfig {
        self.config
    }
}

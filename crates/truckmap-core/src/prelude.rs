// crates/truckmap-core/src/prelude.rs
pub use crate::config::{ControllerConfig, ControllerConfigBuilder};
pub use crate::controller::{
    DetailsOutcome, DetailsState, LocationSearchController, SearchOutcome, SearchPhase,
};
pub use crate::error::{GeolocationError, PlacesStatus, Result, TruckMapError};
#[cfg(feature = "fixture")]
pub use crate::fixture::FixtureDirectory;
pub use crate::marker::{MarkerRef, RevealTask};
pub use crate::model::{
    Bounds, LatLng, MarkerHandle, MarkerKey, MarkerSpec, Place, PlaceDetails, PlaceId, ResultRow,
    SearchResult,
};
pub use crate::render::InfoContent;
pub use crate::traits::{Geolocator, MapView, NoGeolocation, PlacesDirectory, ResultsPanel};

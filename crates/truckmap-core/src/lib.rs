// crates/truckmap-core/src/lib.rs

//! # truckmap-core
//!
//! Finds food trucks around a chosen place and keeps a map, a result list and
//! a details panel in step with the answers of a places directory.
//!
//! The crate owns no rendering and no network code. Hosts plug in:
//! - a [`MapView`] (markers, camera, info window, error bubble),
//! - a [`ResultsPanel`] (result rows and details content),
//! - a [`PlacesDirectory`] (nearby search and place details),
//! - optionally a [`Geolocator`].
//!
//! ```rust,ignore
//! use truckmap_core::prelude::*;
//!
//! let mut controller =
//!     LocationSearchController::new(map, panel, FixtureDirectory::embedded()?, ControllerConfig::default());
//! let place = controller.places().resolve_locality("Austin");
//! if let SearchOutcome::Populated { reveals, .. } = controller.on_place_selected(&place).await? {
//!     for task in reveals {
//!         controller.reveal_marker(task);
//!     }
//! }
//! ```

pub mod config;
pub mod controller;
pub mod error;
#[cfg(feature = "fixture")]
pub mod fixture;
pub mod marker;
pub mod model;
pub mod prelude;
pub mod render;
pub mod text;
pub mod traits;

// Re-exports
pub use crate::config::{ControllerConfig, ControllerConfigBuilder};
pub use crate::controller::{
    DetailsOutcome, DetailsState, DetailsTicket, LocationSearchController, SearchOutcome,
    SearchPhase, SearchTicket, ViewState,
};
pub use crate::error::{GeolocationError, PlacesStatus, Result, TruckMapError};
#[cfg(feature = "fixture")]
pub use crate::fixture::FixtureDirectory;
pub use crate::marker::{marker_icon_url, marker_label, MarkerRef, RevealTask};
pub use crate::render::{
    rating_glyphs, render_details, shorten_website, InfoContent, RatingBar, RatingGlyph,
    WebsiteLink,
};
pub use crate::traits::{Geolocator, MapView, NoGeolocation, PlacesDirectory, ResultsPanel};

// crates/truckmap-core/src/traits.rs
//! Host capabilities the controller drives.
//!
//! The controller never touches a rendering tree or the network directly.
//! Each host (terminal, browser, test fakes) implements these traits once.
//! Async capabilities return plain `impl Future` without `Send` bounds: all
//! completions are delivered on the host's single UI thread.
use crate::error::{GeolocationError, PlacesStatus};
use crate::model::{
    Bounds, LatLng, MarkerHandle, MarkerKey, MarkerSpec, NearbyRequest, PlaceDetails, PlaceId,
    ResultRow, SearchResult,
};
use crate::render::InfoContent;
use std::future::Future;

/// The map surface.
pub trait MapView {
    fn set_center(&mut self, position: LatLng);

    /// Animated recenter. Hosts without animation can simply set the center.
    fn pan_to(&mut self, position: LatLng) {
        self.set_center(position);
    }

    fn set_zoom(&mut self, level: u8);

    fn center(&self) -> LatLng;

    fn zoom(&self) -> u8;

    fn viewport_bounds(&self) -> Bounds;

    /// Creates a marker that is not yet visible.
    fn add_marker(&mut self, spec: &MarkerSpec) -> MarkerHandle;

    /// Attaches a hidden marker to the map with its drop animation.
    fn show_marker(&mut self, handle: MarkerHandle);

    fn remove_marker(&mut self, handle: MarkerHandle);

    /// Registers click routing: clicks on `handle` must be reported back to
    /// the controller as `key`.
    fn on_marker_clicked(&mut self, handle: MarkerHandle, key: MarkerKey);

    /// Opens (or moves) the info window so it is anchored on `handle`.
    fn open_info_window(&mut self, handle: MarkerHandle);

    fn close_info_window(&mut self);

    /// Shows a transient error bubble at `position`.
    fn show_error_bubble(&mut self, position: LatLng, message: &str);
}

/// The result list and the details surface.
pub trait ResultsPanel {
    fn clear_rows(&mut self);

    fn append_row(&mut self, row: &ResultRow);

    fn show_details(&mut self, content: &InfoContent);

    /// Prompt shown in the place input when the entry could not be resolved.
    fn set_input_hint(&mut self, hint: &str);
}

/// Nearby search and place details lookups.
pub trait PlacesDirectory {
    fn search_nearby(
        &self,
        request: &NearbyRequest,
    ) -> impl Future<Output = Result<Vec<SearchResult>, PlacesStatus>>;

    fn get_details(
        &self,
        place_id: &PlaceId,
    ) -> impl Future<Output = Result<PlaceDetails, PlacesStatus>>;
}

/// One-shot device position.
pub trait Geolocator {
    fn current_position(&self) -> impl Future<Output = Result<LatLng, GeolocationError>>;
}

/// Stand-in for hosts that have no geolocation capability.
///
/// Lets `LocationSearchController<M, R, P>` be named without a geolocator type.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocation;

impl Geolocator for NoGeolocation {
    async fn current_position(&self) -> Result<LatLng, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

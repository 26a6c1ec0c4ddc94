//! Error handling example for truckmap-rs
//!
//! This example demonstrates how the controller reports failures and which
//! of them leave the displayed results untouched.

use futures::executor::block_on;
use truckmap_core::model::{Bounds, ResultRow};
use truckmap_core::prelude::*;

/// Map that only keeps the camera; error bubbles are printed.
#[derive(Default)]
struct QuietMap {
    center: Option<LatLng>,
    zoom: u8,
    next: u64,
}

impl MapView for QuietMap {
    fn set_center(&mut self, position: LatLng) {
        self.center = Some(position);
    }

    fn set_zoom(&mut self, level: u8) {
        self.zoom = level;
    }

    fn center(&self) -> LatLng {
        self.center.unwrap_or(LatLng::new(0.0, 0.0))
    }

    fn zoom(&self) -> u8 {
        self.zoom
    }

    fn viewport_bounds(&self) -> Bounds {
        Bounds::around(self.center(), self.zoom, 1024, 768)
    }

    fn add_marker(&mut self, _spec: &MarkerSpec) -> MarkerHandle {
        self.next += 1;
        MarkerHandle(self.next)
    }

    fn show_marker(&mut self, _handle: MarkerHandle) {}

    fn remove_marker(&mut self, _handle: MarkerHandle) {}

    fn on_marker_clicked(&mut self, _handle: MarkerHandle, _key: MarkerKey) {}

    fn open_info_window(&mut self, _handle: MarkerHandle) {}

    fn close_info_window(&mut self) {}

    fn show_error_bubble(&mut self, position: LatLng, message: &str) {
        println!("  bubble at {position}: {message}");
    }
}

struct QuietPanel;

impl ResultsPanel for QuietPanel {
    fn clear_rows(&mut self) {}

    fn append_row(&mut self, _row: &ResultRow) {}

    fn show_details(&mut self, _content: &InfoContent) {}

    fn set_input_hint(&mut self, hint: &str) {
        println!("  input hint: {hint}");
    }
}

fn main() -> Result<()> {
    println!("=== truckmap-rs Error Handling Example ===\n");

    // Example 1: Loading a fixture that does not exist
    println!("--- Example 1: Loading a missing fixture ---");
    match FixtureDirectory::load_from_path("/nonexistent/trucks.json") {
        Ok(_) => println!("  unexpectedly loaded"),
        Err(e) => println!("✗ {e}"),
    }
    println!();

    let places = FixtureDirectory::embedded()?;
    let mut controller =
        LocationSearchController::new(QuietMap::default(), QuietPanel, places, ControllerConfig::default());

    // Example 2: A selection the places service could not resolve
    println!("--- Example 2: Place without geometry ---");
    let unresolved = controller.places().resolve_locality("Atlantis");
    match block_on(controller.on_place_selected(&unresolved)) {
        Err(TruckMapError::InputIncomplete) => println!("  no search was started"),
        other => println!("  unexpected: {other:?}"),
    }
    println!();

    // Example 3: A failed search keeps what is displayed
    println!("--- Example 3: Zero results keep the previous trucks ---");
    let austin = controller.places().resolve_locality("Austin");
    block_on(controller.on_place_selected(&austin))?;
    let before = controller.markers().len();
    let nowhere = Place::at("Gulf of Guinea", LatLng::new(0.0, 0.0));
    if let Err(e) = block_on(controller.on_place_selected(&nowhere)) {
        println!("  search failed: {e}");
    }
    println!("  markers before: {before}, after: {}", controller.markers().len());
    println!();

    // Example 4: No geolocation capability
    println!("--- Example 4: Geolocation unavailable ---");
    if let Err(e) = block_on(controller.on_use_current_location()) {
        println!("  {e}");
    }
    println!();

    // Example 5: Activating a marker of a replaced search
    println!("--- Example 5: Stale marker keys ---");
    let stale = MarkerKey {
        generation: 0,
        index: 0,
    };
    match block_on(controller.on_result_activated(stale)) {
        Err(TruckMapError::UnknownMarker(what)) => println!("  rejected {what}"),
        other => println!("  unexpected: {other:?}"),
    }

    Ok(())
}

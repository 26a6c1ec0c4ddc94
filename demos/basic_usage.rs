//! Basic usage example for truckmap-rs
//!
//! This example demonstrates how to:
//! - Plug a minimal map and results panel into the controller
//! - Search around a selected place using the bundled Austin fixture
//! - Drop the result markers in reveal order
//! - Open the details of one food truck

use futures::executor::block_on;
use truckmap_core::model::{Bounds, ResultRow};
use truckmap_core::prelude::*;

/// A map that prints what it is asked to do.
#[derive(Default)]
struct PrintMap {
    center: Option<LatLng>,
    zoom: u8,
    next: u64,
}

impl MapView for PrintMap {
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

    fn add_marker(&mut self, spec: &MarkerSpec) -> MarkerHandle {
        self.next += 1;
        println!("  marker {} for {} ({})", spec.label, spec.title, spec.icon);
        MarkerHandle(self.next)
    }

    fn show_marker(&mut self, handle: MarkerHandle) {
        println!("  drop marker #{}", handle.0);
    }

    fn remove_marker(&mut self, _handle: MarkerHandle) {}

    fn on_marker_clicked(&mut self, _handle: MarkerHandle, _key: MarkerKey) {}

    fn open_info_window(&mut self, handle: MarkerHandle) {
        println!("  info window on marker #{}", handle.0);
    }

    fn close_info_window(&mut self) {}

    fn show_error_bubble(&mut self, position: LatLng, message: &str) {
        println!("  bubble at {position}: {message}");
    }
}

struct PrintPanel;

impl ResultsPanel for PrintPanel {
    fn clear_rows(&mut self) {}

    fn append_row(&mut self, row: &ResultRow) {
        println!("  row {} {} (background {})", row.label, row.name, row.shade.background());
    }

    fn show_details(&mut self, content: &InfoContent) {
        println!("  details: {} ({} optional rows)", content.name, content.visible_rows());
    }

    fn set_input_hint(&mut self, hint: &str) {
        println!("  input hint: {hint}");
    }
}

fn main() -> Result<()> {
    println!("=== truckmap-rs Basic Usage Example ===\n");

    // Example 1: Build a controller on the bundled fixture
    println!("--- Example 1: Create the controller ---");
    let places = FixtureDirectory::embedded()?;
    println!("Localities in the fixture: {}", places.dataset().localities.len());
    let config = ControllerConfigBuilder::new().place_zoom(12).build();
    let mut controller = LocationSearchController::new(PrintMap::default(), PrintPanel, places, config);
    println!("✓ Controller ready at {}\n", controller.view().center);

    // Example 2: Select a place, as from the autocomplete box
    println!("--- Example 2: Search around Austin ---");
    let austin = controller.places().resolve_locality("Austin");
    let SearchOutcome::Populated {
        generation,
        count,
        reveals,
    } = block_on(controller.on_place_selected(&austin))?
    else {
        println!("Search was superseded");
        return Ok(());
    };
    println!("Found {count} food trucks\n");

    // Example 3: Reveal the markers in their staggered order
    println!("--- Example 3: Drop the markers ---");
    for task in reveals {
        println!("  after {:?}:", task.delay);
        controller.reveal_marker(task);
    }
    println!();

    // Example 4: Open the details of the first result
    println!("--- Example 4: Show details ---");
    let key = MarkerKey {
        generation,
        index: 0,
    };
    if let DetailsOutcome::Shown(content) = block_on(controller.on_result_activated(key))? {
        if let Some(rating) = &content.rating {
            println!("  rating: {rating}");
        }
        if let Some(website) = &content.website {
            println!("  website: {}", website.display);
        }
    }

    println!("\n=== Example completed successfully ===");
    Ok(())
}

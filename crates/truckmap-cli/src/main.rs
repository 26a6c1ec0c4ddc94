//! truckmap: terminal front end for truckmap-core
//!
//! Runs the same search controller a map widget would run, with the map and
//! the result list printed as text and searches answered by a fixture.
//!
//! Usage examples
//! --------------
//!
//! - Pick a place as if chosen from the autocomplete box
//!   $ truckmap place austin
//!
//! - Search the viewport around a coordinate
//!   $ truckmap search --lat 30.2672 --lng -97.7431 --zoom 13
//!
//! - Use the device location (or simulate its failure)
//!   $ truckmap locate --lat 30.5083 --lng -97.6789
//!   $ truckmap locate --fail
//!
//! - Open the info window of one truck
//!   $ truckmap details atx-veracruz
//!
//! Data source
//! -----------
//!
//! Without `--fixture` the Austin sample shipped in `truckmap-core/data` is used.
//! `--fixture <path>` loads a `.json` or `.json.gz` dataset of the same shape.
//! `--config <path>` reads controller settings from TOML.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::bail;
use clap::Parser;
use futures::executor::block_on;
use truckmap_cli::{
    drop_markers, init_logging, level_for, load_config, load_places, ArgGeolocator, TerminalMap,
    TerminalPanel, Transcript,
};
use truckmap_core::config::InitialView;
use truckmap_core::prelude::*;

/// Zoom used to frame a single place for the details command.
const DETAILS_ZOOM: u8 = 15;

type TerminalController<G = NoGeolocation> =
    LocationSearchController<TerminalMap, TerminalPanel, FixtureDirectory, G>;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(level_for(args.verbose))?;

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ControllerConfig::default(),
    };
    let places = load_places(args.fixture.as_deref())?;
    let out = Transcript::default();

    match args.command {
        Commands::Localities => {
            for locality in &places.dataset().localities {
                println!("{} ({})", locality.name, locality.location);
            }
        }

        Commands::Place { name } => {
            let place = places.resolve_locality(&name);
            let mut c = controller(&out, places, config);
            let result = block_on(c.on_place_selected(&place));
            report(&mut c, result, args.animate, &out);
        }

        Commands::Search { lat, lng, zoom } => {
            config.initial_view = InitialView {
                center: LatLng::new(lat, lng),
                zoom,
            };
            let mut c = controller(&out, places, config);
            let result = block_on(c.search());
            report(&mut c, result, args.animate, &out);
        }

        Commands::Locate { lat, lng, fail } => {
            let c = controller(&out, places, config);
            match (lat.zip(lng), fail) {
                (_, true) => {
                    let mut c = c.with_geolocator(ArgGeolocator::Failing("simulated".into()));
                    let result = block_on(c.on_use_current_location());
                    report(&mut c, result, args.animate, &out);
                }
                (Some((lat, lng)), false) => {
                    let mut c = c.with_geolocator(ArgGeolocator::Fixed(LatLng::new(lat, lng)));
                    let result = block_on(c.on_use_current_location());
                    report(&mut c, result, args.animate, &out);
                }
                (None, false) => {
                    let mut c = c;
                    let result = block_on(c.on_use_current_location());
                    report(&mut c, result, args.animate, &out);
                }
            }
        }

        Commands::Details { place_id } => {
            let id = PlaceId::from(place_id.as_str());
            let Some(center) = places.find_place(&id).map(|p| p.location) else {
                bail!("No place found for: {place_id}");
            };
            config.initial_view = InitialView {
                center,
                zoom: DETAILS_ZOOM,
            };
            let mut c = controller(&out, places, config);
            let SearchOutcome::Populated { generation, .. } = block_on(c.search())? else {
                bail!("search around {place_id} was superseded");
            };
            let Some(index) = c.markers().iter().position(|m| m.result.place_id == id) else {
                bail!("{place_id} is not a food truck");
            };
            out.take();

            let outcome = block_on(c.on_result_activated(MarkerKey { generation, index }))?;
            print_lines(&out);
            if let DetailsOutcome::Superseded = outcome {
                eprintln!("details for {place_id} were superseded");
            }
        }
    }

    Ok(())
}

fn controller(
    out: &Transcript,
    places: FixtureDirectory,
    config: ControllerConfig,
) -> TerminalController {
    LocationSearchController::new(
        TerminalMap::new(out.clone()),
        TerminalPanel::new(out.clone()),
        places,
        config,
    )
}

/// Prints what a search did. Failures only change the exit note, never the
/// displayed results.
fn report<G>(
    c: &mut TerminalController<G>,
    result: Result<SearchOutcome>,
    animate: bool,
    out: &Transcript,
) {
    match result {
        Ok(SearchOutcome::Populated { count, reveals, .. }) => {
            println!("{count} food truck(s):");
            print_lines(out);
            drop_markers(c, reveals, animate);
            print_lines(out);
        }
        Ok(SearchOutcome::Superseded) => print_lines(out),
        Err(err) => {
            print_lines(out);
            eprintln!("{err}");
        }
    }
}

fn print_lines(out: &Transcript) {
    for line in out.take() {
        println!("{line}");
    }
}

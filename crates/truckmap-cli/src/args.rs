use clap::{Parser, Subcommand};

/// CLI arguments for truckmap
#[derive(Debug, Parser)]
#[command(
    name = "truckmap",
    version,
    about = "Find food trucks around a place, the way the map widget does it"
)]
pub struct CliArgs {
    /// Path to a JSON or JSON.gz fixture (default: bundled Austin sample)
    #[arg(short = 'i', long = "fixture", global = true)]
    pub fixture: Option<String>,

    /// TOML file overriding controller settings (keyword, zooms, drop interval, ...)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Actually wait for the staggered marker drops
    #[arg(long = "animate", global = true)]
    pub animate: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Search the viewport around a coordinate
    Search {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Map zoom level for the viewport
        #[arg(long, default_value_t = 12)]
        zoom: u8,
    },

    /// Select a place by name, as if picked from the autocomplete box
    Place {
        /// Locality name (e.g. "Austin")
        name: String,
    },

    /// Use the device location
    Locate {
        /// Reported latitude; without coordinates geolocation is unsupported
        #[arg(long, allow_hyphen_values = true, requires = "lng")]
        lat: Option<f64>,
        #[arg(long, allow_hyphen_values = true, requires = "lat")]
        lng: Option<f64>,
        /// Simulate a failing position request
        #[arg(long, conflicts_with_all = ["lat", "lng"])]
        fail: bool,
    },

    /// Show the info window of one place
    Details {
        /// Place id from the fixture (e.g. atx-veracruz)
        place_id: String,
    },

    /// List the localities the place command understands
    Localities,
}

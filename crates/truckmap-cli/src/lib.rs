//! truckmap-cli
//! ============
//!
//! Terminal host for the `truckmap-core` search controller.
//!
//! The binary (`truckmap`) plugs a text map and a text results panel into the
//! controller and answers searches from a fixture dataset. This library target
//! holds those host pieces so they can be tested and reused.
//!
//! Quick start
//! -----------
//!
//! ```text
//! truckmap place austin
//! truckmap search --lat 30.2672 --lng -97.7431 --zoom 13
//! truckmap locate --lat 30.5083 --lng -97.6789
//! truckmap details atx-veracruz
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

use anyhow::Context;
use once_cell::sync::OnceCell;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use truckmap_core::model::{Bounds, ResultRow};
use truckmap_core::prelude::*;

/// Terminal viewport size used to derive the searched bounds.
pub const VIEW_WIDTH_PX: u32 = 1024;
pub const VIEW_HEIGHT_PX: u32 = 768;

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Initialize logging to stderr. `RUST_LOG` overrides `level`.
pub fn init_logging(level: impl Into<LevelFilter>) -> anyhow::Result<()> {
    LOGGER_INIT
        .get_or_try_init(|| {
            let filter = EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(level.into().to_string()))?;

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init()
                .map_err(|e| anyhow::anyhow!(e))
        })
        .map(|_| ())
}

pub fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Reads controller settings from a TOML file. Missing keys keep their defaults.
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<ControllerConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: ControllerConfig =
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Dataset file shipped with `truckmap-core`.
pub fn default_fixture_path() -> PathBuf {
    FixtureDirectory::default_data_dir().join(FixtureDirectory::default_dataset_filename())
}

/// Loads `fixture`, or the shipped dataset when no path is given.
///
/// A binary moved away from its source tree falls back to the copy compiled
/// into `truckmap-core`.
pub fn load_places(fixture: Option<&str>) -> anyhow::Result<FixtureDirectory> {
    let path = match fixture {
        Some(path) => PathBuf::from(path),
        None => {
            let path = default_fixture_path();
            if !path.exists() {
                tracing::debug!(path = %path.display(), "shipped dataset missing, using embedded copy");
                return Ok(FixtureDirectory::embedded()?);
            }
            path
        }
    };
    FixtureDirectory::load_from_path(&path)
        .with_context(|| format!("loading fixture {}", path.display()))
}

/// Lines written by the terminal map and panel, in call order.
#[derive(Debug, Clone, Default)]
pub struct Transcript(Rc<RefCell<Vec<String>>>);

impl Transcript {
    pub fn push(&self, line: impl Into<String>) {
        self.0.borrow_mut().push(line.into());
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

#[derive(Debug)]
struct TextMarker {
    handle: MarkerHandle,
    label: char,
    title: String,
    position: LatLng,
}

/// A map that narrates what a graphical map would show.
#[derive(Debug)]
pub struct TerminalMap {
    out: Transcript,
    center: LatLng,
    zoom: u8,
    next_handle: u64,
    markers: Vec<TextMarker>,
    info_anchor: Option<MarkerHandle>,
}

impl TerminalMap {
    pub fn new(out: Transcript) -> Self {
        Self {
            out,
            center: LatLng::new(0.0, 0.0),
            zoom: 0,
            next_handle: 0,
            markers: Vec::new(),
            info_anchor: None,
        }
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    fn marker(&self, handle: MarkerHandle) -> Option<&TextMarker> {
        self.markers.iter().find(|m| m.handle == handle)
    }
}

impl MapView for TerminalMap {
    fn set_center(&mut self, position: LatLng) {
        self.center = position;
    }

    fn pan_to(&mut self, position: LatLng) {
        self.out.push(format!("map: pan to {position}"));
        self.center = position;
    }

    fn set_zoom(&mut self, level: u8) {
        self.zoom = level;
    }

    fn center(&self) -> LatLng {
        self.center
    }

    fn zoom(&self) -> u8 {
        self.zoom
    }

    fn viewport_bounds(&self) -> Bounds {
        Bounds::around(self.center, self.zoom, VIEW_WIDTH_PX, VIEW_HEIGHT_PX)
    }

    fn add_marker(&mut self, spec: &MarkerSpec) -> MarkerHandle {
        self.next_handle += 1;
        let handle = MarkerHandle(self.next_handle);
        self.markers.push(TextMarker {
            handle,
            label: spec.label,
            title: spec.title.clone(),
            position: spec.position,
        });
        handle
    }

    fn show_marker(&mut self, handle: MarkerHandle) {
        if let Some(m) = self.marker(handle) {
            let line = format!("map: drop [{}] {} at {}", m.label, m.title, m.position);
            self.out.push(line);
        }
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.markers.retain(|m| m.handle != handle);
        if self.info_anchor == Some(handle) {
            self.info_anchor = None;
        }
    }

    // Clicks never originate from a terminal; routing keys are not needed.
    fn on_marker_clicked(&mut self, _handle: MarkerHandle, _key: MarkerKey) {}

    fn open_info_window(&mut self, handle: MarkerHandle) {
        self.info_anchor = Some(handle);
        if let Some(m) = self.marker(handle) {
            let line = format!("map: info window on [{}] {}", m.label, m.title);
            self.out.push(line);
        }
    }

    fn close_info_window(&mut self) {
        self.info_anchor = None;
    }

    fn show_error_bubble(&mut self, position: LatLng, message: &str) {
        self.out.push(format!("map: {message} (at {position})"));
    }
}

/// Result list and details printed as text.
#[derive(Debug)]
pub struct TerminalPanel {
    out: Transcript,
    rows: usize,
}

impl TerminalPanel {
    pub fn new(out: Transcript) -> Self {
        Self { out, rows: 0 }
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }
}

impl ResultsPanel for TerminalPanel {
    fn clear_rows(&mut self) {
        self.rows = 0;
    }

    fn append_row(&mut self, row: &ResultRow) {
        self.rows += 1;
        self.out.push(format!("  {}  {}", row.label, row.name));
    }

    fn show_details(&mut self, content: &InfoContent) {
        for line in format_info(content) {
            self.out.push(line);
        }
    }

    fn set_input_hint(&mut self, hint: &str) {
        self.out.push(format!("input: {hint}"));
    }
}

/// Position source configured from the command line.
#[derive(Debug, Clone)]
pub enum ArgGeolocator {
    Fixed(LatLng),
    Failing(String),
}

impl Geolocator for ArgGeolocator {
    async fn current_position(&self) -> std::result::Result<LatLng, GeolocationError> {
        match self {
            Self::Fixed(pos) => Ok(*pos),
            Self::Failing(reason) => Err(GeolocationError::Failed(reason.clone())),
        }
    }
}

/// Info window as plain text lines. Hidden rows are skipped.
pub fn format_info(content: &InfoContent) -> Vec<String> {
    let mut lines = vec![format!("┌ {}", content.name)];
    if let Some(url) = &content.url {
        lines.push(format!("│ link:    {url}"));
    }
    if let Some(address) = &content.address {
        lines.push(format!("│ address: {address}"));
    }
    if let Some(phone) = &content.phone {
        lines.push(format!("│ phone:   {phone}"));
    }
    if let Some(rating) = &content.rating {
        lines.push(format!("│ rating:  {rating} ({:.1})", rating.rating));
    }
    if let Some(website) = &content.website {
        lines.push(format!("│ website: {} <{}>", website.display, website.href));
    }
    if let Some(hours) = &content.hours {
        lines.push("│ hours:".to_owned());
        lines.extend(hours.iter().map(|h| format!("│   {h}")));
    }
    if let Some(review) = &content.review {
        lines.push(format!("│ review:  \"{}\" - {}", review.text, review.author));
    }
    if let Some(photo) = &content.photo {
        lines.push(format!("│ photo:   {photo}"));
    }
    lines.push("└".to_owned());
    lines
}

/// Drops the markers of a populated search in reveal order.
///
/// With `animate` the staggered delays are actually waited for.
pub fn drop_markers<M, R, P, G>(
    controller: &mut LocationSearchController<M, R, P, G>,
    mut reveals: Vec<RevealTask>,
    animate: bool,
) -> usize
where
    M: MapView,
    R: ResultsPanel,
{
    reveals.sort_by_key(|t| t.delay);
    let mut waited = std::time::Duration::ZERO;
    let mut dropped = 0;
    for task in reveals {
        if animate && task.delay > waited {
            std::thread::sleep(task.delay - waited);
            waited = task.delay;
        }
        if controller.reveal_marker(task) {
            dropped += 1;
        }
    }
    dropped
}

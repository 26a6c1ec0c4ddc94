#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::result::Result;
use truckmap_core::model::{Bounds, NearbyRequest, ResultRow};
use truckmap_core::prelude::*;

#[derive(Debug, Clone)]
pub struct PlacedMarker {
    pub spec: MarkerSpec,
    pub visible: bool,
    pub click_key: Option<MarkerKey>,
}

/// MapView that records every call.
#[derive(Debug, Default)]
pub struct RecordingMap {
    pub center: Option<LatLng>,
    pub zoom: u8,
    pub pans: Vec<LatLng>,
    next_handle: u64,
    pub markers: BTreeMap<MarkerHandle, PlacedMarker>,
    pub removed: Vec<MarkerHandle>,
    pub info_window: Option<MarkerHandle>,
    pub bubbles: Vec<(LatLng, String)>,
}

impl RecordingMap {
    pub fn visible_titles(&self) -> Vec<String> {
        self.markers
            .values()
            .filter(|m| m.visible)
            .map(|m| m.spec.title.clone())
            .collect()
    }

    pub fn titles(&self) -> Vec<String> {
        self.markers.values().map(|m| m.spec.title.clone()).collect()
    }
}

impl MapView for RecordingMap {
    fn set_center(&mut self, position: LatLng) {
        self.center = Some(position);
    }

    fn pan_to(&mut self, position: LatLng) {
        self.pans.push(position);
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
        Bounds::around(self.center(), self.zoom, 800, 600)
    }

    fn add_marker(&mut self, spec: &MarkerSpec) -> MarkerHandle {
        self.next_handle += 1;
        let handle = MarkerHandle(self.next_handle);
        self.markers.insert(
            handle,
            PlacedMarker {
                spec: spec.clone(),
                visible: false,
                click_key: None,
            },
        );
        handle
    }

    fn show_marker(&mut self, handle: MarkerHandle) {
        self.markers
            .get_mut(&handle)
            .expect("show_marker on a removed marker")
            .visible = true;
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.markers.remove(&handle);
        self.removed.push(handle);
    }

    fn on_marker_clicked(&mut self, handle: MarkerHandle, key: MarkerKey) {
        if let Some(m) = self.markers.get_mut(&handle) {
            m.click_key = Some(key);
        }
    }

    fn open_info_window(&mut self, handle: MarkerHandle) {
        self.info_window = Some(handle);
    }

    fn close_info_window(&mut self) {
        self.info_window = None;
    }

    fn show_error_bubble(&mut self, position: LatLng, message: &str) {
        self.bubbles.push((position, message.to_owned()));
    }
}

#[derive(Debug, Default)]
pub struct RecordingPanel {
    pub rows: Vec<ResultRow>,
    pub details: Vec<InfoContent>,
    pub hint: Option<String>,
    pub clears: usize,
}

impl ResultsPanel for RecordingPanel {
    fn clear_rows(&mut self) {
        self.rows.clear();
        self.clears += 1;
    }

    fn append_row(&mut self, row: &ResultRow) {
        self.rows.push(row.clone());
    }

    fn show_details(&mut self, content: &InfoContent) {
        self.details.push(content.clone());
    }

    fn set_input_hint(&mut self, hint: &str) {
        self.hint = Some(hint.to_owned());
    }
}

/// Directory answering nearby searches from a queue of scripted responses.
#[derive(Debug, Default)]
pub struct ScriptedDirectory {
    pub searches: RefCell<VecDeque<Result<Vec<SearchResult>, PlacesStatus>>>,
    pub details: HashMap<PlaceId, Result<PlaceDetails, PlacesStatus>>,
    pub search_calls: Cell<usize>,
    pub requests: RefCell<Vec<NearbyRequest>>,
}

impl ScriptedDirectory {
    pub fn then(self, response: Result<Vec<SearchResult>, PlacesStatus>) -> Self {
        self.searches.borrow_mut().push_back(response);
        self
    }

    pub fn with_details(mut self, id: &str, response: Result<PlaceDetails, PlacesStatus>) -> Self {
        self.details.insert(PlaceId::from(id), response);
        self
    }
}

impl PlacesDirectory for ScriptedDirectory {
    async fn search_nearby(
        &self,
        request: &NearbyRequest,
    ) -> Result<Vec<SearchResult>, PlacesStatus> {
        self.search_calls.set(self.search_calls.get() + 1);
        self.requests.borrow_mut().push(request.clone());
        self.searches
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(PlacesStatus::UnknownError))
    }

    async fn get_details(&self, place_id: &PlaceId) -> Result<PlaceDetails, PlacesStatus> {
        self.details
            .get(place_id)
            .cloned()
            .unwrap_or(Err(PlacesStatus::NotFound))
    }
}

pub struct FixedGeolocator(pub Result<LatLng, GeolocationError>);

impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<LatLng, GeolocationError> {
        self.0.clone()
    }
}

pub fn truck(id: &str, name: &str, lat: f64, lng: f64) -> SearchResult {
    SearchResult {
        place_id: PlaceId::from(id),
        name: name.to_owned(),
        location: LatLng::new(lat, lng),
        vicinity: None,
        icon: None,
    }
}

pub fn trucks(prefix: &str, n: usize) -> Vec<SearchResult> {
    (0..n)
        .map(|i| truck(&format!("{prefix}-{i}"), &format!("{prefix} truck {i}"), 30.0, -97.0))
        .collect()
}

pub type Controller<P, G = NoGeolocation> =
    LocationSearchController<RecordingMap, RecordingPanel, P, G>;

pub fn controller<P>(places: P) -> Controller<P> {
    LocationSearchController::new(
        RecordingMap::default(),
        RecordingPanel::default(),
        places,
        ControllerConfig::default(),
    )
}

pub fn austin() -> Place {
    Place::at("Austin, TX", LatLng::new(30.2672, -97.7431))
}

/// Markers and rows must always line up.
pub fn assert_rows_match_markers<P, G>(c: &Controller<P, G>) {
    assert_eq!(c.panel().rows.len(), c.markers().len());
    assert_eq!(c.map().markers.len(), c.markers().len());
    for (row, marker) in c.panel().rows.iter().zip(c.markers()) {
        assert_eq!(row.index, marker.index);
        assert_eq!(row.label, marker.label);
        assert_eq!(row.name, marker.result.name);
    }
}

//! JS objects supplied by the page, wrapped as controller capabilities.
//!
//! Every capability is a plain JS object with camelCase methods. Async ones
//! return a `Promise`; a places promise rejects with a status code string
//! such as `"ZERO_RESULTS"`.
use serde_wasm_bindgen::{from_value, to_value};
use truckmap_core::model::{Bounds, NearbyRequest, ResultRow};
use truckmap_core::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

/// Viewport size assumed when the page cannot report its bounds.
const FALLBACK_WIDTH_PX: u32 = 640;
const FALLBACK_HEIGHT_PX: u32 = 480;

#[wasm_bindgen]
extern "C" {
    #[derive(Debug, Clone)]
    pub type JsMap;

    #[wasm_bindgen(method, structural, js_name = setCenter)]
    fn set_center(this: &JsMap, lat: f64, lng: f64);
    #[wasm_bindgen(method, structural, js_name = panTo)]
    fn pan_to(this: &JsMap, lat: f64, lng: f64);
    #[wasm_bindgen(method, structural, js_name = setZoom)]
    fn set_zoom(this: &JsMap, zoom: u8);
    #[wasm_bindgen(method, structural, js_name = getCenter)]
    fn get_center(this: &JsMap) -> JsValue;
    #[wasm_bindgen(method, structural, js_name = getZoom)]
    fn get_zoom(this: &JsMap) -> JsValue;
    #[wasm_bindgen(method, structural, js_name = getBounds)]
    fn get_bounds(this: &JsMap) -> JsValue;
    #[wasm_bindgen(method, structural, js_name = addMarker)]
    fn add_marker(this: &JsMap, spec: JsValue) -> f64;
    #[wasm_bindgen(method, structural, js_name = showMarker)]
    fn show_marker(this: &JsMap, handle: f64);
    #[wasm_bindgen(method, structural, js_name = removeMarker)]
    fn remove_marker(this: &JsMap, handle: f64);
    /// The page should call `TruckFinder.markerClicked(generation, index)`
    /// when this marker is clicked.
    #[wasm_bindgen(method, structural, js_name = bindMarkerClick)]
    fn bind_marker_click(this: &JsMap, handle: f64, generation: f64, index: u32);
    #[wasm_bindgen(method, structural, js_name = openInfoWindow)]
    fn open_info_window(this: &JsMap, handle: f64);
    #[wasm_bindgen(method, structural, js_name = closeInfoWindow)]
    fn close_info_window(this: &JsMap);
    #[wasm_bindgen(method, structural, js_name = showErrorBubble)]
    fn show_error_bubble(this: &JsMap, lat: f64, lng: f64, message: &str);

    #[derive(Debug, Clone)]
    pub type JsPanel;

    #[wasm_bindgen(method, structural, js_name = clearRows)]
    fn clear_rows(this: &JsPanel);
    #[wasm_bindgen(method, structural, js_name = appendRow)]
    fn append_row(this: &JsPanel, row: JsValue);
    #[wasm_bindgen(method, structural, js_name = showDetails)]
    fn show_details(this: &JsPanel, content: JsValue);
    #[wasm_bindgen(method, structural, js_name = setInputHint)]
    fn set_input_hint(this: &JsPanel, hint: &str);

    #[derive(Debug, Clone)]
    pub type JsPlaces;

    #[wasm_bindgen(method, structural, js_name = searchNearby)]
    fn search_nearby(this: &JsPlaces, request: JsValue) -> js_sys::Promise;
    #[wasm_bindgen(method, structural, js_name = getDetails)]
    fn get_details(this: &JsPlaces, place_id: &str) -> js_sys::Promise;

    #[derive(Debug, Clone)]
    pub type JsGeolocator;

    #[wasm_bindgen(method, structural, js_name = currentPosition)]
    fn current_position(this: &JsGeolocator) -> js_sys::Promise;
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn console_log(message: &str) {
    web_sys::console::log_1(&message.into());
}

pub(crate) fn console_warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}

fn handle_id(handle: MarkerHandle) -> f64 {
    handle.0 as f64
}

/// Turns a rejected places promise into a status.
fn status_of(rejection: &JsValue) -> PlacesStatus {
    match rejection.as_string() {
        Some(code) => PlacesStatus::from_code(&code),
        None => {
            console_warn(&format!("places promise rejected without a status: {rejection:?}"));
            PlacesStatus::UnknownError
        }
    }
}

/// Map capability backed by a page object.
///
/// Camera values are mirrored so a page that cannot report them still gets
/// a sensible search viewport.
#[derive(Debug)]
pub struct BrowserMap {
    js: JsMap,
    center: LatLng,
    zoom: u8,
}

impl BrowserMap {
    pub fn new(js: JsMap) -> Self {
        Self {
            js,
            center: LatLng::new(0.0, 0.0),
            zoom: 0,
        }
    }
}

impl MapView for BrowserMap {
    fn set_center(&mut self, position: LatLng) {
        self.center = position;
        self.js.set_center(position.lat, position.lng);
    }

    fn pan_to(&mut self, position: LatLng) {
        self.center = position;
        self.js.pan_to(position.lat, position.lng);
    }

    fn set_zoom(&mut self, level: u8) {
        self.zoom = level;
        self.js.set_zoom(level);
    }

    fn center(&self) -> LatLng {
        from_value(self.js.get_center()).unwrap_or(self.center)
    }

    fn zoom(&self) -> u8 {
        self.js
            .get_zoom()
            .as_f64()
            .map(|z| z.clamp(0.0, f64::from(u8::MAX)) as u8)
            .unwrap_or(self.zoom)
    }

    fn viewport_bounds(&self) -> Bounds {
        from_value(self.js.get_bounds()).unwrap_or_else(|_| {
            Bounds::around(
                self.center(),
                self.zoom(),
                FALLBACK_WIDTH_PX,
                FALLBACK_HEIGHT_PX,
            )
        })
    }

    fn add_marker(&mut self, spec: &MarkerSpec) -> MarkerHandle {
        let spec = to_value(spec).unwrap_or(JsValue::NULL);
        MarkerHandle(self.js.add_marker(spec) as u64)
    }

    fn show_marker(&mut self, handle: MarkerHandle) {
        self.js.show_marker(handle_id(handle));
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.js.remove_marker(handle_id(handle));
    }

    fn on_marker_clicked(&mut self, handle: MarkerHandle, key: MarkerKey) {
        self.js
            .bind_marker_click(handle_id(handle), key.generation as f64, key.index as u32);
    }

    fn open_info_window(&mut self, handle: MarkerHandle) {
        self.js.open_info_window(handle_id(handle));
    }

    fn close_info_window(&mut self) {
        self.js.close_info_window();
    }

    fn show_error_bubble(&mut self, position: LatLng, message: &str) {
        self.js.show_error_bubble(position.lat, position.lng, message);
    }
}

#[derive(Debug)]
pub struct BrowserPanel(pub JsPanel);

impl ResultsPanel for BrowserPanel {
    fn clear_rows(&mut self) {
        self.0.clear_rows();
    }

    fn append_row(&mut self, row: &ResultRow) {
        match to_value(row) {
            Ok(row) => self.0.append_row(row),
            Err(e) => console_warn(&format!("row {} not rendered: {e}", row.index)),
        }
    }

    fn show_details(&mut self, content: &InfoContent) {
        match to_value(content) {
            Ok(content) => self.0.show_details(content),
            Err(e) => console_warn(&format!("details of {} not rendered: {e}", content.name)),
        }
    }

    fn set_input_hint(&mut self, hint: &str) {
        self.0.set_input_hint(hint);
    }
}

/// Places service reached through page promises.
#[derive(Debug, Clone)]
pub struct BrowserPlaces(pub JsPlaces);

impl PlacesDirectory for BrowserPlaces {
    async fn search_nearby(
        &self,
        request: &NearbyRequest,
    ) -> std::result::Result<Vec<SearchResult>, PlacesStatus> {
        let request = to_value(request).map_err(|_| PlacesStatus::InvalidRequest)?;
        let results = JsFuture::from(self.0.search_nearby(request))
            .await
            .map_err(|e| status_of(&e))?;
        from_value(results).map_err(|e| {
            console_warn(&format!("malformed nearby results: {e}"));
            PlacesStatus::UnknownError
        })
    }

    async fn get_details(
        &self,
        place_id: &PlaceId,
    ) -> std::result::Result<PlaceDetails, PlacesStatus> {
        let details = JsFuture::from(self.0.get_details(place_id.as_str()))
            .await
            .map_err(|e| status_of(&e))?;
        from_value(details).map_err(|e| {
            console_warn(&format!("malformed details for {place_id}: {e}"));
            PlacesStatus::UnknownError
        })
    }
}

/// Device position from the page; `None` means the browser has no
/// geolocation support.
#[derive(Debug, Clone)]
pub struct BrowserGeolocator(pub Option<JsGeolocator>);

impl Geolocator for BrowserGeolocator {
    async fn current_position(&self) -> std::result::Result<LatLng, GeolocationError> {
        let Some(js) = &self.0 else {
            return Err(GeolocationError::Unsupported);
        };
        let position = JsFuture::from(js.current_position())
            .await
            .map_err(|e| GeolocationError::Failed(e.as_string().unwrap_or_default()))?;
        from_value(position).map_err(|e| GeolocationError::Failed(e.to_string()))
    }
}

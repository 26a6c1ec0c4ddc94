//! truckmap-wasm: WebAssembly host for truckmap-core
//!
//! Exposes a `TruckFinder` class that runs the food truck search controller
//! against capabilities implemented by the page: a map, a results panel, a
//! places service and, optionally, a geolocator.
//!
//! What it provides
//! ----------------
//! - Automatic panic hook setup on module load (via `#[wasm_bindgen(start)]`)
//! - `TruckFinder` with `placeSelected`, `useCurrentLocation`, `search`,
//!   `activateRow`, `markerClicked`, `closeDetails` and `teardown`
//! - Pure helpers: `marker_label(i)`, `rating_glyphs(r)`,
//!   `shorten_website(url)` and `website_target(url)`
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { TruckFinder } from 'truckmap-wasm';
//!
//! await init();
//! const finder = new TruckFinder(mapAdapter, panelAdapter, placesAdapter,
//!                                navigator.geolocation ? geoAdapter : null,
//!                                { keyword: 'food truck' });
//! autocomplete.addListener('place_changed', () =>
//!   finder.placeSelected(toPlace(autocomplete.getPlace())).catch(console.warn));
//! ```
//!
//! Notes
//! -----
//! - Marker drops are scheduled with `setTimeout`; a drop that fires after a
//!   newer search has replaced the results does nothing.
//! - Promises returned by the class resolve with `null` when a newer request
//!   superseded them.
mod bindings;

use std::cell::RefCell;
use std::rc::Rc;
use std::result::Result;

use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use truckmap_core::prelude::*;
use truckmap_core::{DetailsTicket, SearchTicket};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsError;
use wasm_bindgen_futures::future_to_promise;

pub use crate::bindings::{
    BrowserGeolocator, BrowserMap, BrowserPanel, BrowserPlaces, JsGeolocator, JsMap, JsPanel,
    JsPlaces,
};
#[cfg(target_arch = "wasm32")]
use crate::bindings::console_log;
use crate::bindings::console_warn;

type BrowserController =
    LocationSearchController<BrowserMap, BrowserPanel, BrowserPlaces, BrowserGeolocator>;

/// `None` once the finder has been torn down.
type Shared = Rc<RefCell<Option<BrowserController>>>;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log("truckmap-wasm ready");
}

/// What a populated search resolves with.
#[derive(Debug, Serialize)]
struct SearchSummary {
    generation: u64,
    count: usize,
}

fn to_js(err: TruckMapError) -> JsValue {
    JsError::new(&err.to_string()).into()
}

fn torn_down() -> JsValue {
    JsError::new("TruckFinder has been torn down").into()
}

/// Runs `f` on the live controller. The borrow never spans an `await`.
fn with_controller<T>(
    shared: &Shared,
    f: impl FnOnce(&mut BrowserController) -> T,
) -> Result<T, JsValue> {
    let mut slot = shared.borrow_mut();
    let controller = slot.as_mut().ok_or_else(torn_down)?;
    Ok(f(controller))
}

/* --------------------------------------------------------------------------
   Searches
-------------------------------------------------------------------------- */

async fn finish_search(
    shared: Shared,
    places: BrowserPlaces,
    ticket: SearchTicket,
) -> Result<JsValue, JsValue> {
    let response = places.search_nearby(&ticket.request).await;
    let outcome = with_controller(&shared, |c| c.complete_search(ticket, response))?;

    match outcome.map_err(to_js)? {
        SearchOutcome::Populated {
            generation,
            count,
            reveals,
        } => {
            schedule_reveals(&shared, reveals)?;
            Ok(to_value(&SearchSummary { generation, count })?)
        }
        SearchOutcome::Superseded => Ok(JsValue::NULL),
    }
}

/// Queues one `setTimeout` per marker drop.
fn schedule_reveals(shared: &Shared, reveals: Vec<RevealTask>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    for task in reveals {
        let delay = i32::try_from(task.delay.as_millis()).unwrap_or(i32::MAX);
        let target = Rc::clone(shared);
        let drop_marker = Closure::once_into_js(move || match target.try_borrow_mut() {
            Ok(mut slot) => {
                if let Some(controller) = slot.as_mut() {
                    controller.reveal_marker(task);
                }
            }
            Err(_) => console_warn("marker drop skipped: finder busy"),
        });
        window.set_timeout_with_callback_and_timeout_and_arguments_0(
            drop_marker.unchecked_ref(),
            delay,
        )?;
    }
    Ok(())
}

/* --------------------------------------------------------------------------
   Details
-------------------------------------------------------------------------- */

async fn finish_details(
    shared: Shared,
    places: BrowserPlaces,
    ticket: DetailsTicket,
) -> Result<JsValue, JsValue> {
    let response = places.get_details(&ticket.place_id).await;
    let outcome = with_controller(&shared, |c| c.complete_details(ticket, response))?;

    match outcome.map_err(to_js)? {
        DetailsOutcome::Shown(content) => Ok(to_value(&content)?),
        DetailsOutcome::Superseded => Ok(JsValue::NULL),
    }
}

/* --------------------------------------------------------------------------
   TruckFinder
-------------------------------------------------------------------------- */

#[wasm_bindgen]
pub struct TruckFinder {
    shared: Shared,
}

#[wasm_bindgen]
impl TruckFinder {
    /// `geolocator` may be `null`/`undefined`; `config` may be a partial
    /// settings object.
    #[wasm_bindgen(constructor)]
    pub fn new(
        map: JsMap,
        panel: JsPanel,
        places: JsPlaces,
        geolocator: JsValue,
        config: JsValue,
    ) -> Result<TruckFinder, JsValue> {
        let config: ControllerConfig = if config.is_undefined() || config.is_null() {
            ControllerConfig::default()
        } else {
            from_value(config)?
        };
        config.validate().map_err(to_js)?;

        let geolocator = if geolocator.is_undefined() || geolocator.is_null() {
            None
        } else {
            Some(geolocator.unchecked_into::<JsGeolocator>())
        };

        let controller = LocationSearchController::new(
            BrowserMap::new(map),
            BrowserPanel(panel),
            BrowserPlaces(places),
            config,
        )
        .with_geolocator(BrowserGeolocator(geolocator));

        Ok(TruckFinder {
            shared: Rc::new(RefCell::new(Some(controller))),
        })
    }

    /// Applies an autocomplete selection `{ name, geometry? }`.
    #[wasm_bindgen(js_name = placeSelected)]
    pub fn place_selected(&self, place: JsValue) -> js_sys::Promise {
        let shared = Rc::clone(&self.shared);
        future_to_promise(async move {
            let place: Place = from_value(place)?;
            let (ticket, places) = with_controller(&shared, |c| {
                c.select_place(&place).map(|t| (t, c.places().clone()))
            })?
            .map_err(to_js)?;
            finish_search(shared, places, ticket).await
        })
    }

    #[wasm_bindgen(js_name = useCurrentLocation)]
    pub fn use_current_location(&self) -> js_sys::Promise {
        let shared = Rc::clone(&self.shared);
        future_to_promise(async move {
            let geolocator = with_controller(&shared, |c| c.geolocator().cloned())?;
            let position = match geolocator {
                Some(geolocator) => geolocator.current_position().await,
                None => Err(GeolocationError::Unsupported),
            };
            let (ticket, places) = with_controller(&shared, |c| {
                c.complete_locate(position).map(|t| (t, c.places().clone()))
            })?
            .map_err(to_js)?;
            finish_search(shared, places, ticket).await
        })
    }

    /// Searches the current map viewport.
    pub fn search(&self) -> js_sys::Promise {
        let shared = Rc::clone(&self.shared);
        future_to_promise(async move {
            let (ticket, places) =
                with_controller(&shared, |c| (c.begin_search(), c.places().clone()))?;
            finish_search(shared, places, ticket).await
        })
    }

    #[wasm_bindgen(js_name = activateRow)]
    pub fn activate_row(&self, index: u32) -> js_sys::Promise {
        let shared = Rc::clone(&self.shared);
        future_to_promise(async move {
            let (ticket, places) = with_controller(&shared, |c| {
                c.activate_row(index as usize)
                    .map(|t| (t, c.places().clone()))
            })?
            .map_err(to_js)?;
            finish_details(shared, places, ticket).await
        })
    }

    /// Called by the page for markers bound through `bindMarkerClick`.
    #[wasm_bindgen(js_name = markerClicked)]
    pub fn marker_clicked(&self, generation: f64, index: u32) -> js_sys::Promise {
        let shared = Rc::clone(&self.shared);
        let key = MarkerKey {
            generation: generation as u64,
            index: index as usize,
        };
        future_to_promise(async move {
            let (ticket, places) = with_controller(&shared, |c| {
                c.activate_marker(key).map(|t| (t, c.places().clone()))
            })?
            .map_err(to_js)?;
            finish_details(shared, places, ticket).await
        })
    }

    #[wasm_bindgen(js_name = closeDetails)]
    pub fn close_details(&self) -> Result<(), JsValue> {
        with_controller(&self.shared, |c| c.close_details())
    }

    #[wasm_bindgen(js_name = markerCount)]
    pub fn marker_count(&self) -> Result<usize, JsValue> {
        with_controller(&self.shared, |c| c.markers().len())
    }

    /// Removes markers and rows. Pending promises and drops become no-ops.
    pub fn teardown(&self) {
        if let Some(controller) = self.shared.borrow_mut().take() {
            controller.teardown();
        }
    }
}

/* --------------------------------------------------------------------------
   Helpers
-------------------------------------------------------------------------- */

/// Letter shown on the marker and row at `index`.
#[wasm_bindgen]
pub fn marker_label(index: usize) -> String {
    truckmap_core::marker_label(index).to_string()
}

/// Five-glyph star bar for a rating.
#[wasm_bindgen]
pub fn rating_glyphs(rating: f64) -> String {
    truckmap_core::rating_glyphs(rating)
        .iter()
        .map(|g| g.as_char())
        .collect()
}

/// Short display text of a website.
#[wasm_bindgen]
pub fn shorten_website(url: &str) -> String {
    truckmap_core::shorten_website(url).display
}

/// Link target of a website as the info window uses it.
#[wasm_bindgen]
pub fn website_target(url: &str) -> String {
    truckmap_core::shorten_website(url).href
}

// crates/truckmap-core/src/controller.rs
//! # Location search controller
//!
//! Owns the displayed search results and drives the host capabilities.
//!
//! Every user trigger has two shapes:
//! - an `async` convenience (`search`, `on_place_selected`, ...) that awaits
//!   the capability and applies the answer, for hosts that run one trigger
//!   at a time;
//! - a pair of synchronous primitives (`begin_search` / `complete_search`,
//!   `activate_marker` / `complete_details`, ...) for hosts whose
//!   completions arrive independently of each other (browser callbacks).
//!
//! Completions are matched against tickets. A search response is applied
//! only if its generation is the latest one requested; a details response
//! only if it answers the latest activation. Anything older is dropped as
//! [`SearchOutcome::Superseded`] / [`DetailsOutcome::Superseded`].
use crate::config::ControllerConfig;
use crate::error::{GeolocationError, PlacesStatus, Result, TruckMapError};
use crate::marker::{marker_icon_url, marker_label, MarkerRef, RevealTask};
use crate::model::{
    LatLng, MarkerKey, MarkerSpec, NearbyRequest, Place, PlaceDetails, PlaceId, ResultRow,
    RowShade, SearchResult,
};
use crate::render::{render_details, InfoContent};
use crate::traits::{Geolocator, MapView, NoGeolocation, PlacesDirectory, ResultsPanel};
use tracing::{debug, info, warn};

/// Lifecycle of the result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Nothing displayed and nothing in flight.
    Idle,
    /// A nearby search for `generation` is in flight.
    Searching { generation: u64 },
    /// Results of `generation` are displayed.
    Populated { generation: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailsState {
    Closed,
    Open { place_id: PlaceId, index: usize },
}

/// Camera, highlighted marker and the displayed markers.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub center: LatLng,
    pub zoom: u8,
    pub highlighted: Option<usize>,
    pub markers: Vec<MarkerRef>,
    /// Generation of the displayed markers; 0 before the first result set.
    pub generation: u64,
}

/// A nearby search the host has to run against the directory.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTicket {
    pub generation: u64,
    pub request: NearbyRequest,
}

/// A details lookup the host has to run against the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsTicket {
    pub seq: u64,
    pub key: MarkerKey,
    pub place_id: PlaceId,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The result set was replaced. Reveal tasks must be scheduled by the host.
    Populated {
        generation: u64,
        count: usize,
        reveals: Vec<RevealTask>,
    },
    /// A newer search was requested meanwhile; nothing changed.
    Superseded,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailsOutcome {
    Shown(InfoContent),
    Superseded,
}

pub struct LocationSearchController<M, R, P, G = NoGeolocation> {
    map: M,
    panel: R,
    places: P,
    geolocator: Option<G>,
    config: ControllerConfig,
    view: ViewState,
    phase: SearchPhase,
    details: DetailsState,
    requested_generation: u64,
    details_seq: u64,
    pending_details: Option<u64>,
}

impl<M: MapView, R: ResultsPanel, P> LocationSearchController<M, R, P, NoGeolocation> {
    /// Creates a controller and moves the map to the configured initial view.
    pub fn new(mut map: M, panel: R, places: P, config: ControllerConfig) -> Self {
        let initial = config.initial_view;
        map.set_center(initial.center);
        map.set_zoom(initial.zoom);

        Self {
            map,
            panel,
            places,
            geolocator: None,
            view: ViewState {
                center: initial.center,
                zoom: initial.zoom,
                highlighted: None,
                markers: Vec::new(),
                generation: 0,
            },
            config,
            phase: SearchPhase::Idle,
            details: DetailsState::Closed,
            requested_generation: 0,
            details_seq: 0,
            pending_details: None,
        }
    }

    /// Attaches a device geolocation capability.
    pub fn with_geolocator<G>(self, geolocator: G) -> LocationSearchController<M, R, P, G> {
        LocationSearchController {
            map: self.map,
            panel: self.panel,
            places: self.places,
            geolocator: Some(geolocator),
            config: self.config,
            view: self.view,
            phase: self.phase,
            details: self.details,
            requested_generation: self.requested_generation,
            details_seq: self.details_seq,
            pending_details: self.pending_details,
        }
    }
}

impl<M, R, P, G> LocationSearchController<M, R, P, G> {
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn markers(&self) -> &[MarkerRef] {
        &self.view.markers
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn details_state(&self) -> &DetailsState {
        &self.details
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn panel(&self) -> &R {
        &self.panel
    }

    pub fn places(&self) -> &P {
        &self.places
    }

    pub fn geolocator(&self) -> Option<&G> {
        self.geolocator.as_ref()
    }

    /// Latest search generation handed out by [`Self::begin_search`].
    pub fn requested_generation(&self) -> u64 {
        self.requested_generation
    }
}

impl<M: MapView, R: ResultsPanel, P, G> LocationSearchController<M, R, P, G> {
    /// Applies an autocomplete selection.
    ///
    /// Without geometry the input shows the placeholder prompt and no search
    /// is started.
    pub fn select_place(&mut self, place: &Place) -> Result<SearchTicket> {
        let Some(geometry) = &place.geometry else {
            debug!(name = %place.name, "selected place has no geometry");
            self.panel.set_input_hint(&self.config.input_placeholder);
            return Err(TruckMapError::InputIncomplete);
        };

        self.map.pan_to(geometry.location);
        self.map.set_zoom(self.config.place_zoom);
        self.sync_camera();
        Ok(self.begin_search())
    }

    /// Applies the answer of a one-shot position request.
    ///
    /// Failures show an error bubble at the current map center; the message
    /// tells "not supported" apart from "request failed".
    pub fn complete_locate(
        &mut self,
        position: std::result::Result<LatLng, GeolocationError>,
    ) -> Result<SearchTicket> {
        match position {
            Ok(pos) => {
                self.map.set_center(pos);
                if let Some(zoom) = self.config.location_zoom {
                    self.map.set_zoom(zoom);
                }
                self.sync_camera();
                Ok(self.begin_search())
            }
            Err(GeolocationError::Unsupported) => {
                let at = self.map.center();
                self.map
                    .show_error_bubble(at, &self.config.geolocation.unavailable);
                warn!("geolocation not supported by host");
                Err(TruckMapError::GeolocationUnavailable)
            }
            Err(GeolocationError::Failed(reason)) => {
                let at = self.map.center();
                self.map.show_error_bubble(at, &self.config.geolocation.failed);
                warn!(%reason, "geolocation request failed");
                Err(TruckMapError::GeolocationFailed(reason))
            }
        }
    }

    /// Starts a nearby search over the current viewport.
    ///
    /// Nothing displayed changes until the matching [`Self::complete_search`].
    pub fn begin_search(&mut self) -> SearchTicket {
        self.requested_generation += 1;
        let generation = self.requested_generation;
        self.phase = SearchPhase::Searching { generation };

        let request = NearbyRequest {
            bounds: self.map.viewport_bounds(),
            keyword: self.config.keyword.clone(),
        };
        debug!(generation, keyword = %request.keyword, "nearby search requested");
        SearchTicket {
            generation,
            request,
        }
    }

    /// Applies a nearby search response.
    ///
    /// On a non-OK status the displayed results stay as they are.
    pub fn complete_search(
        &mut self,
        ticket: SearchTicket,
        response: std::result::Result<Vec<SearchResult>, PlacesStatus>,
    ) -> Result<SearchOutcome> {
        if ticket.generation != self.requested_generation {
            debug!(
                generation = ticket.generation,
                latest = self.requested_generation,
                "dropping superseded search response"
            );
            return Ok(SearchOutcome::Superseded);
        }

        match response {
            Ok(results) => Ok(self.replace_results(ticket.generation, results)),
            Err(status) => {
                self.phase = self.settled_phase();
                warn!(generation = ticket.generation, %status, "nearby search failed");
                Err(TruckMapError::SearchFailed(status))
            }
        }
    }

    /// Drops one marker onto the map. Returns `false` for stale or repeated tasks.
    pub fn reveal_marker(&mut self, task: RevealTask) -> bool {
        if task.key.generation != self.view.generation {
            debug!(
                generation = task.key.generation,
                current = self.view.generation,
                "ignoring stale marker reveal"
            );
            return false;
        }
        let Some(marker) = self.view.markers.get_mut(task.key.index) else {
            return false;
        };
        if marker.revealed {
            return false;
        }
        self.map.show_marker(marker.handle);
        marker.revealed = true;
        true
    }

    /// Starts a details lookup for a clicked marker.
    pub fn activate_marker(&mut self, key: MarkerKey) -> Result<DetailsTicket> {
        if key.generation != self.view.generation {
            return Err(TruckMapError::UnknownMarker(format!(
                "generation {} (current {})",
                key.generation, self.view.generation
            )));
        }
        let marker = self
            .view
            .markers
            .get(key.index)
            .ok_or_else(|| TruckMapError::UnknownMarker(format!("index {}", key.index)))?;
        let place_id = marker.result.place_id.clone();

        self.details_seq += 1;
        self.pending_details = Some(self.details_seq);
        debug!(seq = self.details_seq, %place_id, "details requested");
        Ok(DetailsTicket {
            seq: self.details_seq,
            key,
            place_id,
        })
    }

    /// Row clicks behave exactly like clicks on the row's marker.
    pub fn activate_row(&mut self, index: usize) -> Result<DetailsTicket> {
        self.activate_marker(MarkerKey {
            generation: self.view.generation,
            index,
        })
    }

    /// Applies a details response.
    ///
    /// Only the answer to the latest activation renders. A failed lookup
    /// leaves the panel untouched.
    pub fn complete_details(
        &mut self,
        ticket: DetailsTicket,
        response: std::result::Result<PlaceDetails, PlacesStatus>,
    ) -> Result<DetailsOutcome> {
        if self.pending_details != Some(ticket.seq) || ticket.key.generation != self.view.generation
        {
            debug!(seq = ticket.seq, "dropping superseded details response");
            return Ok(DetailsOutcome::Superseded);
        }
        self.pending_details = None;

        let details = response.map_err(|status| {
            debug!(place_id = %ticket.place_id, %status, "details fetch failed");
            TruckMapError::DetailsFetchFailed(status)
        })?;
        let handle = self
            .view
            .markers
            .get(ticket.key.index)
            .map(|m| m.handle)
            .ok_or_else(|| TruckMapError::UnknownMarker(format!("index {}", ticket.key.index)))?;

        let content = render_details(&details);
        self.map.open_info_window(handle);
        self.panel.show_details(&content);
        self.view.highlighted = Some(ticket.key.index);
        self.details = DetailsState::Open {
            place_id: ticket.place_id,
            index: ticket.key.index,
        };
        Ok(DetailsOutcome::Shown(content))
    }

    /// Closes the info window and forgets any in-flight details lookup.
    pub fn close_details(&mut self) {
        self.map.close_info_window();
        self.details = DetailsState::Closed;
        self.pending_details = None;
        self.view.highlighted = None;
    }

    /// Removes everything this controller put on the view and hands the
    /// capabilities back.
    pub fn teardown(mut self) -> (M, R, P) {
        self.clear_results();
        self.map.close_info_window();
        (self.map, self.panel, self.places)
    }

    fn replace_results(&mut self, generation: u64, results: Vec<SearchResult>) -> SearchOutcome {
        self.clear_results();
        self.close_details();
        self.view.generation = generation;

        let interval = self.config.drop_interval();
        let mut reveals = Vec::with_capacity(results.len());
        for (index, result) in results.into_iter().enumerate() {
            let label = marker_label(index);
            let icon = marker_icon_url(&self.config.marker_icon_base, label);
            let key = MarkerKey { generation, index };

            let handle = self.map.add_marker(&MarkerSpec {
                key,
                position: result.location,
                label,
                icon: icon.clone(),
                title: result.name.clone(),
            });
            self.map.on_marker_clicked(handle, key);
            reveals.push(RevealTask::new(generation, index, interval));

            self.panel.append_row(&ResultRow {
                index,
                label,
                icon,
                name: result.name.clone(),
                shade: RowShade::for_index(index),
            });
            self.view.markers.push(MarkerRef {
                index,
                label,
                handle,
                result,
                revealed: false,
            });
        }

        let count = self.view.markers.len();
        self.phase = SearchPhase::Populated { generation };
        info!(generation, count, "search results displayed");
        SearchOutcome::Populated {
            generation,
            count,
            reveals,
        }
    }

    /// Rows and markers go together.
    fn clear_results(&mut self) {
        self.panel.clear_rows();
        for marker in self.view.markers.drain(..) {
            self.map.remove_marker(marker.handle);
        }
    }

    fn settled_phase(&self) -> SearchPhase {
        if self.view.generation == 0 {
            SearchPhase::Idle
        } else {
            SearchPhase::Populated {
                generation: self.view.generation,
            }
        }
    }

    fn sync_camera(&mut self) {
        self.view.center = self.map.center();
        self.view.zoom = self.map.zoom();
    }
}

impl<M, R, P, G> LocationSearchController<M, R, P, G>
where
    M: MapView,
    R: ResultsPanel,
    P: PlacesDirectory,
    G: Geolocator,
{
    /// Searches the current viewport and applies the response.
    pub async fn search(&mut self) -> Result<SearchOutcome> {
        let ticket = self.begin_search();
        self.run_search(ticket).await
    }

    pub async fn on_place_selected(&mut self, place: &Place) -> Result<SearchOutcome> {
        let ticket = self.select_place(place)?;
        self.run_search(ticket).await
    }

    pub async fn on_use_current_location(&mut self) -> Result<SearchOutcome> {
        let position = match &self.geolocator {
            Some(geolocator) => geolocator.current_position().await,
            None => Err(GeolocationError::Unsupported),
        };
        let ticket = self.complete_locate(position)?;
        self.run_search(ticket).await
    }

    /// Fetches and shows details for the marker behind `key`.
    pub async fn on_result_activated(&mut self, key: MarkerKey) -> Result<DetailsOutcome> {
        let ticket = self.activate_marker(key)?;
        let response = self.places.get_details(&ticket.place_id).await;
        self.complete_details(ticket, response)
    }

    async fn run_search(&mut self, ticket: SearchTicket) -> Result<SearchOutcome> {
        let response = self.places.search_nearby(&ticket.request).await;
        self.complete_search(ticket, response)
    }
}

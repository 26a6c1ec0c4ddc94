mod common;

use common::*;
use futures::executor::block_on;
use std::time::Duration;
use truckmap_core::prelude::*;

fn populated(outcome: SearchOutcome) -> (u64, usize, Vec<RevealTask>) {
    match outcome {
        SearchOutcome::Populated {
            generation,
            count,
            reveals,
        } => (generation, count, reveals),
        SearchOutcome::Superseded => panic!("expected a populated outcome"),
    }
}

#[test]
fn starts_on_initial_view() {
    let c = controller(ScriptedDirectory::default());
    assert_eq!(c.map().center, Some(LatLng::new(37.1, -95.7)));
    assert_eq!(c.map().zoom, 3);
    assert_eq!(c.phase(), SearchPhase::Idle);
    assert!(c.markers().is_empty());
}

#[test]
fn place_without_geometry_prompts_and_does_not_search() {
    let mut c = controller(ScriptedDirectory::default());

    let err = block_on(c.on_place_selected(&Place::unresolved("somewhere"))).unwrap_err();

    assert!(matches!(err, TruckMapError::InputIncomplete));
    assert_eq!(c.panel().hint.as_deref(), Some("Enter a location"));
    assert_eq!(c.places().search_calls.get(), 0);
    assert_eq!(c.phase(), SearchPhase::Idle);
}

#[test]
fn place_selection_recenters_and_populates() {
    let dir = ScriptedDirectory::default().then(Ok(vec![
        truck("a", "Veracruz", 30.25, -97.71),
        truck("b", "Pueblo Viejo", 30.26, -97.73),
        truck("c", "Granny's", 30.25, -97.73),
    ]));
    let mut c = controller(dir);

    let (generation, count, reveals) =
        populated(block_on(c.on_place_selected(&austin())).unwrap());

    assert_eq!(c.map().pans, vec![LatLng::new(30.2672, -97.7431)]);
    assert_eq!(c.map().zoom, 10);
    assert_eq!(c.view().zoom, 10);
    assert_eq!(count, 3);
    assert_eq!(c.phase(), SearchPhase::Populated { generation });

    let requests = c.places().requests.borrow();
    let request = &requests[0];
    assert_eq!(request.keyword, "food truck");
    assert!(request.bounds.contains(LatLng::new(30.2672, -97.7431)));

    let labels: Vec<char> = c.panel().rows.iter().map(|r| r.label).collect();
    assert_eq!(labels, vec!['A', 'B', 'C']);
    assert!(c.panel().rows[1].icon.ends_with("marker_greenB.png"));
    assert_rows_match_markers(&c);

    let delays: Vec<Duration> = reveals.iter().map(|t| t.delay).collect();
    assert_eq!(
        delays,
        vec![
            Duration::ZERO,
            Duration::from_millis(100),
            Duration::from_millis(200)
        ]
    );
}

#[test]
fn markers_stay_hidden_until_revealed() {
    let dir = ScriptedDirectory::default().then(Ok(trucks("x", 2)));
    let mut c = controller(dir);

    let (_, _, reveals) = populated(block_on(c.search()).unwrap());
    assert!(c.map().visible_titles().is_empty());

    assert!(c.reveal_marker(reveals[1]));
    assert_eq!(c.map().visible_titles(), vec!["x truck 1".to_string()]);
    assert!(!c.reveal_marker(reveals[1]), "a marker drops only once");

    assert!(c.reveal_marker(reveals[0]));
    assert_eq!(c.map().visible_titles().len(), 2);
    assert!(c.markers().iter().all(|m| m.revealed));
}

#[test]
fn clicks_are_routed_with_marker_keys() {
    let dir = ScriptedDirectory::default().then(Ok(trucks("x", 2)));
    let mut c = controller(dir);
    let (generation, _, _) = populated(block_on(c.search()).unwrap());

    for marker in c.markers() {
        let placed = &c.map().markers[&marker.handle];
        assert_eq!(
            placed.click_key,
            Some(MarkerKey {
                generation,
                index: marker.index
            })
        );
        assert_eq!(placed.spec.label, marker.label);
    }
}

#[test]
fn labels_wrap_after_twenty_six_results() {
    let dir = ScriptedDirectory::default().then(Ok(trucks("x", 28)));
    let mut c = controller(dir);
    block_on(c.search()).unwrap();

    let labels: Vec<char> = c.markers().iter().map(|m| m.label).collect();
    assert_eq!(labels[0], 'A');
    assert_eq!(labels[25], 'Z');
    assert_eq!(labels[26], 'A');
    assert_eq!(labels[27], 'B');
    assert_rows_match_markers(&c);
}

#[test]
fn failed_first_search_returns_to_idle() {
    let dir = ScriptedDirectory::default().then(Err(PlacesStatus::OverQueryLimit));
    let mut c = controller(dir);

    let err = block_on(c.search()).unwrap_err();

    assert!(matches!(
        err,
        TruckMapError::SearchFailed(PlacesStatus::OverQueryLimit)
    ));
    assert_eq!(c.phase(), SearchPhase::Idle);
    assert_eq!(c.panel().clears, 0);
}

#[test]
fn failed_search_keeps_previous_results() {
    let dir = ScriptedDirectory::default()
        .then(Ok(trucks("old", 4)))
        .then(Err(PlacesStatus::ZeroResults));
    let mut c = controller(dir);

    let (generation, _, _) = populated(block_on(c.search()).unwrap());
    let before: Vec<MarkerHandle> = c.markers().iter().map(|m| m.handle).collect();

    assert!(block_on(c.search()).is_err());

    let after: Vec<MarkerHandle> = c.markers().iter().map(|m| m.handle).collect();
    assert_eq!(before, after);
    assert_eq!(c.panel().rows.len(), 4);
    assert!(c.map().removed.is_empty());
    assert_eq!(c.phase(), SearchPhase::Populated { generation });
    assert_rows_match_markers(&c);
}

#[test]
fn second_search_replaces_first_completely() {
    let dir = ScriptedDirectory::default()
        .then(Ok(trucks("first", 5)))
        .then(Ok(trucks("second", 2)));
    let mut c = controller(dir);

    let (_, _, first_reveals) = populated(block_on(c.search()).unwrap());
    c.reveal_marker(first_reveals[0]);
    let (_, _, second_reveals) = populated(block_on(c.search()).unwrap());

    // Late timers from the first search must not touch the new markers.
    for task in first_reveals {
        assert!(!c.reveal_marker(task));
    }
    for task in second_reveals {
        assert!(c.reveal_marker(task));
    }

    assert_eq!(
        c.map().titles(),
        vec!["second truck 0".to_string(), "second truck 1".to_string()]
    );
    assert_eq!(c.map().removed.len(), 5);
    assert_rows_match_markers(&c);
}

#[test]
fn interleaved_searches_show_only_the_latest() {
    let mut c = controller(ScriptedDirectory::default());

    let first = c.begin_search();
    let second = c.begin_search();
    assert!(second.generation > first.generation);
    assert_eq!(c.requested_generation(), second.generation);

    let (generation, _, _) =
        populated(c.complete_search(second, Ok(trucks("second", 3))).unwrap());
    let late = c.complete_search(first, Ok(trucks("first", 6))).unwrap();

    assert_eq!(late, SearchOutcome::Superseded);
    assert_eq!(c.phase(), SearchPhase::Populated { generation });
    assert!(c
        .markers()
        .iter()
        .all(|m| m.result.name.starts_with("second")));
    assert_eq!(c.map().markers.len(), 3);
    assert_rows_match_markers(&c);
}

#[test]
fn early_answer_to_an_outdated_search_is_dropped() {
    let mut c = controller(ScriptedDirectory::default());

    let first = c.begin_search();
    let second = c.begin_search();

    // The outdated answer arrives first, even as a failure.
    assert_eq!(
        c.complete_search(first, Err(PlacesStatus::UnknownError)).unwrap(),
        SearchOutcome::Superseded
    );
    assert!(matches!(c.phase(), SearchPhase::Searching { .. }));

    populated(c.complete_search(second, Ok(trucks("second", 1))).unwrap());
    assert_eq!(c.markers().len(), 1);
}

#[test]
fn geolocation_absent_and_failed_are_distinguishable() {
    let mut absent = controller(ScriptedDirectory::default());
    let err = block_on(absent.on_use_current_location()).unwrap_err();
    assert!(matches!(err, TruckMapError::GeolocationUnavailable));

    let mut failing = controller(ScriptedDirectory::default())
        .with_geolocator(FixedGeolocator(Err(GeolocationError::Failed("denied".into()))));
    let err = block_on(failing.on_use_current_location()).unwrap_err();
    assert!(matches!(err, TruckMapError::GeolocationFailed(ref r) if r == "denied"));

    let (absent_at, absent_msg) = &absent.map().bubbles[0];
    let (failed_at, failed_msg) = &failing.map().bubbles[0];
    assert_ne!(absent_msg, failed_msg);
    assert!(absent_msg.contains("doesn't support"));
    assert!(failed_msg.contains("service failed"));

    // Bubbles sit at the last known center.
    assert_eq!(*absent_at, LatLng::new(37.1, -95.7));
    assert_eq!(*failed_at, LatLng::new(37.1, -95.7));
    assert_eq!(failing.places().search_calls.get(), 0);
}

#[test]
fn geolocation_success_centers_and_searches() {
    let here = LatLng::new(30.5083, -97.6789);
    let dir = ScriptedDirectory::default().then(Ok(trucks("rr", 1)));
    let mut c = controller(dir).with_geolocator(FixedGeolocator(Ok(here)));

    populated(block_on(c.on_use_current_location()).unwrap());

    assert_eq!(c.map().center, Some(here));
    assert_eq!(c.view().center, here);
    assert!(c.map().bubbles.is_empty());
    assert!(c.places().requests.borrow()[0].bounds.contains(here));
}

#[test]
fn activation_renders_details_on_the_marker() {
    let details = PlaceDetails {
        name: "Veracruz".into(),
        phone: Some("(512) 981-1760".into()),
        rating: Some(4.7),
        website: Some("https://veracruz.example/menu".into()),
        ..PlaceDetails::default()
    };
    let dir = ScriptedDirectory::default()
        .then(Ok(vec![truck("a", "Veracruz", 30.25, -97.71)]))
        .with_details("a", Ok(details));
    let mut c = controller(dir);
    let (generation, _, _) = populated(block_on(c.search()).unwrap());

    let outcome = block_on(c.on_result_activated(MarkerKey {
        generation,
        index: 0,
    }))
    .unwrap();

    let DetailsOutcome::Shown(content) = outcome else {
        panic!("details should render");
    };
    assert_eq!(content.rating.map(|r| r.filled()), Some(5));
    assert_eq!(
        content.website.as_ref().map(|w| w.display.as_str()),
        Some("https://veracruz.example/")
    );
    assert_eq!(c.map().info_window, Some(c.markers()[0].handle));
    assert_eq!(c.panel().details.len(), 1);
    assert_eq!(c.view().highlighted, Some(0));
    assert_eq!(
        *c.details_state(),
        DetailsState::Open {
            place_id: PlaceId::from("a"),
            index: 0
        }
    );
}

#[test]
fn failed_details_leave_panel_untouched() {
    let dir = ScriptedDirectory::default()
        .then(Ok(trucks("x", 1)))
        .with_details("x-0", Err(PlacesStatus::UnknownError));
    let mut c = controller(dir);
    block_on(c.search()).unwrap();

    let ticket = c.activate_row(0).unwrap();
    let err = c
        .complete_details(ticket, Err(PlacesStatus::UnknownError))
        .unwrap_err();

    assert!(matches!(err, TruckMapError::DetailsFetchFailed(_)));
    assert!(c.panel().details.is_empty());
    assert_eq!(c.map().info_window, None);
    assert_eq!(*c.details_state(), DetailsState::Closed);
}

#[test]
fn latest_activation_wins() {
    let mut c = controller(ScriptedDirectory::default());
    let ticket = c.begin_search();
    c.complete_search(ticket, Ok(trucks("x", 2))).unwrap();

    let first = c.activate_row(0).unwrap();
    let second = c.activate_row(1).unwrap();

    let shown = c
        .complete_details(
            second,
            Ok(PlaceDetails {
                name: "second".into(),
                ..PlaceDetails::default()
            }),
        )
        .unwrap();
    assert!(matches!(shown, DetailsOutcome::Shown(_)));

    let stale = c
        .complete_details(
            first,
            Ok(PlaceDetails {
                name: "first".into(),
                ..PlaceDetails::default()
            }),
        )
        .unwrap();
    assert_eq!(stale, DetailsOutcome::Superseded);

    assert_eq!(c.panel().details.len(), 1);
    assert_eq!(c.panel().details[0].name, "second");
    assert_eq!(c.map().info_window, Some(c.markers()[1].handle));
}

#[test]
fn new_search_closes_details_and_drops_pending_lookup() {
    let mut c = controller(ScriptedDirectory::default());
    let ticket = c.begin_search();
    c.complete_search(ticket, Ok(trucks("x", 2))).unwrap();
    let open = c.activate_row(0).unwrap();
    c.complete_details(open, Ok(PlaceDetails::default())).unwrap();
    let pending = c.activate_row(1).unwrap();

    let ticket = c.begin_search();
    c.complete_search(ticket, Ok(trucks("y", 2))).unwrap();

    assert_eq!(*c.details_state(), DetailsState::Closed);
    assert_eq!(c.map().info_window, None);
    assert_eq!(
        c.complete_details(pending, Ok(PlaceDetails::default()))
            .unwrap(),
        DetailsOutcome::Superseded
    );
}

#[test]
fn close_details_invalidates_in_flight_lookup() {
    let mut c = controller(ScriptedDirectory::default());
    let ticket = c.begin_search();
    c.complete_search(ticket, Ok(trucks("x", 1))).unwrap();

    let pending = c.activate_row(0).unwrap();
    c.close_details();

    assert_eq!(
        c.complete_details(pending, Ok(PlaceDetails::default()))
            .unwrap(),
        DetailsOutcome::Superseded
    );
    assert!(c.panel().details.is_empty());
}

#[test]
fn activating_an_old_marker_is_rejected() {
    let mut c = controller(ScriptedDirectory::default());
    let first = c.begin_search();
    let (old_generation, _, _) = populated(c.complete_search(first, Ok(trucks("x", 1))).unwrap());
    let second = c.begin_search();
    c.complete_search(second, Ok(trucks("y", 1))).unwrap();

    let err = c
        .activate_marker(MarkerKey {
            generation: old_generation,
            index: 0,
        })
        .unwrap_err();
    assert!(matches!(err, TruckMapError::UnknownMarker(_)));
    assert!(matches!(
        c.activate_row(5),
        Err(TruckMapError::UnknownMarker(_))
    ));
}

#[test]
fn teardown_removes_everything() {
    let dir = ScriptedDirectory::default().then(Ok(trucks("x", 3)));
    let mut c = controller(dir);
    block_on(c.search()).unwrap();

    let (map, panel, _) = c.teardown();
    assert!(map.markers.is_empty());
    assert!(panel.rows.is_empty());
    assert_eq!(map.info_window, None);
}

#[test]
fn configured_keyword_and_interval_are_used() {
    let config = ControllerConfigBuilder::new()
        .keyword("taco")
        .drop_interval(Duration::from_millis(250))
        .build();
    let dir = ScriptedDirectory::default().then(Ok(trucks("t", 2)));
    let mut c = LocationSearchController::new(
        RecordingMap::default(),
        RecordingPanel::default(),
        dir,
        config,
    );

    let (_, _, reveals) = populated(block_on(c.search()).unwrap());
    assert_eq!(c.places().requests.borrow()[0].keyword, "taco");
    assert_eq!(reveals[1].delay, Duration::from_millis(250));
}

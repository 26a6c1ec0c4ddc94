// crates/truckmap-core/src/marker.rs
use crate::model::{MarkerHandle, MarkerKey, SearchResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const LABEL_CYCLE: usize = 26;

/// Display label of the marker at `index`: `A`..`Z`, then wrapping back to `A`.
pub fn marker_label(index: usize) -> char {
    char::from(b'A' + (index % LABEL_CYCLE) as u8)
}

/// Icon URL for `label`, e.g. `.../marker_greenA.png`.
pub fn marker_icon_url(base: &str, label: char) -> String {
    format!("{base}{label}.png")
}

/// A displayed result: the search hit plus its marker on the view.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerRef {
    pub index: usize,
    pub label: char,
    pub handle: MarkerHandle,
    pub result: SearchResult,
    pub revealed: bool,
}

/// Deferred "drop this marker onto the map" work item.
///
/// Hosts schedule it after `delay` and hand it back to
/// [`crate::LocationSearchController::reveal_marker`]. A task from a
/// superseded search generation is ignored on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealTask {
    pub key: MarkerKey,
    #[serde(with = "millis")]
    pub delay: Duration,
}

impl RevealTask {
    pub fn new(generation: u64, index: usize, interval: Duration) -> Self {
        let step = u32::try_from(index).unwrap_or(u32::MAX);
        Self {
            key: MarkerKey { generation, index },
            delay: interval.saturating_mul(step),
        }
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

// crates/truckmap-core/src/error.rs
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Non-OK statuses reported by a places directory.
///
/// Mirrors the statuses of the hosted places service. `ZeroResults` is a
/// non-OK status too: an empty nearby search does not replace what is
/// currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlacesStatus {
    #[error("no results")]
    ZeroResults,
    #[error("invalid request")]
    InvalidRequest,
    #[error("over query limit")]
    OverQueryLimit,
    #[error("request denied")]
    RequestDenied,
    #[error("place not found")]
    NotFound,
    #[error("unknown directory error")]
    UnknownError,
}

impl PlacesStatus {
    /// Parses the wire form used by the hosted service (`"ZERO_RESULTS"`, ...).
    ///
    /// Anything unrecognised maps to [`PlacesStatus::UnknownError`].
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "ZERO_RESULTS" => Self::ZeroResults,
            "INVALID_REQUEST" => Self::InvalidRequest,
            "OVER_QUERY_LIMIT" => Self::OverQueryLimit,
            "REQUEST_DENIED" => Self::RequestDenied,
            "NOT_FOUND" => Self::NotFound,
            _ => Self::UnknownError,
        }
    }
}

/// Failure of a one-shot position request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    /// The host has no geolocation capability at all.
    #[error("geolocation is not supported")]
    Unsupported,
    /// The capability exists but the request did not produce a position.
    #[error("position request failed: {0}")]
    Failed(String),
}

#[derive(Debug, Error)]
pub enum TruckMapError {
    #[error("no geometry resolved for the selected place")]
    InputIncomplete,

    #[error("nearby search failed: {0}")]
    SearchFailed(PlacesStatus),

    #[error("geolocation unavailable")]
    GeolocationUnavailable,

    #[error("geolocation failed: {0}")]
    GeolocationFailed(String),

    #[error("details fetch failed: {0}")]
    DetailsFetchFailed(PlacesStatus),

    #[error("no marker for {0}")]
    UnknownMarker(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "fixture")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TruckMapError>;

//! Core types for the geocoding pipeline.

use serde::Serialize;
use std::fmt;

/// A successful geocoding hit: coordinates plus the provider's
/// classification tag (e.g. "museum", "park"). The tag comes from an
/// open metadata bag and is legitimately absent for many results.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub latitude: f64,
    pub longitude: f64,
    pub category: Option<String>,
}

/// Outcome of one resolve attempt, after throttling and retry.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Found(GeocodeResult),
    /// The provider had no match. A normal outcome, not a failure.
    NotFound,
    /// The provider call faulted and retries were exhausted. Downstream
    /// this produces the same row as `NotFound`; the reason only feeds
    /// the diagnostic channel.
    Faulted(String),
}

/// One output row: the echoed query plus resolved (or missing) data.
///
/// Serializes to the CSV column order `location,latitude,longitude,type`,
/// with `None` written as an empty field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceRecord {
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl PlaceRecord {
    /// Row for a query that did not resolve: name echoed, data missing.
    pub fn missing(location: &str) -> Self {
        Self {
            location: location.to_string(),
            latitude: None,
            longitude: None,
            kind: None,
        }
    }

    pub fn from_result(location: &str, result: GeocodeResult) -> Self {
        Self {
            location: location.to_string(),
            latitude: Some(result.latitude),
            longitude: Some(result.longitude),
            kind: result.category,
        }
    }
}

/// Per-call geocoding errors. The batch layer never lets these escape;
/// they exist so the retry policy can tell a fault from a miss.
#[derive(Debug)]
pub enum GeocodeError {
    Network(String),
    InvalidResponse(String),
}

impl fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::InvalidResponse(msg) => write!(f, "Invalid API response: {}", msg),
        }
    }
}

impl std::error::Error for GeocodeError {}

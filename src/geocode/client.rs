//! Nominatim client: one HTTP search call per query, first hit wins.

use super::types::{GeocodeError, GeocodeResult};
use serde::Deserialize;

/// Default client identifier sent with every request. Nominatim's usage
/// policy requires a meaningful User-Agent from anonymous clients.
pub const DEFAULT_USER_AGENT: &str = "h501-student";

const NOMINATIM_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";

/// The injected geocoding capability.
///
/// `Ok(None)` means the provider had no match — a normal outcome.
/// `Err` is a transport or decode fault and is retried upstream.
pub trait Geocoder {
    fn geocode(&self, query: &str) -> Result<Option<GeocodeResult>, GeocodeError>;
}

#[derive(Deserialize, Debug, Clone)]
struct SearchHit {
    // Nominatim sends coordinates as strings in its JSON format.
    lat: String,
    lon: String,
    /// Everything else the provider sends (class, type, importance,
    /// display_name, ...). The classification tag is read out of here.
    #[serde(flatten)]
    raw: serde_json::Map<String, serde_json::Value>,
}

/// Geocoder backed by OpenStreetMap Nominatim. Stateless: performs
/// exactly one network call per invocation, no caching.
pub struct NominatimClient {
    user_agent: String,
    endpoint: String,
}

impl NominatimClient {
    pub fn new() -> Self {
        Self::with_user_agent(DEFAULT_USER_AGENT)
    }

    pub fn with_user_agent(agent: &str) -> Self {
        Self {
            user_agent: agent.to_string(),
            endpoint: NOMINATIM_ENDPOINT.to_string(),
        }
    }

    /// Point the client at a different endpoint (for testing).
    #[cfg(test)]
    fn with_endpoint(agent: &str, endpoint: &str) -> Self {
        Self {
            user_agent: agent.to_string(),
            endpoint: endpoint.to_string(),
        }
    }
}

impl Default for NominatimClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Geocoder for NominatimClient {
    fn geocode(&self, query: &str) -> Result<Option<GeocodeResult>, GeocodeError> {
        let url = format!(
            "{}?q={}&format=json&limit=1",
            self.endpoint,
            urlencode(query),
        );

        let response = ureq::get(&url)
            .set("User-Agent", &self.user_agent)
            .call()
            .map_err(|e| GeocodeError::Network(e.to_string()))?;

        let hits: Vec<SearchHit> = response
            .into_json()
            .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

        let Some(top) = hits.into_iter().next() else {
            return Ok(None);
        };

        hit_to_result(top).map(Some)
    }
}

fn hit_to_result(hit: SearchHit) -> Result<GeocodeResult, GeocodeError> {
    let latitude: f64 = hit
        .lat
        .parse()
        .map_err(|_| GeocodeError::InvalidResponse(format!("bad latitude '{}'", hit.lat)))?;
    let longitude: f64 = hit
        .lon
        .parse()
        .map_err(|_| GeocodeError::InvalidResponse(format!("bad longitude '{}'", hit.lon)))?;

    let category = hit
        .raw
        .get("type")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    Ok(GeocodeResult {
        latitude,
        longitude,
        category,
    })
}

// ─── URL encoding (minimal, no extra dep) ───────────────────────

/// Percent-encode everything outside the unreserved set, byte by byte,
/// so multi-byte UTF-8 sequences survive the round trip.
fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

//! Geoloader — rate-limited batch geocoding backed by OpenStreetMap
//! Nominatim.
//!
//! Pipeline: place names → paced Nominatim lookups with bounded retry →
//! one normalized record per input, order preserved → CSV.

pub mod export;
pub mod geocode;

//! Batch resolution: one record per query, input order preserved.
//!
//! A single bad or ambiguous input never aborts the batch. The worst
//! outcome for any item is a row of missing values plus one diagnostic
//! line on stderr.

use super::client::Geocoder;
use super::throttle::RateLimited;
use super::types::{PlaceRecord, Resolution};

/// Sequential resolver over a throttled geocoder.
pub struct BatchResolver<G> {
    geocoder: RateLimited<G>,
}

impl<G: Geocoder> BatchResolver<G> {
    pub fn new(geocoder: RateLimited<G>) -> Self {
        Self { geocoder }
    }

    /// Wrap a bare geocoder with the default pacing and retry policy.
    pub fn with_defaults(geocoder: G) -> Self {
        Self::new(RateLimited::new(geocoder))
    }

    /// Resolve every query, in order. The output has exactly one record
    /// per input and `records[i].location` echoes `queries[i]` verbatim.
    pub fn resolve_all<S: AsRef<str>>(&mut self, queries: &[S]) -> Vec<PlaceRecord> {
        queries
            .iter()
            .map(|q| self.resolve_one(q.as_ref()))
            .collect()
    }

    pub fn resolve_one(&mut self, query: &str) -> PlaceRecord {
        match self.geocoder.resolve(query) {
            Resolution::Found(result) => PlaceRecord::from_result(query, result),
            Resolution::NotFound => PlaceRecord::missing(query),
            Resolution::Faulted(reason) => {
                eprintln!("Error geocoding {}: {}", query, reason);
                PlaceRecord::missing(query)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocode::types::{GeocodeError, GeocodeResult};
    use std::time::Duration;

    /// Deterministic fake: a fixed table of known places. Queries
    /// containing "boom" fault; anything else unknown is a miss.
    struct TableGeocoder;

    const TABLE: &[(&str, f64, f64, Option<&str>)] = &[
        ("Museum of Modern Art", 40.7618552, -73.9782438, Some("museum")),
        (
            "USS Alabama Battleship Memorial Park",
            30.684373,
            -88.015316,
            Some("park"),
        ),
        ("Alaska", 64.4459613, -149.680909, None),
    ];

    impl Geocoder for TableGeocoder {
        fn geocode(&self, query: &str) -> Result<Option<GeocodeResult>, GeocodeError> {
            if query.contains("boom") {
                return Err(GeocodeError::Network("simulated outage".into()));
            }
            Ok(TABLE.iter().find(|(name, ..)| *name == query).map(
                |(_, lat, lon, cat)| GeocodeResult {
                    latitude: *lat,
                    longitude: *lon,
                    category: cat.map(|c| c.to_string()),
                },
            ))
        }
    }

    fn resolver() -> BatchResolver<TableGeocoder> {
        BatchResolver::new(
            RateLimited::new(TableGeocoder)
                .with_min_delay(Duration::ZERO)
                .with_retry(0, Duration::ZERO),
        )
    }

    #[test]
    fn test_order_and_cardinality() {
        let queries = ["Alaska", "nope", "Museum of Modern Art"];
        let records = resolver().resolve_all(&queries);
        assert_eq!(records.len(), queries.len());
        for (record, query) in records.iter().zip(queries.iter()) {
            assert_eq!(record.location, *query);
        }
    }

    #[test]
    fn test_found_maps_to_full_record() {
        let records = resolver().resolve_all(&["Museum of Modern Art"]);
        assert_eq!(records[0].latitude, Some(40.7618552));
        assert_eq!(records[0].longitude, Some(-73.9782438));
        assert_eq!(records[0].kind.as_deref(), Some("museum"));
    }

    #[test]
    fn test_miss_maps_to_missing_row() {
        let records = resolver().resolve_all(&["asdfqwer1234"]);
        assert_eq!(records[0].location, "asdfqwer1234");
        assert!(records[0].latitude.is_none());
        assert!(records[0].longitude.is_none());
        assert!(records[0].kind.is_none());
    }

    #[test]
    fn test_fault_maps_to_missing_row() {
        // A faulted item and a miss produce identical rows.
        let records = resolver().resolve_all(&["boom town", "asdfqwer1234"]);
        let mut faulted = records[0].clone();
        faulted.location = records[1].location.clone();
        assert_eq!(faulted, records[1]);
    }

    #[test]
    fn test_partial_failure_isolation() {
        // Valid entries resolve identically with and without garbage
        // and faulting entries interleaved.
        let clean = ["Museum of Modern Art", "Alaska"];
        let mixed = [
            "boom 1",
            "Museum of Modern Art",
            "iuyt8765(*&)",
            "Alaska",
            "boom 2",
        ];

        let clean_records = resolver().resolve_all(&clean);
        let mixed_records = resolver().resolve_all(&mixed);

        assert_eq!(mixed_records.len(), mixed.len());
        assert_eq!(clean_records[0], mixed_records[1]);
        assert_eq!(clean_records[1], mixed_records[3]);
    }

    #[test]
    fn test_idempotent_for_same_query() {
        let mut r = resolver();
        let first = r.resolve_all(&["Alaska"]);
        let second = r.resolve_all(&["Alaska"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_batch() {
        let records = resolver().resolve_all::<&str>(&[]);
        assert!(records.is_empty());
    }
}

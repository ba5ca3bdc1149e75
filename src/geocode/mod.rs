//! Geocoding pipeline: provider client, throttling/retry policy, and
//! sequential batch resolution.

pub mod batch;
pub mod client;
pub mod throttle;
pub mod types;

pub use batch::BatchResolver;
pub use client::{Geocoder, NominatimClient, DEFAULT_USER_AGENT};
pub use throttle::RateLimited;
pub use types::{GeocodeError, GeocodeResult, PlaceRecord, Resolution};

//! Rate limiting and bounded retry around a geocoder.
//!
//! Nominatim's usage policy caps anonymous clients at one request per
//! second, so consecutive call starts are spaced by a minimum delay.
//! A faulted call is retried a fixed number of times with a fixed wait
//! between attempts; exhausted retries are swallowed into `Faulted`,
//! never propagated as an error.

use super::client::Geocoder;
use super::types::Resolution;
use std::time::{Duration, Instant};

pub const DEFAULT_MIN_DELAY: Duration = Duration::from_secs(1);
pub const DEFAULT_RETRY_WAIT: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// A throttled, retrying wrapper over any [`Geocoder`].
pub struct RateLimited<G> {
    inner: G,
    min_delay: Duration,
    retry_wait: Duration,
    max_retries: u32,
    last_call: Option<Instant>,
}

impl<G: Geocoder> RateLimited<G> {
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            min_delay: DEFAULT_MIN_DELAY,
            retry_wait: DEFAULT_RETRY_WAIT,
            max_retries: DEFAULT_MAX_RETRIES,
            last_call: None,
        }
    }

    /// A degenerate wrapper: no pacing, no retries. Faults still surface
    /// as `Faulted` rather than escaping.
    pub fn unthrottled(inner: G) -> Self {
        Self::new(inner)
            .with_min_delay(Duration::ZERO)
            .with_retry(0, Duration::ZERO)
    }

    pub fn with_min_delay(mut self, min_delay: Duration) -> Self {
        self.min_delay = min_delay;
        self
    }

    pub fn with_retry(mut self, max_retries: u32, retry_wait: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_wait = retry_wait;
        self
    }

    /// Resolve one query through the policy. Never returns an error:
    /// a miss is `NotFound`, an exhausted fault is `Faulted`.
    pub fn resolve(&mut self, query: &str) -> Resolution {
        let mut last_error = String::new();

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                std::thread::sleep(self.retry_wait);
            }
            self.pace();

            match self.inner.geocode(query) {
                Ok(Some(result)) => return Resolution::Found(result),
                Ok(None) => return Resolution::NotFound,
                Err(e) => last_error = e.to_string(),
            }
        }

        Resolution::Faulted(last_error)
    }

    /// Sleep until at least `min_delay` has passed since the previous
    /// call started, then stamp the cursor for this one.
    fn pace(&mut self) {
        if let Some(last) = self.last_call {
            let elapsed = last.elapsed();
            if elapsed < self.min_delay {
                std::thread::sleep(self.min_delay - elapsed);
            }
        }
        self.last_call = Some(Instant::now());
    }
}

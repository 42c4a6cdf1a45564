//! Cooperative request throttle.
//!
//! [`RateLimiter`] caps the number of requests in flight and enforces a fixed
//! gap between the end of one request and the start of the next. It is not a
//! token bucket: there is no burst allowance, and the gap is measured from
//! the response rather than from the previous start.
//!
//! ```text
//!   acquire ──► request ──► response ──► release
//!                                           │
//!                                           └─ next acquire may start at
//!                                              release + request_interval
//! ```
//!
//! Timing uses `tokio::time`, so tests can pause the runtime clock and step
//! through the gaps without real waiting.

use crate::config::ThrottleConfig;
use crate::error::IngestionError;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::time::{sleep_until, Instant};

/// Concurrency cap plus a minimum post-response interval.
///
/// Cloning is cheap and clones share the same slots and schedule.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    slots: Arc<Semaphore>,
    max_concurrent: usize,
    interval: Duration,

    /// Earliest instant the next request may start.
    next_start: Arc<Mutex<Option<Instant>>>,
}

impl RateLimiter {
    /// Create a limiter. A `max_concurrent` of zero is treated as one.
    pub fn new(max_concurrent: usize, interval: Duration) -> Self {
        let max_concurrent = max_concurrent.max(1);
        Self {
            slots: Arc::new(Semaphore::new(max_concurrent)),
            max_concurrent,
            interval,
            next_start: Arc::new(Mutex::new(None)),
        }
    }

    /// Build a limiter from config, or `None` when throttling is disabled.
    pub fn from_config(config: &ThrottleConfig) -> Option<Self> {
        config
            .enabled
            .then(|| Self::new(config.max_concurrent_requests, config.request_interval))
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Slots not currently held by a permit.
    pub fn available_slots(&self) -> usize {
        self.slots.available_permits()
    }

    /// Wait for a free slot, then for the post-response interval to elapse.
    pub async fn acquire(&self) -> Result<RatePermit, IngestionError> {
        let slot = Arc::clone(&self.slots)
            .acquire_owned()
            .await
            .map_err(|_| IngestionError::Config("rate limiter closed".into()))?;

        let next_start = self.next_start.lock().ok().and_then(|guard| *guard);
        if let Some(at) = next_start {
            let now = Instant::now();
            if at > now {
                tracing::debug!("Throttling: waiting {:?} before next request", at - now);
                sleep_until(at).await;
            }
        }

        Ok(RatePermit {
            _slot: slot,
            next_start: Arc::clone(&self.next_start),
            interval: self.interval,
        })
    }
}

/// A held request slot. Releasing it (explicitly or by drop) starts the
/// post-response interval.
#[derive(Debug)]
pub struct RatePermit {
    _slot: OwnedSemaphorePermit,
    next_start: Arc<Mutex<Option<Instant>>>,
    interval: Duration,
}

impl RatePermit {
    /// Mark the request finished.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for RatePermit {
    fn drop(&mut self) {
        // Runs before `_slot` is dropped, so the next holder sees the new
        // schedule as soon as it gets the slot.
        if let Ok(mut guard) = self.next_start.lock() {
            *guard = Some(Instant::now() + self.interval);
        }
    }
}

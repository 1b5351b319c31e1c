//! Global admission gate.
//!
//! A single token bucket shared by every request. The bucket holds `burst`
//! tokens and regains one every `60s / requests_per_minute`. A request that
//! finds no token is refused immediately; nothing waits or queues.
//!
//! Time is tracked as the instant at which the bucket will be full again
//! rather than as a fractional token count, so refill never drifts.

use gateway_core::GatewayError;
use parking_lot::Mutex;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

const WINDOW: Duration = Duration::from_secs(60);

/// Admission gate configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdmissionConfig {
    /// Sustained rate; `None` or zero disables the gate
    pub requests_per_minute: Option<u32>,
    /// Bucket capacity; defaults to `requests_per_minute`
    pub burst: Option<u32>,
}

/// Token bucket state
#[derive(Debug)]
struct TokenBucket {
    /// Time between two refilled tokens
    interval: Duration,
    /// How far the full-at instant may run ahead of now
    tolerance: Duration,
    /// Instant at which the bucket is full again
    full_at: Instant,
}

impl TokenBucket {
    fn new(requests_per_minute: u32, burst: u32) -> Self {
        let interval = WINDOW / requests_per_minute;
        Self {
            interval,
            tolerance: interval * burst.saturating_sub(1),
            full_at: Instant::now(),
        }
    }

    fn try_take(&mut self, now: Instant) -> bool {
        let start = self.full_at.max(now);
        if start - now > self.tolerance {
            return false;
        }
        self.full_at = start + self.interval;
        true
    }

    fn retry_after(&self, now: Instant) -> Duration {
        self.full_at
            .saturating_duration_since(now)
            .saturating_sub(self.tolerance)
    }
}

/// Process-wide request admission control
#[derive(Debug)]
pub struct AdmissionGate {
    bucket: Option<Mutex<TokenBucket>>,
}

impl AdmissionGate {
    /// Create a gate. A missing or zero rate yields an unlimited gate.
    #[must_use]
    pub fn new(config: AdmissionConfig) -> Self {
        match config.requests_per_minute {
            Some(rpm) if rpm > 0 => {
                let burst = config.burst.filter(|b| *b > 0).unwrap_or(rpm);
                info!(
                    requests_per_minute = rpm,
                    burst = burst,
                    "Admission gate enabled"
                );
                Self {
                    bucket: Some(Mutex::new(TokenBucket::new(rpm, burst))),
                }
            }
            _ => Self::unlimited(),
        }
    }

    /// Gate that admits everything without touching the clock
    #[must_use]
    pub fn unlimited() -> Self {
        Self { bucket: None }
    }

    /// Whether the gate enforces a rate
    #[must_use]
    pub fn is_limited(&self) -> bool {
        self.bucket.is_some()
    }

    /// Take a token if one is available
    #[must_use]
    pub fn try_admit(&self) -> bool {
        match &self.bucket {
            None => true,
            Some(bucket) => bucket.lock().try_take(Instant::now()),
        }
    }

    /// Take a token or fail with `RateLimited`
    ///
    /// # Errors
    /// Returns `GatewayError::RateLimited` when the bucket is empty
    pub fn check(&self) -> Result<(), GatewayError> {
        if self.try_admit() {
            Ok(())
        } else {
            debug!(
                retry_after_ms = self.retry_after().as_millis() as u64,
                "Request refused by admission gate"
            );
            Err(GatewayError::RateLimited)
        }
    }

    /// Time until the next token, zero when one is available now
    #[must_use]
    pub fn retry_after(&self) -> Duration {
        match &self.bucket {
            None => Duration::ZERO,
            Some(bucket) => bucket.lock().retry_after(Instant::now()),
        }
    }
}

impl Default for AdmissionGate {
    fn default() -> Self {
        Self::unlimited()
    }
}

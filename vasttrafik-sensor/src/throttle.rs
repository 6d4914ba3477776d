//! Update throttling.
//!
//! Sensors are polled by the runner far more often than the API should be
//! queried. A [`Throttle`] lets at most one real fetch through per interval;
//! calls in between are no-ops and the sensor keeps showing its previous
//! observation, so a displayed value can be up to one interval old.
//!
//! Time comes from `tokio::time::Instant`, which tests can pause and advance.

use std::time::Duration;

use tokio::time::Instant;

/// Minimum time between two real fetches of the same sensor.
pub const MIN_TIME_BETWEEN_UPDATES: Duration = Duration::from_secs(120);

/// Lets one call through per interval.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last_run: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_run: None,
        }
    }

    /// Returns true, and starts a new interval, if the previous run is at
    /// least one interval old. The first call always succeeds.
    pub fn try_acquire(&mut self) -> bool {
        let now = Instant::now();
        match self.last_run {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last_run = Some(now);
                true
            }
        }
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(MIN_TIME_BETWEEN_UPDATES)
    }
}

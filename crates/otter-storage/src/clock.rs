//! Time sources for envelope timestamps and TTL checks

use chrono::{Local, TimeZone, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

/// Format of the informational `date` field, modelled on `Date.prototype.toString`.
const DATE_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

/// Source of the current time.
pub trait Clock {
    /// Unix time in milliseconds.
    fn now_millis(&self) -> i64;

    /// Human-readable rendering of the current time.
    fn date_string(&self) -> String;
}

/// Wall clock in the host's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn date_string(&self) -> String {
        Local::now().format(DATE_FORMAT).to_string()
    }
}

/// Manually driven clock.
///
/// Clones share the same instant, so a test can hand one copy to the store
/// and keep another to move time forward.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    millis: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new(millis: i64) -> Self {
        Self {
            millis: Arc::new(AtomicI64::new(millis)),
        }
    }

    /// Start at the current wall-clock time.
    pub fn starting_now() -> Self {
        Self::new(SystemClock.now_millis())
    }

    pub fn set_millis(&self, millis: i64) {
        self.millis.store(millis, Ordering::SeqCst);
    }

    pub fn advance(&self, by: Duration) {
        let delta = i64::try_from(by.as_millis()).unwrap_or(i64::MAX);
        self.millis.fetch_add(delta, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }

    fn date_string(&self) -> String {
        Utc.timestamp_millis_opt(self.now_millis())
            .single()
            .map(|at| at.format(DATE_FORMAT).to_string())
            .unwrap_or_default()
    }
}

//! Time-to-live durations for expiring reads

use std::str::FromStr;
use std::time::Duration;

use crate::error::{StorageError, StorageResult};

const SECONDS_PER_MINUTE: f64 = 60.0;
const SECONDS_PER_HOUR: f64 = 60.0 * 60.0;
const SECONDS_PER_DAY: f64 = 60.0 * 60.0 * 24.0;

/// How long an entry stays fresh after it was written.
///
/// Text form is a number followed by an optional unit, e.g. `"30"`, `"30s"`,
/// `"10m"`, `"1.5h"`, `"7d"`, `"2 hours"`. No unit means seconds. Units are
/// matched as whole words; anything unrecognised is rejected.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimeLife {
    seconds: f64,
}

impl TimeLife {
    pub fn from_secs(seconds: u64) -> Self {
        Self {
            seconds: seconds as f64,
        }
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.seconds
    }

    /// Threshold in milliseconds an entry's age is compared against.
    pub fn threshold_millis(&self) -> f64 {
        self.seconds * 1000.0
    }

    /// True when `age_millis` is strictly past the threshold.
    pub fn is_expired(&self, age_millis: f64) -> bool {
        age_millis > self.threshold_millis()
    }
}

impl From<Duration> for TimeLife {
    fn from(duration: Duration) -> Self {
        Self {
            seconds: duration.as_secs_f64(),
        }
    }
}

/// Seconds per unit, for the unit words accepted in text form.
fn unit_scale(unit: &str) -> Option<f64> {
    match unit {
        "" | "s" | "sec" | "secs" | "second" | "seconds" => Some(1.0),
        "m" | "min" | "mins" | "minute" | "minutes" => Some(SECONDS_PER_MINUTE),
        "h" | "hr" | "hrs" | "hour" | "hours" => Some(SECONDS_PER_HOUR),
        "d" | "day" | "days" => Some(SECONDS_PER_DAY),
        _ => None,
    }
}

impl FromStr for TimeLife {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let split = text
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(text.len());
        let (number, unit) = text.split_at(split);

        let quantity: f64 = number
            .parse()
            .map_err(|_| StorageError::InvalidTtl(s.to_string()))?;
        if !quantity.is_finite() {
            return Err(StorageError::InvalidTtl(s.to_string()));
        }

        let scale =
            unit_scale(unit.trim()).ok_or_else(|| StorageError::InvalidTtl(s.to_string()))?;

        Ok(Self {
            seconds: quantity * scale,
        })
    }
}

/// Conversion into a [`TimeLife`] at the `get_with_ttl` boundary.
pub trait IntoTimeLife {
    fn into_time_life(self) -> StorageResult<TimeLife>;
}

impl IntoTimeLife for TimeLife {
    fn into_time_life(self) -> StorageResult<TimeLife> {
        Ok(self)
    }
}

impl IntoTimeLife for &str {
    fn into_time_life(self) -> StorageResult<TimeLife> {
        self.parse()
    }
}

impl IntoTimeLife for &String {
    fn into_time_life(self) -> StorageResult<TimeLife> {
        self.parse()
    }
}

impl IntoTimeLife for String {
    fn into_time_life(self) -> StorageResult<TimeLife> {
        self.parse()
    }
}

impl IntoTimeLife for u64 {
    fn into_time_life(self) -> StorageResult<TimeLife> {
        Ok(TimeLife::from_secs(self))
    }
}

impl IntoTimeLife for Duration {
    fn into_time_life(self) -> StorageResult<TimeLife> {
        Ok(TimeLife::from(self))
    }
}

//! Countdown arithmetic.
//!
//! Remaining time is recomputed from the fixed target on every tick, never
//! decremented, so a late or skipped tick cannot drift the display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const TICK_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Remaining {
    pub fn is_zero(&self) -> bool {
        *self == Remaining::default()
    }

    /// `(value, label)` pairs in display order, values zero-padded to two digits
    pub fn boxes(&self) -> [(String, &'static str); 4] {
        [
            (format!("{:02}", self.days), "Days"),
            (format!("{:02}", self.hours), "Hrs"),
            (format!("{:02}", self.minutes), "Min"),
            (format!("{:02}", self.seconds), "Sec"),
        ]
    }
}

/// Time left until `target`; zero at or after it. A missing target is "now".
pub fn remaining(target: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Remaining {
    let target = target.unwrap_or(now);
    let total = (target - now).num_seconds();
    if total <= 0 {
        return Remaining::default();
    }

    Remaining {
        days: total / 86_400,
        hours: (total / 3_600) % 24,
        minutes: (total / 60) % 60,
        seconds: total % 60,
    }
}

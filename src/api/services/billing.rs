//! Parking charge computation.
//!
//! Charges are `duration_hours × hourly rate`. With the default increment of 0
//! the raw fractional duration is billed; a positive increment rounds the
//! duration up to the next multiple of that many minutes first.

use chrono::{DateTime, Utc};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;
const MILLIS_PER_MINUTE: i64 = 60_000;

fn elapsed_millis(entry: DateTime<Utc>, exit: DateTime<Utc>) -> i64 {
    (exit - entry).num_milliseconds().max(0)
}

/// Hours between entry and exit, clamped at zero.
pub fn duration_hours(entry: DateTime<Utc>, exit: DateTime<Utc>) -> f64 {
    elapsed_millis(entry, exit) as f64 / MILLIS_PER_HOUR
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BillingPolicy {
    /// Billing unit in minutes; 0 bills the exact duration.
    pub increment_minutes: u32,
}

impl BillingPolicy {
    pub fn new(increment_minutes: u32) -> Self {
        Self { increment_minutes }
    }

    /// Duration in hours after applying the billing increment.
    ///
    /// Rounding happens on whole milliseconds so exact multiples of the
    /// increment are never bumped to the next one.
    pub fn billable_hours(&self, entry: DateTime<Utc>, exit: DateTime<Utc>) -> f64 {
        let millis = elapsed_millis(entry, exit);
        if self.increment_minutes == 0 {
            return millis as f64 / MILLIS_PER_HOUR;
        }
        let unit_ms = i64::from(self.increment_minutes) * MILLIS_PER_MINUTE;
        let unit_ms = unit_ms as u64;
        ((millis as u64).div_ceil(unit_ms) * unit_ms) as f64 / MILLIS_PER_HOUR
    }

    pub fn charge(&self, entry: DateTime<Utc>, exit: DateTime<Utc>, fee_per_hour: f64) -> f64 {
        self.billable_hours(entry, exit) * fee_per_hour
    }
}

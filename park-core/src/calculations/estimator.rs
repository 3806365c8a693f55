//! Live price estimate for the booking form.
//!
//! The estimator maps a start time, an end time and an hourly rate to a
//! provisional cost and a short duration label. It runs on every change of
//! either time field, so half-typed input is normal and simply produces no
//! estimate.
//!
//! # Rounding
//!
//! The cost is computed in [`Decimal`] from whole milliseconds and rounded
//! once, to two places, half-up (see [`round_half_up`]). A cost too large
//! for a [`Decimal`] yields no estimate.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use park_core::calculations::estimate;
//! use park_core::Rate;
//!
//! let est = estimate("2024-01-01T10:00", "2024-01-01T12:30", Rate::new(dec!(20))).unwrap();
//!
//! assert_eq!(est.hours, 2.5);
//! assert_eq!(est.cost, dec!(50.00));
//! assert_eq!(est.duration_label, "2h 30m");
//!
//! assert!(estimate("2024-01-01T12:00", "2024-01-01T10:00", Rate::new(dec!(20))).is_none());
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::common::round_half_up;
use crate::calculations::duration::duration_label;
use crate::models::{Rate, TimeRange};

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Provisional cost and duration for a booking window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// Cost rounded to two decimal places.
    pub cost: Decimal,

    /// Elapsed time in hours, fractional.
    pub hours: f64,

    /// Short label such as `"2h 30m"` or `"45m"`.
    pub duration_label: String,
}

/// Estimates the cost of parking from `start_raw` to `end_raw` at `rate`.
///
/// Returns `None` when either value is empty or unparseable, when the end
/// is not after the start, or when the cost overflows.
pub fn estimate(
    start_raw: &str,
    end_raw: &str,
    rate: Rate,
) -> Option<Estimate> {
    let Some(range) = TimeRange::parse(start_raw, end_raw) else {
        debug!(start = start_raw, end = end_raw, "no estimate for incomplete or invalid range");
        return None;
    };
    estimate_range(&range, rate)
}

/// Estimates an already validated range; `None` only when the cost overflows.
pub fn estimate_range(
    range: &TimeRange,
    rate: Rate,
) -> Option<Estimate> {
    let Some(cost) = cost_for_millis(range.millis(), rate) else {
        warn!(millis = range.millis(), rate = %rate, "estimated cost out of range");
        return None;
    };
    let estimate = Estimate {
        cost,
        hours: range.hours(),
        duration_label: duration_label(range.duration()),
    };
    debug!(
        hours = estimate.hours,
        cost = %estimate.cost,
        rate = %rate,
        "estimated booking"
    );
    Some(estimate)
}

fn cost_for_millis(
    millis: i64,
    rate: Rate,
) -> Option<Decimal> {
    let hours = Decimal::from(millis).checked_div(Decimal::from(MILLIS_PER_HOUR))?;
    hours.checked_mul(rate.per_hour()).map(round_half_up)
}

//! Pricing and display calculations for the booking pages.
//!
//! Everything here is pure: callers read raw input, call into these
//! functions, and write the returned values to whatever view they own.

pub mod common;
pub mod counter;
pub mod duration;
pub mod estimator;
pub mod recommend;

pub use common::{PLACEHOLDER, format_currency, round_half_up};
pub use counter::{COUNTER_STEPS, COUNTER_TICK, CountUp, parse_counter_target};
pub use duration::duration_label;
pub use estimator::{Estimate, estimate, estimate_range};
pub use recommend::{predict_free_minutes, recommend_best_slot, scored_slots, slot_score};

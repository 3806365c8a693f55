//! Slot scoring and best-slot recommendation.
//!
//! A slot scores points for its zone, for being free, and for being likely
//! to free up soon. "Soon" is predicted from how long the slot has been
//! occupied against an average stay of [`AVG_PARKING_MINUTES`].
//!
//! Every function takes the current instant as a parameter, so results are
//! reproducible.

use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use crate::models::ParkingSlot;

/// Points per zone; unknown zones score nothing.
pub const ZONE_SCORES: &[(&str, u32)] = &[("A", 100), ("B", 70), ("C", 40)];

/// Typical length of a parking session, in minutes.
pub const AVG_PARKING_MINUTES: i64 = 60;

/// Bonus for a slot that is free right now.
pub const FREE_BONUS: u32 = 50;

/// Bonus for an occupied slot predicted to free up within
/// [`SOON_FREE_WITHIN_MINUTES`].
pub const SOON_FREE_BONUS: u32 = 30;

pub const SOON_FREE_WITHIN_MINUTES: i64 = 15;

pub fn zone_score(zone: &str) -> u32 {
    ZONE_SCORES
        .iter()
        .find(|(name, _)| *name == zone)
        .map_or(0, |(_, score)| *score)
}

/// Whole minutes until `slot` is expected to be free.
///
/// Free slots, and occupied slots with no recorded start, are `0`. A stay
/// longer than the average is also `0`.
pub fn predict_free_minutes(
    slot: &ParkingSlot,
    now: DateTime<Utc>,
) -> i64 {
    let Some(since) = slot.last_occupied_time.filter(|_| slot.is_occupied) else {
        return 0;
    };
    let elapsed = now - since;
    let remaining = (TimeDelta::minutes(AVG_PARKING_MINUTES) - elapsed).max(TimeDelta::zero());
    remaining.num_minutes()
}

pub fn slot_score(
    slot: &ParkingSlot,
    now: DateTime<Utc>,
) -> u32 {
    let mut score = zone_score(&slot.zone);
    if !slot.is_occupied {
        score += FREE_BONUS;
    } else if predict_free_minutes(slot, now) < SOON_FREE_WITHIN_MINUTES {
        score += SOON_FREE_BONUS;
    }
    score
}

/// Every slot paired with its score, in input order.
pub fn scored_slots(
    slots: &[ParkingSlot],
    now: DateTime<Utc>,
) -> Vec<(&ParkingSlot, u32)> {
    slots.iter().map(|s| (s, slot_score(s, now))).collect()
}

/// Highest scoring slot; the earliest one wins a tie. `None` for no slots.
pub fn recommend_best_slot(
    slots: &[ParkingSlot],
    now: DateTime<Utc>,
) -> Option<&ParkingSlot> {
    let (best, score) = scored_slots(slots, now)
        .into_iter()
        .reduce(|best, next| if next.1 > best.1 { next } else { best })?;
    debug!(slot = %best.slot_number, score, "recommended slot");
    Some(best)
}

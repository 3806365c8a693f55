use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingSlot {
    pub id: i64,
    pub slot_number: String,
    pub zone: String,
    pub is_occupied: bool,
    pub last_occupied_time: Option<DateTime<Utc>>,
}

/// Occupancy figures shown on the dashboard stat counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSummary {
    pub total: usize,
    pub occupied: usize,
    pub available: usize,
}

impl SlotSummary {
    pub fn from_slots(slots: &[ParkingSlot]) -> Self {
        let total = slots.len();
        let occupied = slots.iter().filter(|s| s.is_occupied).count();
        Self {
            total,
            occupied,
            available: total - occupied,
        }
    }
}

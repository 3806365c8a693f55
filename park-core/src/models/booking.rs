use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a booking as used in the checkout route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub i64);

impl fmt::Display for BookingId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for BookingId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A parking session. A booking without an `end_time` is still active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub slot_id: i64,
    pub user_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

impl Booking {
    pub fn is_active(&self) -> bool {
        self.end_time.is_none()
    }
}

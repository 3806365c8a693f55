//! CSV loaders for parking slots and booking history.

mod bookings;
mod slots;

pub use bookings::{BookingLoader, BookingLoaderError, DEFAULT_HISTORY_LIMIT, recent_bookings};
pub use slots::{SlotLoader, SlotLoaderError};

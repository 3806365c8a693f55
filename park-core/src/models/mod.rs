mod booking;
mod checkout_response;
mod parking_slot;
mod rate;
mod time_range;

pub use booking::{Booking, BookingId};
pub use checkout_response::{CheckoutResponse, SUCCESS_STATUS};
pub use parking_slot::{ParkingSlot, SlotSummary};
pub use rate::Rate;
pub use time_range::{TimeRange, parse_instant};

pub mod calculations;
pub mod checkout;
pub mod models;
pub mod notify;

pub use calculations::{Estimate, estimate, estimate_range};
pub use checkout::{CheckoutError, CheckoutGateway};
pub use models::*;
pub use notify::{Notification, NotificationKind};

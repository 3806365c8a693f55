use std::time::Duration;

use rust_decimal::Decimal;
use tracing::{error, info, warn};

use super::gateway::CheckoutError;
use crate::calculations::format_currency;
use crate::models::CheckoutResponse;
use crate::notify::Notification;

/// Question put to the user before a booking is ended.
pub const CHECKOUT_CONFIRM_PROMPT: &str = "Check out now and end this parking session?";

/// Delay between a successful checkout and the view refresh.
pub const REFRESH_DELAY: Duration = Duration::from_millis(1800);

const REJECTED_MESSAGE: &str = "❌ Could not check out. Try again.";
const NETWORK_MESSAGE: &str = "❌ Network error.";
const IN_FLIGHT_MESSAGE: &str = "Checkout already in progress.";

/// What happened to one checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The server closed the booking.
    Completed { total_cost: Option<Decimal> },

    /// The server answered with a status other than `"success"`.
    Rejected { status: String },

    /// No usable answer was received.
    Failed(CheckoutError),

    /// The same booking is already being checked out; nothing was sent.
    AlreadyInFlight,
}

impl CheckoutOutcome {
    pub fn from_result(result: Result<CheckoutResponse, CheckoutError>) -> Self {
        match result {
            Ok(response) if response.is_success() => {
                info!(total_cost = ?response.total_cost, "checkout completed");
                Self::Completed {
                    total_cost: response.total_cost,
                }
            }
            Ok(response) => {
                warn!(status = %response.status, "checkout rejected");
                Self::Rejected {
                    status: response.status,
                }
            }
            Err(e) => {
                error!(error = %e, "checkout failed");
                Self::Failed(e)
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// The toast to show for this outcome.
    pub fn notification(
        &self,
        currency_symbol: &str,
    ) -> Notification {
        match self {
            Self::Completed {
                total_cost: Some(cost),
            } => Notification::success(format!(
                "✅ Checked out! Total: {}",
                format_currency(currency_symbol, *cost)
            )),
            Self::Completed { total_cost: None } => Notification::success("✅ Checked out!"),
            Self::Rejected { .. } => Notification::error(REJECTED_MESSAGE),
            Self::Failed(_) => Notification::error(NETWORK_MESSAGE),
            Self::AlreadyInFlight => Notification::info(IN_FLIGHT_MESSAGE),
        }
    }

    /// When the view should reload; only after a completed checkout.
    pub fn refresh_after(&self) -> Option<Duration> {
        self.is_success().then_some(REFRESH_DELAY)
    }
}

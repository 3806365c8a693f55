use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Status value the checkout endpoint returns when a booking was closed.
pub const SUCCESS_STATUS: &str = "success";

/// JSON body returned by `POST /end-booking/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<Decimal>,
}

impl CheckoutResponse {
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}

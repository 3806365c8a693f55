use async_trait::async_trait;
use thiserror::Error;

use crate::models::{BookingId, CheckoutResponse};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Access to the server-side "end booking" action.
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    /// Closes `booking_id` and returns the server's answer, whatever its
    /// status. Only failures to get an answer at all are errors.
    async fn end_booking(
        &self,
        booking_id: BookingId,
    ) -> Result<CheckoutResponse, CheckoutError>;
}

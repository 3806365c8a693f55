use std::time::Duration;

use async_trait::async_trait;
use park_core::{BookingId, CheckoutError, CheckoutGateway, CheckoutResponse};
use reqwest::{Client, Url};
use tracing::debug;

/// Checkout gateway that talks to the booking server over HTTP.
///
/// The body is decoded whatever the HTTP status is, so a `500` carrying
/// `{"status": "error"}` is an answer, not a failure.
pub struct HttpCheckoutGateway {
    client: Client,
    base_url: String,
}

impl HttpCheckoutGateway {
    pub fn new(
        base_url: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, CheckoutError> {
        let trimmed = base_url.trim();
        if trimmed.is_empty() {
            return Err(CheckoutError::Configuration(
                "checkout base URL is empty".to_string(),
            ));
        }
        let url = Url::parse(trimmed).map_err(|e| {
            CheckoutError::Configuration(format!("invalid checkout base URL '{trimmed}': {e}"))
        })?;
        if url.cannot_be_a_base() {
            return Err(CheckoutError::Configuration(format!(
                "checkout base URL '{trimmed}' cannot hold a path"
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CheckoutError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            base_url: url.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Absolute URL of the checkout route for `booking_id`.
    pub fn endpoint(
        &self,
        booking_id: BookingId,
    ) -> String {
        format!("{}/end-booking/{}", self.base_url, booking_id)
    }
}

#[async_trait]
impl CheckoutGateway for HttpCheckoutGateway {
    async fn end_booking(
        &self,
        booking_id: BookingId,
    ) -> Result<CheckoutResponse, CheckoutError> {
        let url = self.endpoint(booking_id);
        debug!(%url, "sending checkout request");

        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| CheckoutError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| CheckoutError::Transport(e.to_string()))?;
        debug!(%url, %status, bytes = body.len(), "checkout response received");

        serde_json::from_slice(&body).map_err(|e| CheckoutError::Decode(e.to_string()))
    }
}

use async_trait::async_trait;

use park_core::checkout::{GatewayConfig, GatewayFactory};
use park_core::{CheckoutError, CheckoutGateway};

use crate::gateway::HttpCheckoutGateway;

/// [`GatewayFactory`] for the HTTP checkout endpoint.
///
/// Register this with a [`park_core::checkout::GatewayRegistry`] to make the
/// `"http"` backend available:
///
/// ```rust,no_run
/// use park_core::checkout::GatewayRegistry;
/// use park_http::HttpGatewayFactory;
///
/// let mut registry = GatewayRegistry::new();
/// registry.register(Box::new(HttpGatewayFactory));
/// ```
pub struct HttpGatewayFactory;

#[async_trait]
impl GatewayFactory for HttpGatewayFactory {
    fn backend_name(&self) -> &'static str {
        "http"
    }

    /// Build a gateway rooted at `config.base_url`, applying
    /// `config.timeout` to every request when set.
    async fn create(
        &self,
        config: &GatewayConfig,
    ) -> Result<Box<dyn CheckoutGateway>, CheckoutError> {
        let gateway = HttpCheckoutGateway::new(&config.base_url, config.timeout)?;
        Ok(Box::new(gateway))
    }
}

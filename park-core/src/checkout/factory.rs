use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use super::gateway::{CheckoutError, CheckoutGateway};

/// Backend-agnostic checkout configuration.
///
/// `backend` must match the [`GatewayFactory::backend_name`] of a
/// registered factory.  `base_url` is passed through to that factory
/// unchanged.
///
/// | backend | base_url examples                |
/// |---------|----------------------------------|
/// | `http`  | `http://127.0.0.1:8000`          |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Lowercase identifier matching a registered factory (e.g. `"http"`).
    pub backend: String,
    /// Root the checkout route is resolved against.
    pub base_url: String,
    /// Optional per-request timeout; `None` waits as long as the transport does.
    pub timeout: Option<Duration>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            backend: "http".to_string(),
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout: None,
        }
    }
}

/// One implementation per checkout backend, registered with a
/// [`GatewayRegistry`] at startup.
#[async_trait]
pub trait GatewayFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    /// Build a ready-to-use gateway.
    async fn create(
        &self,
        config: &GatewayConfig,
    ) -> Result<Box<dyn CheckoutGateway>, CheckoutError>;
}

/// Registry of [`GatewayFactory`] instances, keyed by backend name.
pub struct GatewayRegistry {
    factories: HashMap<&'static str, Box<dyn GatewayFactory>>,
}

impl GatewayRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a backend factory.
    ///
    /// If a factory with the same [`GatewayFactory::backend_name`] is
    /// already present it is silently replaced.
    pub fn register(
        &mut self,
        factory: Box<dyn GatewayFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch to the factory that matches `config.backend`.
    ///
    /// # Errors
    /// * [`CheckoutError::Configuration`] — no factory is registered for
    ///   the requested backend name.
    /// * Any error the chosen factory itself returns.
    pub async fn create(
        &self,
        config: &GatewayConfig,
    ) -> Result<Box<dyn CheckoutGateway>, CheckoutError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                CheckoutError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config).await
    }
}

impl Default for GatewayRegistry {
    fn default() -> Self {
        Self::new()
    }
}

//! Application state.

use hubgate_core::Verifier;

use crate::config::{ConfigError, ServiceConfig};

/// Application state shared across handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Verifier guarding the webhook route.
    pub verifier: Verifier,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Fails when no webhook secret is configured: the service never accepts
    /// unverified deliveries.
    pub fn new(config: ServiceConfig) -> Result<Self, ConfigError> {
        let verifier = config.verifier()?;

        tracing::info!(
            scheme = %verifier.scheme(),
            header = verifier.scheme().header_name(),
            "Webhook signature verification enabled"
        );

        Ok(Self { verifier, config })
    }
}

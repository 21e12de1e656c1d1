use std::sync::Arc;

use crate::config::{ServiceConfig, GATEWAY_TIMEOUT};
use crate::error::ConfigError;
use crate::gateway::GatewayClient;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    /// Charge processor client (None = mock mode)
    pub gateway: Option<GatewayClient>,
}

impl AppState {
    pub fn new(config: ServiceConfig) -> Result<Self, ConfigError> {
        let gateway = match config.gateway_url {
            Some(ref url) => Some(GatewayClient::new(
                url.as_str(),
                config.gateway_secret_key.as_str(),
                GATEWAY_TIMEOUT,
            )?),
            None => None,
        };

        Ok(Self {
            config: Arc::new(config),
            gateway,
        })
    }
}

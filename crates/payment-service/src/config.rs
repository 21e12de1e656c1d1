use std::env;
use std::time::Duration;
use url::Url;

const DEFAULT_PORT: u16 = 8080;

/// Placeholder credential used when no secret key is configured.
pub const TEST_SECRET_KEY: &str = "sk_test_mock";

/// Total budget for one outbound charge call, connect through full body.
pub const GATEWAY_TIMEOUT: Duration = Duration::from_secs(35);

#[derive(Clone)]
pub struct ServiceConfig {
    /// Server port
    pub port: u16,
    /// Charge processor base URL (None = mock mode)
    pub gateway_url: Option<String>,
    /// Bearer credential sent to the charge processor
    pub gateway_secret_key: String,
    /// Bearer token required for /metrics endpoint (None = public)
    pub metrics_token: Option<String>,
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("port", &self.port)
            .field("gateway_url", &self.gateway_url)
            .field("gateway_secret_key", &"[REDACTED]")
            .field(
                "metrics_token",
                &self.metrics_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            gateway_url: None,
            gateway_secret_key: TEST_SECRET_KEY.to_string(),
            metrics_token: None,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        // Optional: port
        let port = non_empty("PORT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        // Optional: gateway URL, absent = mock mode
        let gateway_url = non_empty("PAYMENT_GATEWAY_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string());
        if let Some(ref url) = gateway_url {
            if let Err(e) = Url::parse(url) {
                tracing::warn!(
                    url = %url,
                    error = %e,
                    "PAYMENT_GATEWAY_URL is not a valid URL — charge calls will fail"
                );
            }
        }

        // Optional: gateway credential
        let gateway_secret_key = match non_empty("PAYMENT_GATEWAY_SECRET_KEY") {
            Some(key) => key,
            None => {
                if gateway_url.is_some() {
                    tracing::warn!(
                        "PAYMENT_GATEWAY_SECRET_KEY not set — using the test credential"
                    );
                }
                TEST_SECRET_KEY.to_string()
            }
        };

        // Optional: metrics token
        let metrics_token = non_empty("METRICS_TOKEN");
        if metrics_token.is_none() {
            tracing::warn!("METRICS_TOKEN not set — /metrics endpoint is publicly accessible");
        }

        Self {
            port,
            gateway_url,
            gateway_secret_key,
            metrics_token,
        }
    }

    pub fn is_mock_mode(&self) -> bool {
        self.gateway_url.is_none()
    }
}

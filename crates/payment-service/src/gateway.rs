//! Remote charge path.
//!
//! [`GatewayClient::authorize`] posts a single form-encoded charge to
//! `<endpoint>/v1/charges` and folds every possible outcome into an
//! [`AuthorizationDecision`]. It never returns an error: transport failures,
//! HTTP error statuses, and malformed bodies all become declined decisions.

use std::time::{Duration, Instant};

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

use crate::error::GatewayFailure;
use crate::metrics;
use crate::types::{from_json_object, AuthorizationDecision, ChargeRequest, ChargeResult};

/// Path of the charge-creation call, relative to the configured endpoint.
pub const CHARGES_PATH: &str = "/v1/charges";

/// Client for the external charge processor.
#[derive(Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    endpoint: String,
    secret_key: String,
}

impl std::fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayClient")
            .field("endpoint", &self.endpoint)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

impl GatewayClient {
    /// Build a client whose calls are bounded by `timeout` end to end.
    pub fn new(
        endpoint: impl Into<String>,
        secret_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            secret_key: secret_key.into(),
        })
    }

    pub fn charges_url(&self) -> String {
        format!("{}{}", self.endpoint, CHARGES_PATH)
    }

    /// Charge `amount` (major units) and map the outcome to a decision.
    pub async fn authorize(&self, amount: f64) -> AuthorizationDecision {
        let start = Instant::now();
        let result = self.charge(amount).await;
        let elapsed = start.elapsed().as_secs_f64();
        metrics::GATEWAY_LATENCY.observe(elapsed);

        match result {
            Ok(charge) => {
                metrics::GATEWAY_CALLS.with_label_values(&["authorised"]).inc();
                tracing::info!(charge_id = %charge.id, elapsed, "payment authorized");
                AuthorizationDecision::authorised(format!(
                    "Payment authorized (charge: {})",
                    charge.id
                ))
            }
            Err(failure) => {
                metrics::GATEWAY_CALLS
                    .with_label_values(&[failure.label()])
                    .inc();
                log_failure(&failure, elapsed);
                failure.into()
            }
        }
    }

    async fn charge(&self, amount: f64) -> Result<ChargeResult, GatewayFailure> {
        let charge = ChargeRequest::for_amount(amount);
        let url = self.charges_url();
        tracing::info!(endpoint = %url, amount_cents = charge.amount, "calling payment gateway");

        let request = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(AUTHORIZATION, format!("Bearer {}", self.secret_key))
            .form(&charge)
            .build()
            .map_err(GatewayFailure::RequestBuild)?;

        let response = self
            .http
            .execute(request)
            .await
            .map_err(GatewayFailure::Transport)?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(GatewayFailure::UnreadableBody)?;

        tracing::debug!(status, "gateway responded");
        interpret_response(status, &body)
    }
}

/// Ordered decision table for a response whose body was read in full.
///
/// Arms are checked top to bottom: server errors, then rate limiting, then
/// other client errors, then the body shape, then the capture rule.
pub fn interpret_response(status: u16, body: &[u8]) -> Result<ChargeResult, GatewayFailure> {
    match status {
        500..=u16::MAX => Err(GatewayFailure::Unavailable(status)),
        429 => Err(GatewayFailure::RateLimited),
        400..=499 => Err(GatewayFailure::Rejected(status)),
        _ => {
            let charge: ChargeResult =
                from_json_object(body).map_err(GatewayFailure::InvalidJson)?;
            if charge.is_captured() {
                Ok(charge)
            } else {
                Err(GatewayFailure::Declined)
            }
        }
    }
}

fn log_failure(failure: &GatewayFailure, elapsed: f64) {
    match failure {
        GatewayFailure::RequestBuild(e) => {
            tracing::error!(error = %e, "failed to build gateway request")
        }
        GatewayFailure::Transport(e) => {
            tracing::error!(error = %e, elapsed, "payment gateway unreachable")
        }
        GatewayFailure::UnreadableBody(e) => {
            tracing::error!(error = %e, elapsed, "failed to read gateway response")
        }
        GatewayFailure::Unavailable(status) => {
            tracing::warn!(status, elapsed, "payment gateway unavailable")
        }
        GatewayFailure::RateLimited => tracing::warn!(elapsed, "payment gateway rate limited"),
        GatewayFailure::Rejected(status) => {
            tracing::warn!(status, elapsed, "payment gateway rejected request")
        }
        GatewayFailure::InvalidJson(e) => {
            tracing::warn!(error = %e, elapsed, "failed to parse gateway response")
        }
        GatewayFailure::Declined => tracing::info!(elapsed, "payment declined by gateway"),
    }
}

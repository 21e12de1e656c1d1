//! Inbound request classification: decode the body, then pick mock or remote
//! evaluation based on whether a gateway is configured.

use crate::error::PaymentError;
use crate::gateway::GatewayClient;
use crate::metrics;
use crate::types::{from_json_object, AuthorizationDecision, AuthorizationRequest};

pub const MOCK_AUTHORIZED_MESSAGE: &str = "Payment authorized (mock mode)";
pub const MOCK_DECLINED_MESSAGE: &str = "Payment declined (mock mode)";

/// Largest amount the mock rule accepts, inclusive.
pub const MOCK_LIMIT: f64 = 100.0;

/// Label for the evaluation path, used in logs and metrics.
pub fn mode(gateway: Option<&GatewayClient>) -> &'static str {
    match gateway {
        Some(_) => "gateway",
        None => "mock",
    }
}

/// Decode raw request bytes.
pub fn decode(body: &[u8]) -> Result<AuthorizationRequest, PaymentError> {
    Ok(from_json_object(body)?)
}

/// Local rule used when no gateway is configured: `0 < amount <= 100`.
pub fn mock_decision(amount: f64) -> AuthorizationDecision {
    let authorised = amount > 0.0 && amount <= MOCK_LIMIT;
    AuthorizationDecision {
        authorised,
        message: if authorised {
            MOCK_AUTHORIZED_MESSAGE
        } else {
            MOCK_DECLINED_MESSAGE
        }
        .to_string(),
    }
}

/// Decide a decoded request.
pub async fn evaluate(
    request: &AuthorizationRequest,
    gateway: Option<&GatewayClient>,
) -> AuthorizationDecision {
    let mode = mode(gateway);
    tracing::info!(amount = request.amount, mode, "payment auth request");

    let decision = match gateway {
        None => {
            let decision = mock_decision(request.amount);
            tracing::info!(authorised = decision.authorised, "mock mode: authorizing locally");
            decision
        }
        Some(client) => client.authorize(request.amount).await,
    };

    metrics::record_decision(mode, decision.authorised);
    decision
}

/// Decode `body` and decide it. A decode failure never reaches the gateway.
pub async fn classify(
    body: &[u8],
    gateway: Option<&GatewayClient>,
) -> Result<AuthorizationDecision, PaymentError> {
    let request = decode(body).inspect_err(|e| {
        tracing::warn!(error = %e, "invalid payment request");
    })?;
    Ok(evaluate(&request, gateway).await)
}

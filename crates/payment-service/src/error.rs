use actix_web::{http::StatusCode, HttpResponse, ResponseError};

use crate::types::AuthorizationDecision;

/// Message returned for a body that does not decode as an authorization request.
pub const INVALID_REQUEST_MESSAGE: &str = "Invalid payment request";

/// Failure to accept an inbound authorization request.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("invalid payment request: {0}")]
    InvalidRequest(#[from] serde_json::Error),
}

impl ResponseError for PaymentError {
    fn status_code(&self) -> StatusCode {
        match self {
            PaymentError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            PaymentError::InvalidRequest(_) => HttpResponse::BadRequest()
                .json(AuthorizationDecision::declined(INVALID_REQUEST_MESSAGE)),
        }
    }
}

/// Every way a remote charge can end without an authorization.
///
/// The `Display` text is the message returned to the caller, so the wording
/// here is part of the response contract.
#[derive(Debug, thiserror::Error)]
pub enum GatewayFailure {
    #[error("Internal error")]
    RequestBuild(#[source] reqwest::Error),

    #[error("Payment gateway error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Payment gateway returned invalid response")]
    UnreadableBody(#[source] reqwest::Error),

    #[error("Payment gateway unavailable (HTTP {0})")]
    Unavailable(u16),

    #[error("Payment gateway rate limit exceeded")]
    RateLimited,

    #[error("Payment request failed (HTTP {0})")]
    Rejected(u16),

    #[error("Payment gateway returned invalid JSON")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Payment declined by gateway")]
    Declined,
}

impl GatewayFailure {
    /// Short label used for the outcome metric.
    pub fn label(&self) -> &'static str {
        match self {
            GatewayFailure::RequestBuild(_) => "request_build",
            GatewayFailure::Transport(_) => "transport",
            GatewayFailure::UnreadableBody(_) => "unreadable_body",
            GatewayFailure::Unavailable(_) => "unavailable",
            GatewayFailure::RateLimited => "rate_limited",
            GatewayFailure::Rejected(_) => "rejected",
            GatewayFailure::InvalidJson(_) => "invalid_json",
            GatewayFailure::Declined => "declined",
        }
    }
}

impl From<GatewayFailure> for AuthorizationDecision {
    fn from(failure: GatewayFailure) -> Self {
        AuthorizationDecision::declined(failure.to_string())
    }
}

/// Startup failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to build payment gateway HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

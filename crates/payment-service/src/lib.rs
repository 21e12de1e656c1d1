//! Payment authorization service.
//!
//! Receives `POST /paymentAuth` requests from the orders service and answers
//! with an authorization decision. Without a configured charge gateway the
//! decision comes from a fixed local rule (mock mode); with one, a single
//! charge is created remotely and its outcome is mapped to a decision.
//!
//! # Modules
//!
//! - [`config`] - Startup configuration ([`ServiceConfig`](config::ServiceConfig))
//! - [`classifier`] - Request decoding and mock/remote selection
//! - [`gateway`] - Remote charge call and outcome mapping
//! - [`routes`] - HTTP endpoints (payment auth, health, metrics)
//! - [`metrics`] - Prometheus metrics for decisions and gateway calls

pub mod classifier;
pub mod config;
pub mod error;
pub mod gateway;
pub mod metrics;
pub mod routes;
pub mod state;
pub mod types;

pub use config::ServiceConfig;
pub use error::{ConfigError, GatewayFailure, PaymentError};
pub use gateway::GatewayClient;
pub use state::AppState;
pub use types::{AuthorizationDecision, AuthorizationRequest};

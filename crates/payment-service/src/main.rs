use actix_web::{middleware::Logger, web, App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use payment_service::{config::ServiceConfig, metrics::register_metrics, routes, state::AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServiceConfig::from_env();
    let port = config.port;

    match config.gateway_url {
        Some(ref url) => tracing::info!("Payment gateway: {}", url),
        None => tracing::warn!("PAYMENT_GATEWAY_URL not set — running in mock mode"),
    }

    if let Err(e) = register_metrics() {
        tracing::warn!("Failed to register metrics: {}", e);
    }

    let state = AppState::new(config).map_err(std::io::Error::other)?;
    let state_data = web::Data::new(state);

    tracing::info!("Payment service starting on port {}", port);
    tracing::info!("  POST http://localhost:{port}/paymentAuth");
    tracing::info!("  GET  http://localhost:{port}/health");

    HttpServer::new(move || {
        App::new()
            .app_data(state_data.clone())
            .wrap(Logger::default())
            .configure(routes::payment::configure)
            .configure(routes::health::configure)
    })
    .bind(("0.0.0.0", port))
    .inspect_err(|e| tracing::error!("Server failed to bind port {}: {}", port, e))?
    .run()
    .await
}

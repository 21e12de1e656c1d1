use prometheus::{Encoder, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::LazyLock;

pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

// Inbound decisions
pub static AUTH_REQUESTS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "payment_auth_requests_total",
            "Payment authorization requests by mode and result",
        ),
        &["mode", "result"],
    )
    .unwrap()
});

// Outbound charge calls
pub static GATEWAY_CALLS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "payment_gateway_calls_total",
            "Charge gateway calls by outcome",
        ),
        &["outcome"],
    )
    .unwrap()
});

pub static GATEWAY_LATENCY: LazyLock<Histogram> = LazyLock::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "payment_gateway_latency_seconds",
            "Charge gateway call latency",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 35.0]),
    )
    .unwrap()
});

/// Register all metrics with the registry. Call once at startup.
pub fn register_metrics() -> prometheus::Result<()> {
    REGISTRY.register(Box::new(AUTH_REQUESTS.clone()))?;
    REGISTRY.register(Box::new(GATEWAY_CALLS.clone()))?;
    REGISTRY.register(Box::new(GATEWAY_LATENCY.clone()))?;
    Ok(())
}

pub fn record_decision(mode: &str, authorised: bool) {
    let result = if authorised { "authorised" } else { "declined" };
    AUTH_REQUESTS.with_label_values(&[mode, result]).inc();
}

pub fn metrics_output() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&REGISTRY.gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Encoder, Histogram,
    IntCounter, IntCounterVec, TextEncoder,
};

// Prometheus metrics (default registry)
pub static REQUESTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("venue_client_requests_total", "Total API requests issued")
        .expect("register requests_total")
});

pub static FAILURES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "venue_client_failures_total",
        "Failed API operations by error kind",
        &["kind"]
    )
    .expect("register failures_total")
});

pub static SESSION_EXPIRED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "venue_client_session_expired_total",
        "Sessions terminated by a 401 response"
    )
    .expect("register session_expired_total")
});

pub static RETRIES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("venue_client_retries_total", "Total retry attempts")
        .expect("register retries_total")
});

pub static REQUEST_DURATION: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "venue_client_request_duration_seconds",
        "Request duration in seconds",
        vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    )
    .expect("register request_duration")
});

/// Register every metric with the default registry, so a fresh process
/// exposes zeroed series instead of an empty exposition.
pub fn init() {
    Lazy::force(&REQUESTS_TOTAL);
    Lazy::force(&FAILURES_TOTAL);
    Lazy::force(&SESSION_EXPIRED_TOTAL);
    Lazy::force(&RETRIES_TOTAL);
    Lazy::force(&REQUEST_DURATION);
}

pub fn record_failure(error: &crate::errors::ClientError) {
    FAILURES_TOTAL.with_label_values(&[error.kind()]).inc();
}

/// Render the default registry in the text exposition format.
pub fn encode_metrics() -> Result<String, String> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| format!("metrics encode error: {e}"))?;
    String::from_utf8(buffer).map_err(|e| format!("metrics encode error: {e}"))
}

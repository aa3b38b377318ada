//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the makerscan server:
//! - HTTP request metrics (latency, counts, errors)
//! - Stored result totals (collected dynamically)
//! - Core scan metrics (registered from `makerscan_core::metrics`)

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use tracing::warn;

use crate::state::AppState;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "makerscan_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 30.0, 60.0, 300.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("makerscan_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "makerscan_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Result Store Metrics
// =============================================================================

/// Stored records (collected dynamically).
pub static STORED_RECORDS: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("makerscan_stored_records", "Records currently stored").unwrap()
});

/// Terms with at least one stored record (collected dynamically).
pub static STORED_TERMS: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "makerscan_stored_terms",
        "Search terms with stored records",
    )
    .unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();

    // Result store
    registry.register(Box::new(STORED_RECORDS.clone())).unwrap();
    registry.register(Box::new(STORED_TERMS.clone())).unwrap();

    // Core metrics (scans, candidates, difficulty)
    for metric in makerscan_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        warn!("Failed to encode metrics: {}", e);
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Collect dynamic metrics from current application state.
///
/// Called before encoding so the store gauges reflect the current snapshot.
pub fn collect_dynamic_metrics(state: &AppState) {
    match state.store().read_all_grouped_by_term() {
        Ok(groups) => {
            let records: usize = groups.iter().map(|g| g.records.len()).sum();
            STORED_RECORDS.set(records as i64);
            STORED_TERMS.set(groups.len() as i64);
        }
        Err(e) => warn!("Failed to read stored results for metrics: {}", e),
    }
}

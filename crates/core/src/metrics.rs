//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Scans (duration, per-term outcome)
//! - Candidates (extracted vs. skipped, difficulty tiers)

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, IntCounterVec, Opts};

// =============================================================================
// Scan Metrics
// =============================================================================

/// Terms processed total by result.
pub static TERMS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("makerscan_terms_total", "Total search terms processed"),
        &["result"], // "persisted", "failed"
    )
    .unwrap()
});

/// Scan duration in seconds.
pub static SCAN_DURATION: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "makerscan_scan_duration_seconds",
            "Duration of a full scan request",
        )
        .buckets(vec![1.0, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0, 600.0]),
    )
    .unwrap()
});

// =============================================================================
// Candidate Metrics
// =============================================================================

/// Candidates visited total by result.
pub static CANDIDATES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("makerscan_candidates_total", "Total candidates visited"),
        &["result"], // "extracted", "skipped"
    )
    .unwrap()
});

/// Classified records by difficulty tier.
pub static DIFFICULTY_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "makerscan_difficulty_total",
            "Total records classified, by difficulty tier",
        ),
        &["tier"], // "Low", "Medium", "High"
    )
    .unwrap()
});

/// Get all core metrics for registration.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Scans
        Box::new(TERMS_TOTAL.clone()),
        Box::new(SCAN_DURATION.clone()),
        // Candidates
        Box::new(CANDIDATES_TOTAL.clone()),
        Box::new(DIFFICULTY_TOTAL.clone()),
    ]
}

//! Scan API handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use makerscan_core::scan::split_keywords;
use makerscan_core::{RecencyWindow, ScanError, ScanReport, ScanRequest, SortKey, TermGroup};

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ScanBody {
    /// Comma-separated search terms.
    pub keywords: String,
    /// 0 (all time), 7 or 30. Falls back to the configured default.
    #[serde(default)]
    pub recency_window_days: Option<u32>,
    /// Falls back to the configured default.
    #[serde(default)]
    pub sort_key: Option<SortKey>,
}

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub report: ScanReport,
    /// Everything stored after the scan, grouped by term.
    pub results: Vec<TermGroup>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}

fn scan_error_status(error: &ScanError) -> StatusCode {
    match error {
        ScanError::NoTerms => StatusCode::BAD_REQUEST,
        ScanError::Browser(_) => StatusCode::SERVICE_UNAVAILABLE,
        ScanError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/scan
///
/// Run a scan to completion, then return its report and all stored results.
/// Scans are serialised; a second request waits for the running one. A scan
/// keeps running to the end even if the client goes away.
pub async fn run_scan(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ScanBody>,
) -> Result<Json<ScanResponse>, ApiError> {
    if split_keywords(&body.keywords).is_empty() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "keywords must contain at least one search term",
        ));
    }

    let recency_window = match body.recency_window_days {
        Some(days) => RecencyWindow::try_from(days)
            .map_err(|e| api_error(StatusCode::BAD_REQUEST, e))?,
        None => state.default_recency_window(),
    };

    let request = ScanRequest {
        keywords: body.keywords,
        recency_window,
        sort_key: body.sort_key.or(state.default_sort_key()),
    };

    // The scan runs detached so a client disconnect cannot abandon it halfway
    // with the browser still open.
    let task_state = Arc::clone(&state);
    let scan = tokio::spawn(async move {
        let _guard = task_state.scan_lock().lock_owned().await;
        task_state.orchestrator().scan(&request).await
    });

    let report = scan
        .await
        .map_err(|e| {
            warn!("Scan task aborted: {}", e);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "scan task aborted")
        })?
        .map_err(|e| {
            warn!("Scan failed: {}", e);
            api_error(scan_error_status(&e), e.to_string())
        })?;

    info!(
        "Scan {} finished: {} persisted, {} failed",
        report.scan_id,
        report.persisted_count(),
        report.failed_count()
    );

    let results = state
        .store()
        .read_all_grouped_by_term()
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(ScanResponse { report, results }))
}

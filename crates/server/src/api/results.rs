//! Stored results API handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use makerscan_core::TermGroup;

use super::scan::ErrorResponse;
use crate::state::AppState;

/// GET /api/v1/results
///
/// All stored records grouped by term, most recently scanned term first.
pub async fn list_results(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TermGroup>>, (StatusCode, Json<ErrorResponse>)> {
    state
        .store()
        .read_all_grouped_by_term()
        .map(Json)
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
        })
}

//! Metric history handlers

use crate::api::rest::state::AppState;
use crate::error::{ApiError, ApiResult};
use axum::{
    extract::{Query, State},
    Json,
};
use pulse_types::HistoryView;
use serde::Deserialize;

/// History query params
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Number of most recent points; the whole window when absent
    pub limit: Option<usize>,
}

/// Rolling metric history, oldest first
pub async fn metric_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<HistoryView>> {
    let view = match query.limit {
        Some(0) => {
            return Err(ApiError::BadRequest(
                "limit must be greater than zero".to_string(),
            ))
        }
        Some(limit) => state.engine.recent(limit)?,
        None => state.engine.history()?,
    };

    Ok(Json(view))
}

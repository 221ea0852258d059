//! Alert handlers

use crate::api::rest::state::AppState;
use crate::error::ApiResult;
use axum::{extract::State, Json};
use pulse_types::{Alert, MetricKind, Thresholds};
use std::collections::BTreeMap;

/// Alert history, newest first
pub async fn list_alerts(State(state): State<AppState>) -> ApiResult<Json<Vec<Alert>>> {
    Ok(Json(state.engine.alert_history()?))
}

/// Configured thresholds per metric
pub async fn alert_thresholds(
    State(state): State<AppState>,
) -> ApiResult<Json<BTreeMap<MetricKind, Thresholds>>> {
    Ok(Json(state.engine.thresholds()?))
}

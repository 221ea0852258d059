//! Health and status handlers

use crate::api::rest::state::AppState;
use crate::error::{ApiError, ApiResult};
use axum::{extract::State, http::Uri, Json};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub version: String,
    pub uptime: String,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime: state.uptime(),
    })
}

/// Daemon status response
#[derive(Debug, Serialize, Deserialize)]
pub struct DaemonStatusResponse {
    pub status: String,
    pub version: String,
    pub uptime: String,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub stats: DaemonStats,
}

/// Engine statistics
#[derive(Debug, Serialize, Deserialize)]
pub struct DaemonStats {
    pub observers: usize,
    pub history_points: usize,
    pub history_capacity: usize,
    pub alerts: usize,
    pub tick_interval_ms: u64,
}

/// Daemon status endpoint
pub async fn daemon_status(State(state): State<AppState>) -> ApiResult<Json<DaemonStatusResponse>> {
    let engine = &state.engine;
    let config = engine.config();

    Ok(Json(DaemonStatusResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime: state.uptime(),
        started_at: state.started_at,
        stats: DaemonStats {
            observers: engine.observers(),
            history_points: engine.history_len()?,
            history_capacity: config.history.capacity,
            alerts: engine.alert_history()?.len(),
            tick_interval_ms: config.schedule.tick_interval_ms,
        },
    }))
}

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}

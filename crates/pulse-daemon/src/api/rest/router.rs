//! API Router configuration

use super::handlers;
use super::state::AppState;
use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the main API router
pub fn create_router(state: AppState, enable_cors: bool) -> Router {
    let api_routes = Router::new()
        // Health and status
        .route("/health", get(handlers::health_check))
        .route("/status", get(handlers::daemon_status))
        // Metrics
        .route("/metrics/history", get(handlers::metric_history))
        // Alerts
        .route("/alerts", get(handlers::list_alerts))
        .route("/alerts/thresholds", get(handlers::alert_thresholds))
        // Live stream
        .route("/stream", get(handlers::stream_events));

    let router = Router::new()
        .nest("/api/v1", api_routes)
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http());

    let router = if enable_cors {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        router
    };

    router.with_state(state)
}

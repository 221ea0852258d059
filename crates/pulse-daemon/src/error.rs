//! Error types for pulse-daemon

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pulse_runtime::RuntimeError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Daemon-level errors
#[derive(Debug, Error)]
pub enum DaemonError {
    /// Configuration could not be loaded or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration loaded but holds invalid values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] pulse_types::ConfigError),

    /// Server startup error
    #[error("Server error: {0}")]
    Server(String),

    /// Engine error
    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// API-specific errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Engine state unavailable
    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Runtime(_) => (StatusCode::INTERNAL_SERVER_ERROR, "RUNTIME_ERROR"),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type alias for daemon operations
pub type DaemonResult<T> = Result<T, DaemonError>;

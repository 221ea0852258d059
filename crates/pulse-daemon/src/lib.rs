//! Pulse daemon library
//!
//! HTTP delivery for the telemetry engine:
//! - REST endpoints for health, history, alerts and thresholds
//! - Server-Sent Events stream with catch-up on connect
//! - Layered configuration and server lifecycle

pub mod api;
pub mod config;
pub mod error;
pub mod server;

pub use config::DaemonConfig;
pub use error::{ApiError, DaemonError};
pub use server::Server;

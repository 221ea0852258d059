//! Application state for API handlers

use pulse_runtime::TelemetryEngine;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Telemetry engine
    pub engine: Arc<TelemetryEngine>,

    /// Daemon version
    pub version: String,

    /// Daemon start time
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// Flips to `true` when the daemon shuts down; ends open streams
    pub shutdown: watch::Receiver<bool>,

    /// SSE keep-alive interval
    pub keep_alive: Duration,
}

impl AppState {
    /// Create new application state
    pub fn new(
        engine: Arc<TelemetryEngine>,
        shutdown: watch::Receiver<bool>,
        keep_alive: Duration,
    ) -> Self {
        Self {
            engine,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: chrono::Utc::now(),
            shutdown,
            keep_alive,
        }
    }

    /// Get uptime as a human-readable string
    pub fn uptime(&self) -> String {
        format_uptime((chrono::Utc::now() - self.started_at).num_seconds())
    }
}

fn format_uptime(secs: i64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs < 86400 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(42), "42s");
        assert_eq!(format_uptime(125), "2m 5s");
        assert_eq!(format_uptime(7_260), "2h 1m");
        assert_eq!(format_uptime(90_000), "1d 1h");
    }
}

//! Discrete log records.

use crate::ids::LogEventId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;

/// Log severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogSeverity {
    Info,
    Warning,
    Error,
}

impl LogSeverity {
    pub const ALL: [LogSeverity; 3] = [LogSeverity::Info, LogSeverity::Warning, LogSeverity::Error];
}

impl fmt::Display for LogSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogSeverity::Info => "info",
            LogSeverity::Warning => "warning",
            LogSeverity::Error => "error",
        })
    }
}

/// A synthesized request/log record. Delivered once and never retained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEvent {
    pub id: LogEventId,
    pub severity: LogSeverity,
    pub message: String,
    pub endpoint: String,
    pub status_code: u16,
    pub response_time_ms: u32,
    pub timestamp: DateTime<Utc>,
    pub source_ip: Ipv4Addr,
}

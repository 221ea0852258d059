//! Pulse core types
//!
//! Data model shared by the simulation, history, alerting and runtime crates:
//! metric snapshots, log records, alerts, and the event envelope delivered to
//! observers.

#![deny(unsafe_code)]

pub mod alert;
pub mod error;
pub mod event;
pub mod ids;
pub mod log;
pub mod metric;

pub use alert::{alert_message, Alert, AlertLevel, Thresholds};
pub use error::{check_probability, ConfigError};
pub use event::{DashboardEvent, HistoryView};
pub use ids::{AlertId, LogEventId};
pub use log::{LogEvent, LogSeverity};
pub use metric::{round_to, MetricKind, MetricSnapshot};

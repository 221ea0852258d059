//! Messages handed to the broadcaster.

use crate::alert::Alert;
use crate::log::LogEvent;
use crate::metric::{MetricKind, MetricSnapshot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Read-only copy of the rolling history: parallel, index-aligned series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryView {
    pub timestamps: Vec<DateTime<Utc>>,
    pub cpu: Vec<f64>,
    pub memory: Vec<f64>,
    pub requests: Vec<f64>,
    pub response_time: Vec<f64>,
}

impl HistoryView {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Series for one metric.
    pub fn series(&self, kind: MetricKind) -> &[f64] {
        match kind {
            MetricKind::Cpu => &self.cpu,
            MetricKind::Memory => &self.memory,
            MetricKind::Requests => &self.requests,
            MetricKind::ResponseTime => &self.response_time,
        }
    }

    /// Reassemble the snapshot stored at `index`.
    pub fn point(&self, index: usize) -> Option<MetricSnapshot> {
        Some(MetricSnapshot {
            cpu: *self.cpu.get(index)?,
            memory: *self.memory.get(index)?,
            requests_per_second: *self.requests.get(index)?,
            response_time_ms: *self.response_time.get(index)?,
            timestamp: *self.timestamps.get(index)?,
        })
    }
}

/// Everything the core publishes to observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "kebab-case")]
pub enum DashboardEvent {
    /// One per generation tick.
    MetricSnapshot(MetricSnapshot),
    /// One per new observer, on connect.
    HistorySnapshot(HistoryView),
    /// Zero or more per tick, right after the snapshot.
    AlertRaised(Alert),
    /// One per new observer, on connect. Newest first.
    AlertHistory(Vec<Alert>),
    /// One per log tick.
    LogEvent(LogEvent),
    /// Published whenever an observer connects or disconnects.
    ObserverCount { observers: usize },
}

impl DashboardEvent {
    /// Event name, as used on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            DashboardEvent::MetricSnapshot(_) => "metric-snapshot",
            DashboardEvent::HistorySnapshot(_) => "history-snapshot",
            DashboardEvent::AlertRaised(_) => "alert-raised",
            DashboardEvent::AlertHistory(_) => "alert-history",
            DashboardEvent::LogEvent(_) => "log-event",
            DashboardEvent::ObserverCount { .. } => "observer-count",
        }
    }

    /// JSON encoding of the payload alone.
    pub fn payload_json(&self) -> serde_json::Result<String> {
        match self {
            DashboardEvent::MetricSnapshot(snapshot) => serde_json::to_string(snapshot),
            DashboardEvent::HistorySnapshot(view) => serde_json::to_string(view),
            DashboardEvent::AlertRaised(alert) => serde_json::to_string(alert),
            DashboardEvent::AlertHistory(alerts) => serde_json::to_string(alerts),
            DashboardEvent::LogEvent(log) => serde_json::to_string(log),
            DashboardEvent::ObserverCount { observers } => {
                serde_json::to_string(&serde_json::json!({ "observers": observers }))
            }
        }
    }
}

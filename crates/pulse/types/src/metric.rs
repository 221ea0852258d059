//! Metric signals and the snapshot produced on every generation tick.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four synthetic signals.
///
/// The declaration order is the evaluation order used everywhere a snapshot
/// is walked metric by metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKind {
    Cpu,
    Memory,
    Requests,
    /// Also accepted as `response_time`; environment keys arrive lowercased.
    #[serde(alias = "response_time", alias = "responsetime")]
    ResponseTime,
}

impl MetricKind {
    /// All signals in evaluation order.
    pub const ALL: [MetricKind; 4] = [
        MetricKind::Cpu,
        MetricKind::Memory,
        MetricKind::Requests,
        MetricKind::ResponseTime,
    ];

    /// Stable key used in configuration and on the wire.
    pub fn key(self) -> &'static str {
        match self {
            MetricKind::Cpu => "cpu",
            MetricKind::Memory => "memory",
            MetricKind::Requests => "requests",
            MetricKind::ResponseTime => "responseTime",
        }
    }

    /// Human-readable name used in alert messages.
    pub fn display_name(self) -> &'static str {
        match self {
            MetricKind::Cpu => "CPU",
            MetricKind::Memory => "Memory",
            MetricKind::Requests => "Requests/s",
            MetricKind::ResponseTime => "Response Time",
        }
    }

    /// Unit suffix, including its leading space where one is wanted.
    pub fn unit(self) -> &'static str {
        match self {
            MetricKind::Cpu | MetricKind::Memory => "%",
            MetricKind::Requests => " req/s",
            MetricKind::ResponseTime => " ms",
        }
    }

    /// Number of decimal places the snapshot keeps for this signal.
    pub fn precision(self) -> u32 {
        match self {
            MetricKind::Cpu | MetricKind::Memory => 1,
            MetricKind::Requests | MetricKind::ResponseTime => 0,
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One complete set of simultaneously generated metric values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSnapshot {
    /// CPU utilisation, percent.
    pub cpu: f64,
    /// Memory utilisation, percent.
    pub memory: f64,
    /// Request throughput.
    pub requests_per_second: f64,
    /// Mean response latency in milliseconds.
    pub response_time_ms: f64,
    /// Generation instant.
    pub timestamp: DateTime<Utc>,
}

impl MetricSnapshot {
    /// Value of a single signal.
    pub fn value(&self, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::Cpu => self.cpu,
            MetricKind::Memory => self.memory,
            MetricKind::Requests => self.requests_per_second,
            MetricKind::ResponseTime => self.response_time_ms,
        }
    }

    /// Iterate `(kind, value)` pairs in evaluation order.
    pub fn values(&self) -> impl Iterator<Item = (MetricKind, f64)> + '_ {
        MetricKind::ALL.into_iter().map(|kind| (kind, self.value(kind)))
    }
}

/// Round `value` to `decimals` places, half away from zero.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

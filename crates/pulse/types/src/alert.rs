//! Threshold configuration and raised alerts.

use crate::error::ConfigError;
use crate::ids::AlertId;
use crate::metric::MetricKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Alert level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Warning,
    Critical,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AlertLevel::Warning => "warning",
            AlertLevel::Critical => "critical",
        })
    }
}

/// Warning and critical thresholds for one metric. Both are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub warning: f64,
    pub critical: f64,
}

impl Thresholds {
    pub fn new(warning: f64, critical: f64) -> Self {
        Self { warning, critical }
    }

    /// Threshold value for a level.
    pub fn for_level(&self, level: AlertLevel) -> f64 {
        match level {
            AlertLevel::Warning => self.warning,
            AlertLevel::Critical => self.critical,
        }
    }

    /// Highest level breached by `value`, critical taking priority.
    pub fn classify(&self, value: f64) -> Option<AlertLevel> {
        if value >= self.critical {
            Some(AlertLevel::Critical)
        } else if value >= self.warning {
            Some(AlertLevel::Warning)
        } else {
            None
        }
    }

    pub fn validate(&self, metric: MetricKind) -> Result<(), ConfigError> {
        if !self.warning.is_finite() || !self.critical.is_finite() || self.warning > self.critical
        {
            return Err(ConfigError::InvalidThresholds {
                metric,
                warning: self.warning,
                critical: self.critical,
            });
        }
        Ok(())
    }
}

/// A raised alert. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: AlertId,
    pub metric: MetricKind,
    pub metric_name: String,
    pub value: f64,
    pub unit: String,
    pub level: AlertLevel,
    /// The breached threshold value.
    pub threshold: f64,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Alert {
    pub fn new(
        metric: MetricKind,
        value: f64,
        level: AlertLevel,
        threshold: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AlertId::generate(),
            metric,
            metric_name: metric.display_name().to_string(),
            value,
            unit: metric.unit().to_string(),
            level,
            threshold,
            message: alert_message(metric, value, threshold),
            timestamp,
        }
    }
}

/// `"{display_name} at {value}{unit} (threshold: {threshold}{unit})"`
pub fn alert_message(metric: MetricKind, value: f64, threshold: f64) -> String {
    let unit = metric.unit();
    format!(
        "{} at {}{} (threshold: {}{})",
        metric.display_name(),
        value,
        unit,
        threshold,
        unit
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_is_inclusive() {
        let t = Thresholds::new(70.0, 90.0);
        assert_eq!(t.classify(69.9), None);
        assert_eq!(t.classify(70.0), Some(AlertLevel::Warning));
        assert_eq!(t.classify(90.0), Some(AlertLevel::Critical));
        assert_eq!(t.classify(150.0), Some(AlertLevel::Critical));
    }

    #[test]
    fn test_alert_message_format() {
        assert_eq!(
            alert_message(MetricKind::Cpu, 91.0, 90.0),
            "CPU at 91% (threshold: 90%)"
        );
        assert_eq!(
            alert_message(MetricKind::ResponseTime, 512.0, 500.0),
            "Response Time at 512 ms (threshold: 500 ms)"
        );
        assert_eq!(
            alert_message(MetricKind::Memory, 76.4, 75.0),
            "Memory at 76.4% (threshold: 75%)"
        );
    }

    #[test]
    fn test_validate_rejects_inverted_thresholds() {
        let err = Thresholds::new(90.0, 70.0)
            .validate(MetricKind::Cpu)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidThresholds { .. }));
        assert!(Thresholds::new(70.0, 70.0).validate(MetricKind::Cpu).is_ok());
    }

    #[test]
    fn test_alert_carries_display_metadata() {
        let alert = Alert::new(MetricKind::Requests, 512.0, AlertLevel::Critical, 500.0, Utc::now());
        assert_eq!(alert.metric_name, "Requests/s");
        assert_eq!(alert.unit, " req/s");
        assert_eq!(alert.message, "Requests/s at 512 req/s (threshold: 500 req/s)");
    }
}

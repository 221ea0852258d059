//! Alerting configuration

use pulse_types::{ConfigError, MetricKind, Thresholds};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Thresholds per metric, cooldown and alert-history capacity.
///
/// A metric missing from `thresholds` is never evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertingConfig {
    pub thresholds: BTreeMap<MetricKind, Thresholds>,
    /// Minimum gap between two alerts with the same metric and level.
    pub cooldown_ms: u64,
    pub history_capacity: usize,
}

impl Default for AlertingConfig {
    fn default() -> Self {
        Self {
            thresholds: default_thresholds(),
            cooldown_ms: 10_000,
            history_capacity: 50,
        }
    }
}

impl AlertingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (metric, thresholds) in &self.thresholds {
            thresholds.validate(*metric)?;
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::Zero("alerting.history_capacity"));
        }
        Ok(())
    }
}

/// cpu 70/90, memory 75/90, requests 400/500, responseTime 300/500.
pub fn default_thresholds() -> BTreeMap<MetricKind, Thresholds> {
    BTreeMap::from([
        (MetricKind::Cpu, Thresholds::new(70.0, 90.0)),
        (MetricKind::Memory, Thresholds::new(75.0, 90.0)),
        (MetricKind::Requests, Thresholds::new(400.0, 500.0)),
        (MetricKind::ResponseTime, Thresholds::new(300.0, 500.0)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = AlertingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.thresholds.len(), 4);
        assert_eq!(config.cooldown_ms, 10_000);
        assert_eq!(config.history_capacity, 50);
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let mut config = AlertingConfig::default();
        config
            .thresholds
            .insert(MetricKind::Memory, Thresholds::new(95.0, 90.0));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThresholds {
                metric: MetricKind::Memory,
                ..
            })
        ));
    }

    #[test]
    fn test_partial_table_deserializes() {
        let config: AlertingConfig = serde_json::from_str(
            r#"{ "thresholds": { "cpu": { "warning": 50, "critical": 60 } } }"#,
        )
        .unwrap();
        assert_eq!(config.thresholds.len(), 1);
        assert_eq!(config.thresholds[&MetricKind::Cpu].critical, 60.0);
        assert_eq!(config.cooldown_ms, 10_000);
    }
}

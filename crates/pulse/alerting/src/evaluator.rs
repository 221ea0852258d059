//! Threshold evaluation.

use crate::config::AlertingConfig;
use crate::cooldown::CooldownTracker;
use crate::history::AlertHistory;
use chrono::{DateTime, Utc};
use pulse_types::{Alert, MetricKind, MetricSnapshot, Thresholds};
use std::collections::BTreeMap;

/// Owns the thresholds, cooldown state and alert history of one process.
#[derive(Debug, Clone)]
pub struct AlertEvaluator {
    thresholds: BTreeMap<MetricKind, Thresholds>,
    cooldowns: CooldownTracker,
    history: AlertHistory,
}

impl Default for AlertEvaluator {
    fn default() -> Self {
        Self::new(AlertingConfig::default())
    }
}

impl AlertEvaluator {
    pub fn new(config: AlertingConfig) -> Self {
        Self {
            thresholds: config.thresholds,
            cooldowns: CooldownTracker::new(config.cooldown_ms),
            history: AlertHistory::new(config.history_capacity),
        }
    }

    /// Evaluate against the wall clock.
    pub fn evaluate(&mut self, snapshot: &MetricSnapshot) -> Vec<Alert> {
        self.evaluate_at(snapshot, Utc::now())
    }

    /// Evaluate `snapshot` as of `now`.
    ///
    /// Metrics are visited as cpu, memory, requests, responseTime. Each
    /// yields at most one alert: the highest breached level, provided that
    /// level's cooldown has elapsed. Fired alerts are also pushed onto the
    /// history.
    pub fn evaluate_at(&mut self, snapshot: &MetricSnapshot, now: DateTime<Utc>) -> Vec<Alert> {
        let mut fired = Vec::new();

        for metric in MetricKind::ALL {
            let Some(thresholds) = self.thresholds.get(&metric) else {
                continue;
            };
            let value = snapshot.value(metric);
            let Some(level) = thresholds.classify(value) else {
                continue;
            };

            if !self.cooldowns.is_ready(metric, level, now) {
                tracing::trace!(metric = %metric, level = %level, value, "Alert suppressed by cooldown");
                continue;
            }

            self.cooldowns.record(metric, level, now);
            let alert = Alert::new(metric, value, level, thresholds.for_level(level), now);
            tracing::info!(
                metric = %metric,
                level = %level,
                value,
                threshold = alert.threshold,
                "Alert raised"
            );
            self.history.push(alert.clone());
            fired.push(alert);
        }

        fired
    }

    pub fn history(&self) -> &AlertHistory {
        &self.history
    }

    pub fn thresholds(&self) -> &BTreeMap<MetricKind, Thresholds> {
        &self.thresholds
    }

    pub fn cooldowns(&self) -> &CooldownTracker {
        &self.cooldowns
    }
}

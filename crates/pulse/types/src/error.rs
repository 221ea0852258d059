//! Configuration validation errors

use crate::metric::MetricKind;
use thiserror::Error;

/// Invalid configuration values, rejected once at startup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Invalid range for {metric}: min {min} must be below max {max}")]
    InvalidRange { metric: MetricKind, min: f64, max: f64 },

    #[error("Invalid thresholds for {metric}: warning {warning} exceeds critical {critical}")]
    InvalidThresholds {
        metric: MetricKind,
        warning: f64,
        critical: f64,
    },

    #[error("Invalid spike magnitude for {metric}: {magnitude}")]
    InvalidSpike { metric: MetricKind, magnitude: f64 },

    #[error("Invalid spike cap for {metric}: {cap} is below range max {max}")]
    InvalidSpikeCap { metric: MetricKind, cap: f64, max: f64 },

    #[error("Probability {name} must lie in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("Invalid log jitter: min {min_ms}ms exceeds max {max_ms}ms")]
    InvalidJitter { min_ms: u64, max_ms: u64 },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("{0} must be a finite, non-negative number")]
    Negative(&'static str),
}

/// Validate that `value` is a probability.
pub fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability { name, value })
    }
}

//! Pulse alerting
//!
//! Evaluates metric snapshots against per-metric warning/critical thresholds.
//!
//! - At most one alert per metric per evaluation; critical takes priority.
//! - Each `(metric, level)` pair has its own cooldown, so a critical alert is
//!   never held back by a recent warning on the same metric.
//! - Fired alerts are retained newest-first in a bounded [`AlertHistory`].

#![deny(unsafe_code)]

pub mod config;
pub mod cooldown;
pub mod evaluator;
pub mod history;

pub use config::{default_thresholds, AlertingConfig};
pub use cooldown::CooldownTracker;
pub use evaluator::AlertEvaluator;
pub use history::AlertHistory;

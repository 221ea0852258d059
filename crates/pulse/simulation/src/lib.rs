//! Pulse signal synthesis
//!
//! Generates the synthetic telemetry that drives the dashboard:
//!
//! - [`MetricSeriesGenerator`]: bounded random walk with momentum for one signal
//! - [`MetricSnapshotGenerator`]: four walks plus low-probability correlated spikes
//! - [`LogEventGenerator`]: severity-weighted request/log records
//!
//! All randomness flows through [`RandomSource`], implemented for every
//! [`rand::RngCore`]. Enable the `test-utils` feature for a scripted source.

#![deny(unsafe_code)]

pub mod config;
pub mod logs;
pub mod random;
pub mod series;
pub mod snapshot;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use config::{LogMix, SignalProfile, SignalProfiles, SimulationConfig, WalkConfig};
pub use logs::{response_time_range, status_codes, templates, LogEventGenerator, LogTemplate};
pub use random::RandomSource;
pub use series::{MetricSeriesGenerator, SignalState};
pub use snapshot::MetricSnapshotGenerator;

//! Pulse runtime
//!
//! Wires the generators, rolling history and alert evaluator into one
//! [`TelemetryEngine`] and fans its output out to observers:
//!
//! ```text
//! metric driver (fixed period) -> generate -> history.append -> evaluate -> publish
//! log driver (jittered period) -> generate -> publish
//! ```
//!
//! New observers call [`TelemetryEngine::connect`] and receive the current
//! history and alert history together with a live receiver.

#![deny(unsafe_code)]

pub mod broadcast;
pub mod config;
pub mod engine;
pub mod error;
pub mod session;

pub use broadcast::{Broadcaster, ObserverGuard};
pub use config::{ChannelConfig, PulseConfig, ScheduleConfig};
pub use engine::{DriverHandles, MetricTick, TelemetryEngine};
pub use error::{RuntimeError, RuntimeResult};
pub use session::ObserverSession;

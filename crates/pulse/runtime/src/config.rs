//! Engine configuration

use pulse_alerting::AlertingConfig;
use pulse_history::HistoryConfig;
use pulse_simulation::SimulationConfig;
use pulse_types::ConfigError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    pub schedule: ScheduleConfig,
    pub simulation: SimulationConfig,
    pub alerting: AlertingConfig,
    pub history: HistoryConfig,
    pub channel: ChannelConfig,
}

impl PulseConfig {
    /// Reject invalid values once, before anything is constructed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.schedule.validate()?;
        self.simulation.validate()?;
        self.alerting.validate()?;
        self.history.validate()?;
        self.channel.validate()
    }
}

/// Driver timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Metric snapshot period.
    pub tick_interval_ms: u64,
    /// Inclusive lower bound of the delay between two log events.
    pub log_jitter_min_ms: u64,
    /// Inclusive upper bound of the delay between two log events.
    pub log_jitter_max_ms: u64,
    /// Delay before the first log event.
    pub initial_log_delay_ms: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 2000,
            log_jitter_min_ms: 1000,
            log_jitter_max_ms: 3000,
            initial_log_delay_ms: 1000,
        }
    }
}

impl ScheduleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Zero("schedule.tick_interval_ms"));
        }
        if self.log_jitter_min_ms > self.log_jitter_max_ms {
            return Err(ConfigError::InvalidJitter {
                min_ms: self.log_jitter_min_ms,
                max_ms: self.log_jitter_max_ms,
            });
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn initial_log_delay(&self) -> Duration {
        Duration::from_millis(self.initial_log_delay_ms)
    }

    /// Fresh delay until the next log event, uniform over the jitter range.
    pub fn next_log_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let low = self.log_jitter_min_ms.min(self.log_jitter_max_ms);
        Duration::from_millis(rng.gen_range(low..=self.log_jitter_max_ms))
    }
}

/// Broadcast channel sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Events buffered per observer before it starts lagging.
    pub capacity: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self { capacity: 1000 }
    }
}

impl ChannelConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::Zero("channel.capacity"));
        }
        Ok(())
    }
}

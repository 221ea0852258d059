//! Simulation configuration.
//!
//! Defaults reproduce the documented signal shapes; every field may be
//! overridden from a config file.

use pulse_types::{check_probability, ConfigError, LogSeverity, MetricKind};
use serde::{Deserialize, Serialize};

/// Configuration for every generator in this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Per-signal clamp ranges, start values and spike behaviour.
    pub signals: SignalProfiles,

    /// Random-walk parameters shared by all signals.
    pub walk: WalkConfig,

    /// Probability of a correlated spike on a snapshot tick.
    pub spike_probability: f64,

    /// Log severity mix.
    pub logs: LogMix,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            signals: SignalProfiles::default(),
            walk: WalkConfig::default(),
            spike_probability: 0.05,
            logs: LogMix::default(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in MetricKind::ALL {
            self.signals.get(kind).validate(kind)?;
        }
        self.walk.validate()?;
        check_probability("spike_probability", self.spike_probability)?;
        self.logs.validate()
    }
}

/// Shape of one signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalProfile {
    /// Lower clamp bound of the walk.
    pub min: f64,
    /// Upper clamp bound of the walk.
    pub max: f64,
    /// Value the walk starts from.
    pub initial: f64,
    /// Upper bound of the additive spike draw, `[0, spike_magnitude)`.
    pub spike_magnitude: f64,
    /// Absolute ceiling applied after a spike. `None` leaves the signal uncapped.
    #[serde(default)]
    pub spike_cap: Option<f64>,
}

impl SignalProfile {
    pub fn new(min: f64, max: f64, initial: f64, spike_magnitude: f64) -> Self {
        Self {
            min,
            max,
            initial,
            spike_magnitude,
            spike_cap: None,
        }
    }

    pub fn capped(mut self, cap: f64) -> Self {
        self.spike_cap = Some(cap);
        self
    }

    /// Highest value a snapshot may carry for this signal, if bounded.
    pub fn ceiling(&self) -> Option<f64> {
        self.spike_cap.map(|cap| cap.max(self.max))
    }

    pub fn validate(&self, metric: MetricKind) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min >= self.max {
            return Err(ConfigError::InvalidRange {
                metric,
                min: self.min,
                max: self.max,
            });
        }
        if !self.spike_magnitude.is_finite() || self.spike_magnitude < 0.0 {
            return Err(ConfigError::InvalidSpike {
                metric,
                magnitude: self.spike_magnitude,
            });
        }
        if let Some(cap) = self.spike_cap {
            if !cap.is_finite() || cap < self.max {
                return Err(ConfigError::InvalidSpikeCap {
                    metric,
                    cap,
                    max: self.max,
                });
            }
        }
        Ok(())
    }
}

/// Profiles for the four signals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalProfiles {
    pub cpu: SignalProfile,
    pub memory: SignalProfile,
    pub requests: SignalProfile,
    #[serde(alias = "responsetime")]
    pub response_time: SignalProfile,
}

impl Default for SignalProfiles {
    fn default() -> Self {
        Self {
            cpu: SignalProfile::new(10.0, 85.0, 45.0, 30.0).capped(98.0),
            memory: SignalProfile::new(30.0, 80.0, 60.0, 20.0).capped(95.0),
            requests: SignalProfile::new(50.0, 300.0, 150.0, 200.0),
            response_time: SignalProfile::new(50.0, 250.0, 120.0, 300.0),
        }
    }
}

impl SignalProfiles {
    pub fn get(&self, kind: MetricKind) -> &SignalProfile {
        match kind {
            MetricKind::Cpu => &self.cpu,
            MetricKind::Memory => &self.memory,
            MetricKind::Requests => &self.requests,
            MetricKind::ResponseTime => &self.response_time,
        }
    }
}

/// Random-walk parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Per-call probability of redrawing the trend.
    pub trend_refresh_probability: f64,
    /// Trend is redrawn uniformly from `[-trend_amplitude, trend_amplitude)`.
    pub trend_amplitude: f64,
    /// Per-call noise is drawn uniformly from `[-noise_amplitude, noise_amplitude)`.
    pub noise_amplitude: f64,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            trend_refresh_probability: 0.3,
            trend_amplitude: 5.0,
            noise_amplitude: 2.5,
        }
    }
}

impl WalkConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_probability("walk.trend_refresh_probability", self.trend_refresh_probability)?;
        if !self.trend_amplitude.is_finite() || self.trend_amplitude < 0.0 {
            return Err(ConfigError::Negative("walk.trend_amplitude"));
        }
        if !self.noise_amplitude.is_finite() || self.noise_amplitude < 0.0 {
            return Err(ConfigError::Negative("walk.noise_amplitude"));
        }
        Ok(())
    }
}

/// Probability of each non-info severity; info takes the remainder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogMix {
    pub error: f64,
    pub warning: f64,
}

impl Default for LogMix {
    fn default() -> Self {
        Self {
            error: 0.10,
            warning: 0.20,
        }
    }
}

impl LogMix {
    /// Map a uniform draw onto a severity: `[0, error)` is an error,
    /// `[error, error + warning)` a warning, the rest info.
    pub fn severity_for(&self, draw: f64) -> LogSeverity {
        if draw < self.error {
            LogSeverity::Error
        } else if draw < self.error + self.warning {
            LogSeverity::Warning
        } else {
            LogSeverity::Info
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_probability("logs.error", self.error)?;
        check_probability("logs.warning", self.warning)?;
        check_probability("logs.error + logs.warning", self.error + self.warning)
    }
}

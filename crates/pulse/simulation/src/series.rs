//! Bounded random walk with momentum for a single signal.

use crate::config::WalkConfig;
use crate::random::RandomSource;
use pulse_types::round_to;
use serde::{Deserialize, Serialize};

/// Internal state of one signal's walk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalState {
    pub current_value: f64,
    /// Signed delta applied on every tick.
    pub trend: f64,
}

impl SignalState {
    pub fn new(current_value: f64) -> Self {
        Self {
            current_value,
            trend: 0.0,
        }
    }
}

/// Produces the next value of one signal from its own trend state.
///
/// On each call the trend is redrawn with probability
/// `walk.trend_refresh_probability`; the value then moves by the trend plus
/// uniform noise and saturates at the caller's bounds.
#[derive(Debug, Clone)]
pub struct MetricSeriesGenerator {
    state: SignalState,
    walk: WalkConfig,
}

impl MetricSeriesGenerator {
    pub fn new(initial: f64, walk: WalkConfig) -> Self {
        Self::with_state(SignalState::new(initial), walk)
    }

    pub fn with_state(state: SignalState, walk: WalkConfig) -> Self {
        Self { state, walk }
    }

    pub fn state(&self) -> SignalState {
        self.state
    }

    /// Advance the walk and return the new value rounded to one decimal.
    ///
    /// Draw order: trend-refresh chance, trend (only when refreshed), noise.
    pub fn next(&mut self, min: f64, max: f64, rng: &mut impl RandomSource) -> f64 {
        if rng.chance(self.walk.trend_refresh_probability) {
            self.state.trend = rng.uniform(-self.walk.trend_amplitude, self.walk.trend_amplitude);
        }

        let noise = rng.uniform(-self.walk.noise_amplitude, self.walk.noise_amplitude);
        self.state.current_value =
            (self.state.current_value + self.state.trend + noise).clamp(min, max);

        round_to(self.state.current_value, 1)
    }
}

//! Last-fired bookkeeping per `(metric, level)`.

use chrono::{DateTime, TimeDelta, Utc};
use pulse_types::{AlertLevel, MetricKind};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct CooldownTracker {
    window: TimeDelta,
    last_fired: HashMap<(MetricKind, AlertLevel), DateTime<Utc>>,
}

impl CooldownTracker {
    pub fn new(window_ms: u64) -> Self {
        let window = i64::try_from(window_ms)
            .ok()
            .and_then(TimeDelta::try_milliseconds)
            .unwrap_or_else(TimeDelta::max_value);
        Self {
            window,
            last_fired: HashMap::new(),
        }
    }

    pub fn window(&self) -> TimeDelta {
        self.window
    }

    /// True unless the key fired within the window. A gap of exactly the
    /// window length is still suppressed.
    pub fn is_ready(&self, metric: MetricKind, level: AlertLevel, now: DateTime<Utc>) -> bool {
        match self.last_fired.get(&(metric, level)) {
            Some(last) => now.signed_duration_since(*last) > self.window,
            None => true,
        }
    }

    pub fn record(&mut self, metric: MetricKind, level: AlertLevel, now: DateTime<Utc>) {
        self.last_fired.insert((metric, level), now);
    }

    pub fn last_fired(&self, metric: MetricKind, level: AlertLevel) -> Option<DateTime<Utc>> {
        self.last_fired.get(&(metric, level)).copied()
    }
}

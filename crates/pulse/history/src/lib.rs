//! Pulse rolling history
//!
//! A fixed-capacity, insertion-ordered window of recent snapshots, stored as
//! parallel series so charts can consume each signal directly. All series
//! are evicted together, so index `i` always refers to the same snapshot.

#![deny(unsafe_code)]

use chrono::{DateTime, Utc};
use pulse_types::{ConfigError, HistoryView, MetricKind, MetricSnapshot};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default number of retained snapshots.
pub const DEFAULT_CAPACITY: usize = 30;

/// History configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl HistoryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::Zero("history.capacity"));
        }
        Ok(())
    }
}

/// Bounded FIFO of snapshots.
#[derive(Debug, Clone)]
pub struct RollingHistory {
    capacity: usize,
    timestamps: VecDeque<DateTime<Utc>>,
    /// Indexed in [`MetricKind::ALL`] order.
    series: [VecDeque<f64>; 4],
}

impl Default for RollingHistory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl RollingHistory {
    /// `capacity` is raised to at least one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            timestamps: VecDeque::with_capacity(capacity + 1),
            series: std::array::from_fn(|_| VecDeque::with_capacity(capacity + 1)),
        }
    }

    pub fn from_config(config: &HistoryConfig) -> Self {
        Self::new(config.capacity)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Append a snapshot, evicting the oldest entry of every series once the
    /// window is full.
    pub fn append(&mut self, snapshot: &MetricSnapshot) {
        self.timestamps.push_back(snapshot.timestamp);
        for (kind, series) in MetricKind::ALL.iter().zip(self.series.iter_mut()) {
            series.push_back(snapshot.value(*kind));
        }

        if self.timestamps.len() > self.capacity {
            self.timestamps.pop_front();
            for series in self.series.iter_mut() {
                series.pop_front();
            }
        }
    }

    /// Most recently appended snapshot.
    pub fn latest(&self) -> Option<MetricSnapshot> {
        self.len().checked_sub(1).and_then(|index| self.get(index))
    }

    /// Snapshot stored at `index` (0 is the oldest).
    pub fn get(&self, index: usize) -> Option<MetricSnapshot> {
        Some(MetricSnapshot {
            cpu: *self.series[0].get(index)?,
            memory: *self.series[1].get(index)?,
            requests_per_second: *self.series[2].get(index)?,
            response_time_ms: *self.series[3].get(index)?,
            timestamp: *self.timestamps.get(index)?,
        })
    }

    /// Copy of the whole window.
    pub fn snapshot(&self) -> HistoryView {
        self.last(self.capacity)
    }

    /// Copy of the last `n` points, oldest first.
    pub fn last(&self, n: usize) -> HistoryView {
        let skip = self.len().saturating_sub(n);
        let tail = |series: &VecDeque<f64>| series.iter().skip(skip).copied().collect();

        HistoryView {
            timestamps: self.timestamps.iter().skip(skip).copied().collect(),
            cpu: tail(&self.series[0]),
            memory: tail(&self.series[1]),
            requests: tail(&self.series[2]),
            response_time: tail(&self.series[3]),
        }
    }
}

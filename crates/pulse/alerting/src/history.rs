//! Bounded, newest-first alert history.

use pulse_types::Alert;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct AlertHistory {
    capacity: usize,
    alerts: VecDeque<Alert>,
}

impl AlertHistory {
    /// `capacity` is raised to at least one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            alerts: VecDeque::with_capacity(capacity + 1),
        }
    }

    /// Insert at the front, dropping the oldest alert when full.
    pub fn push(&mut self, alert: Alert) {
        self.alerts.push_front(alert);
        self.alerts.truncate(self.capacity);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn latest(&self) -> Option<&Alert> {
        self.alerts.front()
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter()
    }

    pub fn to_vec(&self) -> Vec<Alert> {
        self.alerts.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pulse_types::{AlertLevel, MetricKind};

    fn alert(value: f64) -> Alert {
        Alert::new(MetricKind::Cpu, value, AlertLevel::Warning, 70.0, Utc::now())
    }

    #[test]
    fn test_newest_first_with_eviction() {
        let mut history = AlertHistory::new(50);
        for i in 0..60 {
            history.push(alert(i as f64));
        }

        assert_eq!(history.len(), 50);
        assert_eq!(history.latest().map(|a| a.value), Some(59.0));
        let values: Vec<f64> = history.iter().map(|a| a.value).collect();
        assert_eq!(values.first(), Some(&59.0));
        assert_eq!(values.last(), Some(&10.0));
    }

    #[test]
    fn test_to_vec_preserves_order() {
        let mut history = AlertHistory::new(3);
        history.push(alert(1.0));
        history.push(alert(2.0));
        let values: Vec<f64> = history.to_vec().into_iter().map(|a| a.value).collect();
        assert_eq!(values, vec![2.0, 1.0]);
    }
}

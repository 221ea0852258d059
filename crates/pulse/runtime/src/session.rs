//! Per-observer catch-up and live delivery.

use crate::broadcast::ObserverGuard;
use pulse_types::{Alert, DashboardEvent, HistoryView};
use tokio::sync::broadcast::{self, error::RecvError};

/// A connected observer.
///
/// The catch-up views and the live receiver were taken at the same instant:
/// the first live snapshot is the one appended right after `history`.
/// Dropping the session disconnects the observer.
#[derive(Debug)]
pub struct ObserverSession {
    history: HistoryView,
    alerts: Vec<Alert>,
    receiver: broadcast::Receiver<DashboardEvent>,
    _guard: ObserverGuard,
}

impl ObserverSession {
    pub(crate) fn new(
        history: HistoryView,
        alerts: Vec<Alert>,
        receiver: broadcast::Receiver<DashboardEvent>,
        guard: ObserverGuard,
    ) -> Self {
        Self {
            history,
            alerts,
            receiver,
            _guard: guard,
        }
    }

    pub fn history(&self) -> &HistoryView {
        &self.history
    }

    /// Alert history at connect time, newest first.
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// `history-snapshot` followed by `alert-history`.
    pub fn catch_up(&self) -> [DashboardEvent; 2] {
        [
            DashboardEvent::HistorySnapshot(self.history.clone()),
            DashboardEvent::AlertHistory(self.alerts.clone()),
        ]
    }

    /// Next live event.
    pub async fn recv(&mut self) -> Result<DashboardEvent, RecvError> {
        self.receiver.recv().await
    }
}

//! Fan-out of dashboard events to every connected observer.

use pulse_types::DashboardEvent;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Publishes [`DashboardEvent`]s and tracks how many observers are attached.
///
/// Publishing never blocks; observers that fall behind the channel capacity
/// miss events and see `RecvError::Lagged`.
#[derive(Debug, Clone)]
pub struct Broadcaster {
    sender: broadcast::Sender<DashboardEvent>,
    observers: Arc<AtomicUsize>,
}

impl Broadcaster {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            observers: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Returns the number of receivers the event was queued for.
    pub fn publish(&self, event: DashboardEvent) -> usize {
        let name = event.name();
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(_) => {
                tracing::trace!(event = name, "No observers connected, event dropped");
                0
            }
        }
    }

    /// Subscribe an observer and announce the new observer count.
    ///
    /// The receiver is attached before the announcement, so the new observer
    /// sees its own arrival.
    pub fn attach(&self) -> (broadcast::Receiver<DashboardEvent>, ObserverGuard) {
        let receiver = self.sender.subscribe();
        let observers = self.observers.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(observers, "Observer connected");
        self.publish(DashboardEvent::ObserverCount { observers });

        let guard = ObserverGuard {
            broadcaster: self.clone(),
        };
        (receiver, guard)
    }

    /// Plain receiver that does not count as an observer.
    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.sender.subscribe()
    }

    pub fn observers(&self) -> usize {
        self.observers.load(Ordering::SeqCst)
    }

    fn detach(&self) {
        let observers = self
            .observers
            .fetch_sub(1, Ordering::SeqCst)
            .saturating_sub(1);
        tracing::info!(observers, "Observer disconnected");
        self.publish(DashboardEvent::ObserverCount { observers });
    }
}

/// Counts one observer for as long as it lives.
#[derive(Debug)]
pub struct ObserverGuard {
    broadcaster: Broadcaster,
}

impl Drop for ObserverGuard {
    fn drop(&mut self) {
        self.broadcaster.detach();
    }
}

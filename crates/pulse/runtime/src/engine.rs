//! Telemetry engine: tick pipeline, catch-up and background drivers.

use crate::broadcast::Broadcaster;
use crate::config::PulseConfig;
use crate::error::{RuntimeError, RuntimeResult};
use crate::session::ObserverSession;
use chrono::{DateTime, Utc};
use pulse_alerting::AlertEvaluator;
use pulse_history::RollingHistory;
use pulse_simulation::{LogEventGenerator, MetricSnapshotGenerator, RandomSource};
use pulse_types::{
    Alert, DashboardEvent, HistoryView, LogEvent, MetricKind, MetricSnapshot, Thresholds,
};
use rand::{rngs::StdRng, SeedableRng};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};

/// Result of one metric tick.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricTick {
    pub snapshot: MetricSnapshot,
    pub alerts: Vec<Alert>,
}

/// Handles of the two background drivers.
#[derive(Debug)]
pub struct DriverHandles {
    pub metrics: JoinHandle<()>,
    pub logs: JoinHandle<()>,
}

impl DriverHandles {
    /// Wait for both drivers to exit.
    pub async fn join(self) {
        if let Err(err) = self.metrics.await {
            tracing::warn!(error = %err, "Metric driver ended abnormally");
        }
        if let Err(err) = self.logs.await {
            tracing::warn!(error = %err, "Log driver ended abnormally");
        }
    }
}

/// Owns every piece of mutable telemetry state.
///
/// Each structure sits behind its own lock. When more than one is held the
/// order is history, then alerts. A metric tick publishes while still holding
/// the history write lock, which makes [`TelemetryEngine::connect`] atomic with
/// respect to appends.
pub struct TelemetryEngine<R = StdRng> {
    config: PulseConfig,
    snapshots: Mutex<MetricSnapshotGenerator<R>>,
    logs: Mutex<LogEventGenerator<R>>,
    history: RwLock<RollingHistory>,
    alerts: Mutex<AlertEvaluator>,
    broadcaster: Broadcaster,
    started: AtomicBool,
}

impl TelemetryEngine<StdRng> {
    /// Validate `config` and build an engine with entropy-seeded generators.
    pub fn new(config: PulseConfig) -> RuntimeResult<Self> {
        let snapshots = MetricSnapshotGenerator::new(config.simulation.clone());
        let logs = LogEventGenerator::new(config.simulation.logs);
        Self::with_generators(config, snapshots, logs)
    }
}

impl<R: RandomSource + Send + 'static> TelemetryEngine<R> {
    pub fn with_generators(
        config: PulseConfig,
        snapshots: MetricSnapshotGenerator<R>,
        logs: LogEventGenerator<R>,
    ) -> RuntimeResult<Self> {
        config.validate()?;

        Ok(Self {
            history: RwLock::new(RollingHistory::from_config(&config.history)),
            alerts: Mutex::new(AlertEvaluator::new(config.alerting.clone())),
            broadcaster: Broadcaster::new(config.channel.capacity),
            snapshots: Mutex::new(snapshots),
            logs: Mutex::new(logs),
            started: AtomicBool::new(false),
            config,
        })
    }

    pub fn config(&self) -> &PulseConfig {
        &self.config
    }

    pub fn broadcaster(&self) -> &Broadcaster {
        &self.broadcaster
    }

    /// Run one metric tick against the wall clock.
    pub fn tick_metrics(&self) -> RuntimeResult<MetricTick> {
        self.tick_metrics_at(Utc::now())
    }

    /// Generate, append to history, evaluate alerts, publish.
    ///
    /// Publishes the snapshot first, then each alert in evaluation order.
    pub fn tick_metrics_at(&self, now: DateTime<Utc>) -> RuntimeResult<MetricTick> {
        let snapshot = self
            .snapshots
            .lock()
            .map_err(|_| RuntimeError::LockPoisoned("snapshot generator"))?
            .generate_at(now);

        let mut history = self
            .history
            .write()
            .map_err(|_| RuntimeError::LockPoisoned("history"))?;
        history.append(&snapshot);

        let alerts = self
            .alerts
            .lock()
            .map_err(|_| RuntimeError::LockPoisoned("alerts"))?
            .evaluate_at(&snapshot, now);

        tracing::debug!(
            cpu = snapshot.cpu,
            memory = snapshot.memory,
            requests = snapshot.requests_per_second,
            response_time = snapshot.response_time_ms,
            alerts = alerts.len(),
            "Metric tick"
        );

        self.broadcaster
            .publish(DashboardEvent::MetricSnapshot(snapshot.clone()));
        for alert in &alerts {
            self.broadcaster
                .publish(DashboardEvent::AlertRaised(alert.clone()));
        }
        drop(history);

        Ok(MetricTick { snapshot, alerts })
    }

    /// Generate and publish one log event.
    pub fn tick_log(&self) -> RuntimeResult<LogEvent> {
        let log = self
            .logs
            .lock()
            .map_err(|_| RuntimeError::LockPoisoned("log generator"))?
            .generate();

        tracing::trace!(severity = %log.severity, endpoint = %log.endpoint, "Log tick");
        self.broadcaster.publish(DashboardEvent::LogEvent(log.clone()));
        Ok(log)
    }

    /// Attach a new observer with its catch-up state.
    pub fn connect(&self) -> RuntimeResult<ObserverSession> {
        let history = self
            .history
            .read()
            .map_err(|_| RuntimeError::LockPoisoned("history"))?;
        let alerts = self
            .alerts
            .lock()
            .map_err(|_| RuntimeError::LockPoisoned("alerts"))?
            .history()
            .to_vec();

        let (receiver, guard) = self.broadcaster.attach();
        let view = history.snapshot();
        drop(history);

        Ok(ObserverSession::new(view, alerts, receiver, guard))
    }

    /// Live receiver without catch-up or presence tracking.
    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.broadcaster.subscribe()
    }

    pub fn history(&self) -> RuntimeResult<HistoryView> {
        self.read_history(|history| history.snapshot())
    }

    /// The last `n` points, oldest first.
    pub fn recent(&self, n: usize) -> RuntimeResult<HistoryView> {
        self.read_history(|history| history.last(n))
    }

    pub fn history_len(&self) -> RuntimeResult<usize> {
        self.read_history(|history| history.len())
    }

    /// Newest first.
    pub fn alert_history(&self) -> RuntimeResult<Vec<Alert>> {
        self.with_alerts(|evaluator| evaluator.history().to_vec())
    }

    pub fn thresholds(&self) -> RuntimeResult<BTreeMap<MetricKind, Thresholds>> {
        self.with_alerts(|evaluator| evaluator.thresholds().clone())
    }

    pub fn observers(&self) -> usize {
        self.broadcaster.observers()
    }

    /// Spawn the metric and log drivers. Returns `None` if already started.
    ///
    /// Both drivers exit once `shutdown` holds `true` or its sender is gone.
    pub fn start(self: &Arc<Self>, shutdown: watch::Receiver<bool>) -> Option<DriverHandles> {
        if self
            .started
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return None;
        }

        tracing::info!(
            tick_interval_ms = self.config.schedule.tick_interval_ms,
            log_jitter_min_ms = self.config.schedule.log_jitter_min_ms,
            log_jitter_max_ms = self.config.schedule.log_jitter_max_ms,
            "Telemetry drivers started"
        );

        let metrics = tokio::spawn(run_metric_driver(self.clone(), shutdown.clone()));
        let logs = tokio::spawn(run_log_driver(self.clone(), shutdown));
        Some(DriverHandles { metrics, logs })
    }

    fn read_history<T>(&self, f: impl FnOnce(&RollingHistory) -> T) -> RuntimeResult<T> {
        let history = self
            .history
            .read()
            .map_err(|_| RuntimeError::LockPoisoned("history"))?;
        Ok(f(&history))
    }

    fn with_alerts<T>(&self, f: impl FnOnce(&AlertEvaluator) -> T) -> RuntimeResult<T> {
        let evaluator = self
            .alerts
            .lock()
            .map_err(|_| RuntimeError::LockPoisoned("alerts"))?;
        Ok(f(&evaluator))
    }
}

/// True once shutdown was requested or can no longer be signalled.
async fn stopped(shutdown: &mut watch::Receiver<bool>) -> bool {
    match shutdown.changed().await {
        Ok(()) => *shutdown.borrow(),
        Err(_) => true,
    }
}

async fn run_metric_driver<R: RandomSource + Send + 'static>(
    engine: Arc<TelemetryEngine<R>>,
    mut shutdown: watch::Receiver<bool>,
) {
    let period = engine.config.schedule.tick_interval();
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    while !*shutdown.borrow() {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(err) = engine.tick_metrics() {
                    tracing::warn!(error = %err, "Metric tick failed");
                }
            }
            stop = stopped(&mut shutdown) => {
                if stop {
                    break;
                }
            }
        }
    }

    tracing::info!("Metric driver stopped");
}

async fn run_log_driver<R: RandomSource + Send + 'static>(
    engine: Arc<TelemetryEngine<R>>,
    mut shutdown: watch::Receiver<bool>,
) {
    let schedule = engine.config.schedule;
    let mut rng = StdRng::from_entropy();
    let mut delay = schedule.initial_log_delay();

    while !*shutdown.borrow() {
        tokio::select! {
            _ = sleep(delay) => {
                if let Err(err) = engine.tick_log() {
                    tracing::warn!(error = %err, "Log tick failed");
                }
                delay = schedule.next_log_delay(&mut rng);
            }
            stop = stopped(&mut shutdown) => {
                if stop {
                    break;
                }
            }
        }
    }

    tracing::info!("Log driver stopped");
}

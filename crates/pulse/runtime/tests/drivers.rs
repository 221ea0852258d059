//! Background drivers under a paused tokio clock.

use pulse_runtime::{PulseConfig, TelemetryEngine};
use pulse_types::DashboardEvent;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast::error::TryRecvError, watch};

fn drain(receiver: &mut tokio::sync::broadcast::Receiver<DashboardEvent>) -> Vec<DashboardEvent> {
    let mut events = Vec::new();
    loop {
        match receiver.try_recv() {
            Ok(event) => events.push(event),
            Err(TryRecvError::Lagged(_)) => continue,
            Err(_) => return events,
        }
    }
}

fn count(events: &[DashboardEvent], name: &str) -> usize {
    events.iter().filter(|e| e.name() == name).count()
}

#[tokio::test(start_paused = true)]
async fn metric_driver_ticks_on_fixed_period() {
    let engine = Arc::new(TelemetryEngine::new(PulseConfig::default()).unwrap());
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut receiver = engine.subscribe();
    let handles = engine.start(shutdown_rx).unwrap();

    tokio::time::sleep(Duration::from_millis(1_900)).await;
    assert_eq!(engine.history_len().unwrap(), 0);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(engine.history_len().unwrap(), 1);

    tokio::time::sleep(Duration::from_secs(8)).await;
    assert_eq!(engine.history_len().unwrap(), 5);
    assert_eq!(count(&drain(&mut receiver), "metric-snapshot"), 5);

    shutdown_tx.send(true).unwrap();
    handles.join().await;
}

#[tokio::test(start_paused = true)]
async fn log_driver_respects_initial_delay_and_jitter() {
    let engine = Arc::new(TelemetryEngine::new(PulseConfig::default()).unwrap());
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut receiver = engine.subscribe();
    let handles = engine.start(shutdown_rx).unwrap();

    tokio::time::sleep(Duration::from_millis(900)).await;
    assert_eq!(count(&drain(&mut receiver), "log-event"), 0);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(count(&drain(&mut receiver), "log-event"), 1);

    // Every later gap is between 1s and 3s.
    tokio::time::sleep(Duration::from_secs(30)).await;
    let logs = count(&drain(&mut receiver), "log-event");
    assert!((10..=30).contains(&logs), "{logs} log events in 30s");

    shutdown_tx.send(true).unwrap();
    handles.join().await;
}

#[tokio::test(start_paused = true)]
async fn second_start_is_noop_and_shutdown_stops_drivers() {
    let engine = Arc::new(TelemetryEngine::new(PulseConfig::default()).unwrap());
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let handles = engine.start(shutdown_rx.clone()).unwrap();
    assert!(engine.start(shutdown_rx).is_none());

    tokio::time::sleep(Duration::from_millis(4_100)).await;
    shutdown_tx.send(true).unwrap();
    handles.join().await;

    let len = engine.history_len().unwrap();
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(engine.history_len().unwrap(), len);
}

#[tokio::test(start_paused = true)]
async fn observer_joining_mid_run_sees_no_gap() {
    let engine = Arc::new(TelemetryEngine::new(PulseConfig::default()).unwrap());
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handles = engine.start(shutdown_rx).unwrap();

    tokio::time::sleep(Duration::from_millis(7_000)).await;
    let mut session = engine.connect().unwrap();
    let caught_up = session.history().len();
    assert_eq!(caught_up, 3);

    tokio::time::sleep(Duration::from_millis(2_000)).await;
    let mut live = Vec::new();
    while let Ok(Ok(event)) = tokio::time::timeout(Duration::ZERO, session.recv()).await {
        if let DashboardEvent::MetricSnapshot(snapshot) = event {
            live.push(snapshot);
        }
    }

    let history = engine.history().unwrap();
    assert_eq!(live.len(), 1);
    assert_eq!(history.point(caught_up), Some(live[0].clone()));

    shutdown_tx.send(true).unwrap();
    handles.join().await;
}

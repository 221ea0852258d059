//! Alert flow across a run of 2-second ticks with a sustained breach.

use chrono::{DateTime, Utc};
use pulse_alerting::AlertEvaluator;
use pulse_types::{AlertLevel, MetricKind, MetricSnapshot};

fn tick(n: i64, cpu: f64) -> (MetricSnapshot, DateTime<Utc>) {
    let now = DateTime::<Utc>::from_timestamp(1_700_000_000 + 2 * n, 0).unwrap();
    let snapshot = MetricSnapshot {
        cpu,
        memory: 60.0,
        requests_per_second: 150.0,
        response_time_ms: 120.0,
        timestamp: now,
    };
    (snapshot, now)
}

#[test]
fn sustained_warning_fires_once_per_window() {
    let mut evaluator = AlertEvaluator::default();
    let mut fired_at = Vec::new();

    // 20 ticks = 40s of cpu pinned at 80%.
    for n in 0..20 {
        let (snapshot, now) = tick(n, 80.0);
        if !evaluator.evaluate_at(&snapshot, now).is_empty() {
            fired_at.push(n);
        }
    }

    // Strict 10s window on a 2s tick: ticks 0, 6, 12, 18.
    assert_eq!(fired_at, vec![0, 6, 12, 18]);
}

#[test]
fn escalation_and_recovery() {
    let mut evaluator = AlertEvaluator::default();
    let readings = [72.0, 75.0, 93.0, 96.0, 40.0, 71.0];
    let mut levels = Vec::new();

    for (n, cpu) in readings.iter().enumerate() {
        let (snapshot, now) = tick(n as i64, *cpu);
        levels.extend(evaluator.evaluate_at(&snapshot, now).into_iter().map(|a| a.level));
    }

    // Warning at t=0, critical at t=4; t=10 is still inside the warning window.
    assert_eq!(levels, vec![AlertLevel::Warning, AlertLevel::Critical]);

    let alerts: Vec<_> = evaluator.history().iter().collect();
    assert_eq!(alerts[0].level, AlertLevel::Critical);
    assert_eq!(alerts[0].metric, MetricKind::Cpu);
    assert_eq!(alerts[1].value, 72.0);
}

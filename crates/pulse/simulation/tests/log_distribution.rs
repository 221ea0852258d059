//! Statistical checks on synthesized log records.

use pulse_simulation::{
    response_time_range, status_codes, templates, LogEventGenerator, LogMix,
};
use pulse_types::LogSeverity;
use rand::{rngs::StdRng, SeedableRng};
use std::collections::HashMap;

const SAMPLES: usize = 100_000;

#[test]
fn severity_mix_matches_configured_split() {
    let mut generator = LogEventGenerator::with_rng(LogMix::default(), StdRng::seed_from_u64(42));
    let mut counts: HashMap<LogSeverity, usize> = HashMap::new();

    for _ in 0..SAMPLES {
        *counts.entry(generator.generate().severity).or_default() += 1;
    }

    let share = |severity: LogSeverity| counts.get(&severity).copied().unwrap_or(0) as f64 / SAMPLES as f64;
    // Standard error at n = 100k is below 0.0015 for every share; allow ~6 sigma.
    assert!((share(LogSeverity::Info) - 0.70).abs() < 0.01, "info {}", share(LogSeverity::Info));
    assert!((share(LogSeverity::Warning) - 0.20).abs() < 0.01, "warning {}", share(LogSeverity::Warning));
    assert!((share(LogSeverity::Error) - 0.10).abs() < 0.01, "error {}", share(LogSeverity::Error));
}

#[test]
fn every_field_comes_from_its_severity_set() {
    let mut generator = LogEventGenerator::with_rng(LogMix::default(), StdRng::seed_from_u64(7));

    for _ in 0..SAMPLES {
        let log = generator.generate();

        assert!(status_codes(log.severity).contains(&log.status_code));

        let (low, high) = response_time_range(log.severity);
        let latency = log.response_time_ms as f64;
        assert!(latency >= low && latency <= high);

        assert!(templates(log.severity)
            .iter()
            .any(|t| t.message == log.message && t.endpoint == log.endpoint));

        let octets = log.source_ip.octets();
        assert_eq!(&octets[..2], &[192, 168]);
        assert!(octets[2] <= 254 && octets[3] <= 254);
    }
}

#[test]
fn error_records_never_carry_success_codes() {
    let mut generator = LogEventGenerator::with_rng(
        LogMix { error: 1.0, warning: 0.0 },
        StdRng::seed_from_u64(3),
    );
    for _ in 0..1_000 {
        let log = generator.generate();
        assert_eq!(log.severity, LogSeverity::Error);
        assert!(log.status_code >= 400);
    }
}

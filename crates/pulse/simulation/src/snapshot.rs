//! Composes the four signal walks into one timestamped snapshot.

use crate::config::SimulationConfig;
use crate::random::RandomSource;
use crate::series::{MetricSeriesGenerator, SignalState};
use chrono::{DateTime, Utc};
use pulse_types::{round_to, MetricKind, MetricSnapshot};
use rand::{rngs::StdRng, SeedableRng};

/// Snapshot generator driving one walk per [`MetricKind`].
///
/// With probability `spike_probability` a tick is a correlated spike: after
/// the normal walk step every signal receives an independent additive draw
/// from `[0, spike_magnitude)`, capped at the signal's ceiling where one is set. The
/// spike does not feed back into the walk state.
pub struct MetricSnapshotGenerator<R = StdRng> {
    config: SimulationConfig,
    /// Indexed in [`MetricKind::ALL`] order.
    series: [MetricSeriesGenerator; 4],
    rng: R,
}

impl MetricSnapshotGenerator<StdRng> {
    pub fn new(config: SimulationConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: RandomSource> MetricSnapshotGenerator<R> {
    pub fn with_rng(config: SimulationConfig, rng: R) -> Self {
        let series = MetricKind::ALL
            .map(|kind| MetricSeriesGenerator::new(config.signals.get(kind).initial, config.walk));

        Self {
            config,
            series,
            rng,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Current walk state of one signal.
    pub fn signal_state(&self, kind: MetricKind) -> SignalState {
        self.series[slot(kind)].state()
    }

    /// Replace the walk state of one signal.
    pub fn seed_signal(&mut self, kind: MetricKind, state: SignalState) {
        self.series[slot(kind)] = MetricSeriesGenerator::with_state(state, self.config.walk);
    }

    /// Generate the next snapshot, stamped with the current instant.
    pub fn generate(&mut self) -> MetricSnapshot {
        self.generate_at(Utc::now())
    }

    /// Generate the next snapshot with an explicit timestamp.
    ///
    /// Draw order: spike chance, the four walks in evaluation order, then one
    /// magnitude per signal when spiking.
    pub fn generate_at(&mut self, timestamp: DateTime<Utc>) -> MetricSnapshot {
        let spike = self.rng.chance(self.config.spike_probability);

        let mut values = [0.0; 4];
        for ((kind, generator), value) in MetricKind::ALL
            .iter()
            .zip(self.series.iter_mut())
            .zip(values.iter_mut())
        {
            let profile = self.config.signals.get(*kind);
            *value = generator.next(profile.min, profile.max, &mut self.rng);
        }

        if spike {
            for (kind, value) in MetricKind::ALL.iter().zip(values.iter_mut()) {
                let profile = self.config.signals.get(*kind);
                *value += self.rng.uniform(0.0, profile.spike_magnitude);
                if let Some(ceiling) = profile.ceiling() {
                    *value = value.min(ceiling);
                }
            }
            tracing::debug!(
                cpu = values[0],
                memory = values[1],
                requests = values[2],
                response_time = values[3],
                "Correlated spike applied"
            );
        }

        for (kind, value) in MetricKind::ALL.iter().zip(values.iter_mut()) {
            *value = round_to(*value, kind.precision());
        }

        MetricSnapshot {
            cpu: values[0],
            memory: values[1],
            requests_per_second: values[2],
            response_time_ms: values[3],
            timestamp,
        }
    }
}

fn slot(kind: MetricKind) -> usize {
    match kind {
        MetricKind::Cpu => 0,
        MetricKind::Memory => 1,
        MetricKind::Requests => 2,
        MetricKind::ResponseTime => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedSource;

    fn no_spike_config() -> SimulationConfig {
        SimulationConfig {
            spike_probability: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_starts_from_initial_values() {
        let generator = MetricSnapshotGenerator::with_rng(no_spike_config(), ScriptedSource::constant(0.5));
        assert_eq!(generator.signal_state(MetricKind::Cpu).current_value, 45.0);
        assert_eq!(generator.signal_state(MetricKind::Memory).current_value, 60.0);
        assert_eq!(generator.signal_state(MetricKind::Requests).current_value, 150.0);
        assert_eq!(
            generator.signal_state(MetricKind::ResponseTime).current_value,
            120.0
        );
    }

    #[test]
    fn test_cpu_clamps_to_range_max() {
        // Spike chance 0.9 (no spike), then per signal: refresh 0.9 (skip), noise 0.8 (+1.5).
        let mut generator = MetricSnapshotGenerator::with_rng(
            SimulationConfig::default(),
            ScriptedSource::new([0.9, 0.9, 0.8, 0.9, 0.8, 0.9, 0.8, 0.9, 0.8]),
        );
        generator.seed_signal(
            MetricKind::Cpu,
            SignalState {
                current_value: 89.0,
                trend: 0.0,
            },
        );

        let snapshot = generator.generate();
        assert_eq!(snapshot.cpu, 85.0);
        assert_eq!(snapshot.memory, 61.5);
        assert_eq!(snapshot.requests_per_second, 152.0);
        assert_eq!(snapshot.response_time_ms, 122.0);
    }

    #[test]
    fn test_spike_respects_caps() {
        let mut config = SimulationConfig {
            spike_probability: 1.0,
            ..Default::default()
        };
        config.walk.noise_amplitude = 0.0;
        // Every draw is 0.99: trend refresh skipped, full-size spike magnitudes.
        let mut generator = MetricSnapshotGenerator::with_rng(config, ScriptedSource::constant(0.99));
        generator.seed_signal(MetricKind::Cpu, SignalState::new(85.0));
        generator.seed_signal(MetricKind::Memory, SignalState::new(80.0));

        let snapshot = generator.generate();
        assert_eq!(snapshot.cpu, 98.0);
        assert_eq!(snapshot.memory, 95.0);
        assert_eq!(snapshot.requests_per_second, 348.0);
        assert_eq!(snapshot.response_time_ms, 417.0);
    }

    #[test]
    fn test_spike_does_not_move_walk_state() {
        let mut generator = MetricSnapshotGenerator::with_rng(
            SimulationConfig {
                spike_probability: 1.0,
                ..Default::default()
            },
            ScriptedSource::constant(0.5),
        );
        generator.generate();
        // 0.5 never refreshes the trend and yields zero noise.
        assert_eq!(generator.signal_state(MetricKind::Requests).current_value, 150.0);
    }

    #[test]
    fn test_spike_never_lowers_a_value() {
        let mut config = SimulationConfig {
            spike_probability: 1.0,
            ..Default::default()
        };
        config.signals.cpu.spike_cap = Some(5.0);
        let mut generator = MetricSnapshotGenerator::with_rng(config, ScriptedSource::constant(0.5));

        // Walk holds cpu at 45, the spike adds half of 30.
        let snapshot = generator.generate();
        assert_eq!(snapshot.cpu, 60.0);
    }

    #[test]
    fn test_precision_per_signal() {
        let mut generator = MetricSnapshotGenerator::with_rng(
            SimulationConfig {
                spike_probability: 1.0,
                ..Default::default()
            },
            rand::rngs::StdRng::seed_from_u64(21),
        );
        for _ in 0..200 {
            let s = generator.generate();
            assert_eq!(s.requests_per_second.fract(), 0.0);
            assert_eq!(s.response_time_ms.fract(), 0.0);
            assert_eq!(round_to(s.cpu, 1), s.cpu);
        }
    }
}

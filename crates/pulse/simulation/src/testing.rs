//! Deterministic random sources for tests.

use crate::random::RandomSource;

/// Replays a fixed sequence of unit draws, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    /// `draws` must be non-empty and every value must lie in `[0, 1)`.
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        let draws = draws.into();
        assert!(!draws.is_empty(), "scripted source needs at least one draw");
        Self { draws, cursor: 0 }
    }

    /// Source that always yields `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        value
    }
}

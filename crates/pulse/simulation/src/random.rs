//! Injectable source of uniform draws.

use rand::{Rng, RngCore};

/// Source of uniform draws in `[0, 1)`.
///
/// Every generator takes its randomness through this trait, so tests can
/// substitute a seeded [`rand::rngs::StdRng`] or a scripted sequence.
pub trait RandomSource {
    /// Next uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform draw in `[low, high)`.
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_unit()
    }

    /// `true` with the given probability.
    fn chance(&mut self, probability: f64) -> bool {
        self.next_unit() < probability
    }

    /// Uniform index into a collection of `len` elements. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize {
        ((self.next_unit() * len as f64) as usize).min(len.saturating_sub(1))
    }
}

impl<R: RngCore> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

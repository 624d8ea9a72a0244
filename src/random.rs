//! Pseudo-random generator shared by `urand`, `nrand` and `rands`.
//!
//! One `RandomState` lives in each [`Environment`](crate::evaluator::Environment)
//! and every random node evaluated against that environment draws from it, so
//! reseeding with `rands(...)` affects all later draws, including draws made by
//! unrelated expressions.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seed used when no explicit seed was given.
pub const DEFAULT_SEED: u32 = 1;

#[derive(Debug, Clone)]
pub struct RandomState {
    rng: StdRng,
    seed: u32,
    /// Second deviate of the last Box-Muller pair, returned by the next call
    cached_normal: Option<f64>,
}

impl Default for RandomState {
    fn default() -> Self {
        RandomState::seeded(DEFAULT_SEED)
    }
}

impl RandomState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(seed: u32) -> Self {
        RandomState {
            rng: StdRng::seed_from_u64(u64::from(seed)),
            seed,
            cached_normal: None,
        }
    }

    /// Restarts the sequence. Drops any cached normal deviate.
    pub fn reseed(&mut self, seed: u32) {
        *self = RandomState::seeded(seed);
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Uniform draw in `[0, 1)`.
    pub fn next_unit(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }

    /// Uniform draw between `min` and `max`. Bounds may be given in either
    /// order; NaN bounds give NaN.
    pub fn uniform(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_unit() * (max - min)
    }

    /// Standard normal deviate (mean 0, sigma 1).
    ///
    /// Box-Muller: each pair of uniform draws yields two independent
    /// deviates; the first is returned and the second is kept for the
    /// following call.
    pub fn standard_normal(&mut self) -> f64 {
        if let Some(z) = self.cached_normal.take() {
            return z;
        }
        // u in (0, 1] so that ln(u) is finite
        let u = 1.0 - self.next_unit();
        let v = self.next_unit();
        let radius = (-2.0 * u.ln()).sqrt();
        let angle = 2.0 * std::f64::consts::PI * v;
        self.cached_normal = Some(radius * angle.cos());
        radius * angle.sin()
    }

    /// Normal draw with the given mean and standard deviation.
    pub fn normal(&mut self, mean: f64, sigma: f64) -> f64 {
        mean + sigma * self.standard_normal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reseed_restarts_sequence() {
        let mut state = RandomState::seeded(42);
        let first: Vec<f64> = (0..4).map(|_| state.uniform(0.0, 10.0)).collect();
        state.reseed(42);
        let second: Vec<f64> = (0..4).map(|_| state.uniform(0.0, 10.0)).collect();
        assert_eq!(first, second);
        assert!(first.iter().all(|v| (0.0..10.0).contains(v)));
    }

    #[test]
    fn test_normal_pairs_share_one_draw() {
        let mut a = RandomState::seeded(7);
        let mut b = RandomState::seeded(7);
        let z0 = a.standard_normal();
        let z1 = a.standard_normal();
        // the second deviate came from the cache: no uniform draw consumed
        let _ = b.standard_normal();
        assert_eq!(a.next_unit(), b.next_unit());
        assert!(z0.is_finite() && z1.is_finite());
    }

    #[test]
    fn test_reseed_clears_cached_deviate() {
        let mut state = RandomState::seeded(3);
        let expected = state.standard_normal();
        state.reseed(3);
        let _ = RandomState::seeded(99).standard_normal();
        assert_eq!(state.standard_normal(), expected);
        assert_eq!(state.seed(), 3);
    }
}

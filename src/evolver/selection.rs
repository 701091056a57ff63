//! Fitness-proportional ("roulette wheel") parent sampling.

use rand::distributions::{Distribution, Uniform, WeightedIndex};
use rand::Rng;

use crate::error::ContractError;

/// Samples population indices with probability proportional to their weight.
///
/// When fewer than two weights are positive the wheel degrades to uniform
/// sampling over every index. This covers an all-zero score vector and keeps
/// distinct-pair sampling from looping forever on a single survivor.
#[derive(Debug, Clone)]
pub enum RouletteWheel {
    Weighted(WeightedIndex<f64>),
    Uniform(Uniform<usize>),
}

impl RouletteWheel {
    /// Builds a wheel over `weights`.
    pub fn new(weights: &[f64]) -> Result<Self, ContractError> {
        if weights.is_empty() {
            return Err(ContractError::PopulationTooSmall(0));
        }
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ContractError::InvalidWeights);
        }

        let positive = weights.iter().filter(|w| **w > 0.0).count();
        if positive < 2 {
            return Ok(RouletteWheel::Uniform(Uniform::new(0, weights.len())));
        }

        WeightedIndex::new(weights)
            .map(RouletteWheel::Weighted)
            .map_err(|_| ContractError::InvalidWeights)
    }

    /// Draws one index.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        match self {
            RouletteWheel::Weighted(dist) => dist.sample(rng),
            RouletteWheel::Uniform(dist) => dist.sample(rng),
        }
    }

    /// Draws two distinct indices, redrawing both on a collision.
    ///
    /// Callers must guarantee at least two candidates (`new` with two or more
    /// weights); a single-entry wheel would never terminate.
    pub fn sample_pair<R: Rng + ?Sized>(&self, rng: &mut R) -> (usize, usize) {
        loop {
            let a = self.sample(rng);
            let b = self.sample(rng);
            if a != b {
                return (a, b);
            }
        }
    }
}

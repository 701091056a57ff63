//! Configuration for the evolutionary search.

use crate::error::ContractError;
use crate::genome::Genome;
use crate::reward::RewardSchedule;
use crate::world::{HEIGHT, WIDTH};

/// Parameters of an evolutionary run.
///
/// Grid dimensions are fixed at compile time (see [`crate::world`]); all other
/// knobs live here.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolutionConfig {
    // --- Population ---
    /// Number of genomes per generation (constant across generations).
    pub population_size: usize,
    /// Number of generations to breed.
    pub generations: u64,
    /// Point mutations applied to each child (must be < 243).
    pub mutation_count: usize,

    // --- Episodes ---
    /// Probability that a cell starts with an item.
    pub fill_rate: f64,
    /// Step budget per episode.
    pub max_steps: u32,
    /// Reward shaping.
    pub rewards: RewardSchedule,

    /// Seed for the shared random stream (`None` = seed from entropy).
    pub seed: Option<u64>,
}

impl EvolutionConfig {
    /// Checks every precondition the evolver relies on.
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.population_size < 2 {
            return Err(ContractError::PopulationTooSmall(self.population_size));
        }
        if self.mutation_count >= Genome::LENGTH {
            return Err(ContractError::MutationCountTooLarge {
                count: self.mutation_count,
                limit: Genome::LENGTH,
            });
        }
        if !(0.0..=1.0).contains(&self.fill_rate) {
            return Err(ContractError::InvalidFillRate(self.fill_rate));
        }
        Ok(())
    }
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 10_000,
            generations: 1_000_000,
            mutation_count: 1,
            fill_rate: 0.2,
            max_steps: (WIDTH * HEIGHT) as u32,
            rewards: RewardSchedule::default(),
            seed: None,
        }
    }
}

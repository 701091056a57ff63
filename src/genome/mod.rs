//! Policy tables and the genetic operators acting on them.

pub mod action;

pub use action::Action;

use std::fmt;

use rand::Rng;

use crate::error::ContractError;
use crate::sensor::SensorReading;

/// A complete policy: one [`Action`] for every sensor code.
///
/// The table is a fixed-size array, so every entry always holds a valid
/// action after construction, crossover or mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genome {
    rules: [Action; Genome::LENGTH],
}

impl Genome {
    /// Table length, one entry per sensor code.
    pub const LENGTH: usize = SensorReading::COMBINATIONS;

    /// Creates a table drawing every entry uniformly from all actions.
    pub fn create_random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut rules = [Action::StayPut; Self::LENGTH];
        for rule in rules.iter_mut() {
            *rule = rng.gen();
        }
        Self { rules }
    }

    /// Creates a table mapping every code to the same action.
    pub fn uniform(action: Action) -> Self {
        Self {
            rules: [action; Self::LENGTH],
        }
    }

    /// Single-point crossover with a uniformly drawn split in `[0, LENGTH)`.
    ///
    /// The child takes entries `[0, k)` from `parent_a` and `[k, LENGTH)` from
    /// `parent_b`. A split of 0 yields a copy of `parent_b`.
    pub fn crossover<R: Rng + ?Sized>(parent_a: &Genome, parent_b: &Genome, rng: &mut R) -> Self {
        let split = rng.gen_range(0..Self::LENGTH);
        Self::splice(parent_a, parent_b, split)
    }

    /// Single-point crossover at a fixed split index.
    pub fn crossover_at(
        parent_a: &Genome,
        parent_b: &Genome,
        split: usize,
    ) -> Result<Self, ContractError> {
        if split > Self::LENGTH {
            return Err(ContractError::InvalidSplit {
                split,
                limit: Self::LENGTH,
            });
        }
        Ok(Self::splice(parent_a, parent_b, split))
    }

    fn splice(parent_a: &Genome, parent_b: &Genome, split: usize) -> Self {
        let mut rules = parent_b.rules;
        rules[..split].copy_from_slice(&parent_a.rules[..split]);
        Self { rules }
    }

    /// Overwrites `mutation_count` uniformly chosen entries with uniformly
    /// chosen actions.
    ///
    /// Draws are independent, so the same entry can be hit more than once and
    /// the number of distinct changed entries may be lower than requested.
    pub fn mutate<R: Rng + ?Sized>(
        &mut self,
        mutation_count: usize,
        rng: &mut R,
    ) -> Result<(), ContractError> {
        if mutation_count >= Self::LENGTH {
            return Err(ContractError::MutationCountTooLarge {
                count: mutation_count,
                limit: Self::LENGTH,
            });
        }
        for _ in 0..mutation_count {
            let index = rng.gen_range(0..Self::LENGTH);
            self.rules[index] = rng.gen();
        }
        Ok(())
    }

    /// Action prescribed for a sensor code.
    pub fn action_for(&self, code: usize) -> Result<Action, ContractError> {
        self.rules
            .get(code)
            .copied()
            .ok_or(ContractError::InvalidSensorCode(code))
    }

    /// Replaces the action for a sensor code.
    pub fn set(&mut self, code: usize, action: Action) -> Result<(), ContractError> {
        let rule = self
            .rules
            .get_mut(code)
            .ok_or(ContractError::InvalidSensorCode(code))?;
        *rule = action;
        Ok(())
    }

    /// The full table in code order.
    pub fn rules(&self) -> &[Action] {
        &self.rules
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (reading, action) in SensorReading::all().zip(self.rules.iter()) {
            writeln!(f, "{}-> {}", reading, action)?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Genome {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rules.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Genome {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rules: Vec<Action> = Vec::deserialize(deserializer)?;
        let len = rules.len();
        let rules: [Action; Genome::LENGTH] = rules.try_into().map_err(|_| {
            serde::de::Error::invalid_length(len, &"a table of 243 actions")
        })?;
        Ok(Self { rules })
    }
}

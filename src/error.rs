use thiserror::Error;

/// Precondition failures raised at the boundary of public operations.
///
/// Every variant indicates a caller bug rather than a transient condition,
/// so nothing in the crate retries on these.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ContractError {
    #[error("Sensor code {0} is out of range (expected < 243)")]
    InvalidSensorCode(usize),

    #[error("Coordinate ({x}, {y}) lies outside the grid")]
    InvalidCoordinate { x: i32, y: i32 },

    #[error("Mutation count {count} must be smaller than the genome length {limit}")]
    MutationCountTooLarge { count: usize, limit: usize },

    #[error("Crossover split {split} exceeds the genome length {limit}")]
    InvalidSplit { split: usize, limit: usize },

    #[error("Population size {0} is too small (at least 2 genomes are needed to breed)")]
    PopulationTooSmall(usize),

    #[error("Population has {genomes} genomes but {scores} scores")]
    LengthMismatch { genomes: usize, scores: usize },

    #[error("Fill rate {0} must lie within [0, 1]")]
    InvalidFillRate(f64),

    #[error("Sampling weights must be finite and non-negative")]
    InvalidWeights,
}

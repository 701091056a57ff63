//! canbot - evolving lookup-table policies for a can-collecting robot
//!
//! A robot on a small grid senses its own cell and its four neighbours,
//! looks the reading up in a 243-entry policy table, and acts. A genetic
//! algorithm breeds those tables with fitness-proportional selection,
//! single-point crossover and point mutation.

pub mod config;
pub mod error;
pub mod evolver;
pub mod genome;
pub mod reward;
pub mod sensor;
pub mod simulator;
pub mod types;
pub mod world;

pub use config::EvolutionConfig;
pub use error::ContractError;
pub use evolver::{Evolver, GenerationReport, Population, ProgressSink};
pub use genome::{Action, Genome};
pub use reward::RewardSchedule;
pub use sensor::{SensorReading, SensorState};
pub use simulator::{Episode, Simulator};
pub use types::{Direction, Position};
pub use world::GridWorld;

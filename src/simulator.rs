//! Episode simulation: one genome driving one agent through one world.
//!
//! Each step the agent reads its five sensors, looks up the action for the
//! encoded reading, and applies it:
//! read → look up → resolve random move → pick or move → wall check.

use rand::Rng;
use tracing::trace;

use crate::error::ContractError;
use crate::genome::{Action, Genome};
use crate::reward::RewardSchedule;
use crate::types::Position;
use crate::world::GridWorld;

/// Outcome of a single episode.
#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    /// Accumulated reward (may be negative).
    pub reward: f64,
    /// Number of steps executed.
    pub steps: u32,
    /// Items removed from the world.
    pub items_picked: usize,
    /// Agent position when the episode ended.
    pub final_position: Position,
}

/// Runs genomes against worlds under a fixed reward schedule.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    rewards: RewardSchedule,
}

impl Simulator {
    /// Creates a simulator with the given reward schedule.
    pub fn new(rewards: RewardSchedule) -> Self {
        Self { rewards }
    }

    /// The reward schedule in use.
    pub fn rewards(&self) -> &RewardSchedule {
        &self.rewards
    }

    /// Runs an episode from the grid center and returns its reward.
    pub fn simulate<R: Rng + ?Sized>(
        &self,
        genome: &Genome,
        world: &mut GridWorld,
        max_steps: u32,
        rng: &mut R,
    ) -> Result<f64, ContractError> {
        self.run_from(genome, world, GridWorld::center(), max_steps, rng)
            .map(|episode| episode.reward)
    }

    /// Runs an episode starting at `start`.
    ///
    /// The episode lasts at most `max_steps` steps and ends as soon as the
    /// world holds no items; a world that starts empty yields a zero-step
    /// episode. The world is mutated by picks.
    pub fn run_from<R: Rng + ?Sized>(
        &self,
        genome: &Genome,
        world: &mut GridWorld,
        start: Position,
        max_steps: u32,
        rng: &mut R,
    ) -> Result<Episode, ContractError> {
        if !GridWorld::is_valid_coordinate(start.x, start.y) {
            return Err(ContractError::InvalidCoordinate {
                x: start.x,
                y: start.y,
            });
        }

        let mut position = start;
        let mut reward = 0.0;
        let mut steps = 0;
        let mut items_picked = 0;

        while steps < max_steps && world.remaining_item_count() > 0 {
            let code = world.read_sensors(position.x, position.y).encode();
            let action = genome.action_for(code)?;

            let direction = match action {
                Action::StayPut => None,
                Action::TryPick => {
                    let picked = world.try_pick_at(position.x, position.y)?;
                    if picked {
                        items_picked += 1;
                    }
                    reward += self.rewards.pick(picked);
                    None
                }
                // Drawn only when the action fires.
                Action::MoveRandom => Some(rng.gen()),
                fixed => fixed.direction(),
            };

            if let Some(direction) = direction {
                let destination = position.offset(direction);
                if GridWorld::is_valid_coordinate(destination.x, destination.y) {
                    position = destination;
                } else {
                    reward += self.rewards.wall_penalty;
                }
            }

            steps += 1;
        }

        trace!(reward, steps, items_picked, "episode finished");

        Ok(Episode {
            reward,
            steps,
            items_picked,
            final_position: position,
        })
    }
}

//! Actions a policy table can prescribe.

use std::fmt;

use rand::distributions::{Distribution, Standard};
use rand::Rng;

use crate::types::Direction;

/// One entry of a policy table.
///
/// `MoveRandom` is stored as-is and only resolved to a concrete direction
/// when the simulator executes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    StayPut,
    TryPick,
    MoveRandom,
    MoveNorth,
    MoveEast,
    MoveSouth,
    MoveWest,
}

impl Action {
    /// Number of distinct actions.
    pub const COUNT: usize = 7;

    /// Returns all actions in declaration order.
    pub fn all() -> [Action; Action::COUNT] {
        [
            Action::StayPut,
            Action::TryPick,
            Action::MoveRandom,
            Action::MoveNorth,
            Action::MoveEast,
            Action::MoveSouth,
            Action::MoveWest,
        ]
    }

    /// Fixed direction of a move action, if it has one.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Action::MoveNorth => Some(Direction::North),
            Action::MoveEast => Some(Direction::East),
            Action::MoveSouth => Some(Direction::South),
            Action::MoveWest => Some(Direction::West),
            Action::StayPut | Action::TryPick | Action::MoveRandom => None,
        }
    }
}

impl Distribution<Action> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Action {
        Action::all()[rng.gen_range(0..Action::COUNT)]
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::StayPut => "Stay",
            Action::TryPick => "Try Pick",
            Action::MoveRandom => "Move Random",
            Action::MoveNorth => "Move North",
            Action::MoveEast => "Move East",
            Action::MoveSouth => "Move South",
            Action::MoveWest => "Move West",
        };
        f.write_str(label)
    }
}

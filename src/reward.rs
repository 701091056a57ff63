//! Reward schedule for episodes and the fitness derived from it.

/// Points awarded or deducted for each episode event.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardSchedule {
    /// Awarded when a pick removes an item.
    pub success_points: f64,
    /// Added when a pick finds nothing (negative).
    pub fail_penalty: f64,
    /// Added when a move would leave the grid (negative).
    pub wall_penalty: f64,
}

impl RewardSchedule {
    /// Reward for a pick attempt.
    pub fn pick(&self, picked: bool) -> f64 {
        if picked {
            self.success_points
        } else {
            self.fail_penalty
        }
    }

    /// Best reward reachable in a world holding `items` items.
    pub fn max_possible(&self, items: usize) -> f64 {
        items as f64 * self.success_points
    }

    /// Normalized fitness of an episode.
    ///
    /// Positive rewards are divided by [`RewardSchedule::max_possible`];
    /// a non-positive reward yields exactly `0.0`.
    pub fn fitness(&self, reward: f64, items: usize) -> f64 {
        let max_possible = self.max_possible(items);
        if reward > 0.0 && max_possible > 0.0 {
            reward / max_possible
        } else {
            0.0
        }
    }
}

impl Default for RewardSchedule {
    fn default() -> Self {
        Self {
            success_points: 10.0,
            fail_penalty: -1.0,
            wall_penalty: -5.0,
        }
    }
}

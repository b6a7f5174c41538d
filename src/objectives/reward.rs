//! Reward resolution.
//!
//! Rewards follow the same difficulty fallback as condition parameters:
//! an explicit override for the active difficulty wins, else `easy`, else
//! `hard`, else the base amount.

use crate::core::Difficulty;

use super::definition::{ObjectiveDefinition, ObjectiveSet};
use super::state::ObjectiveState;

impl ObjectiveDefinition {
    /// Resolve the reward for a difficulty.
    #[must_use]
    pub fn reward_for(&self, difficulty: Option<Difficulty>) -> i64 {
        if let Some(d) = difficulty {
            if let Some(&reward) = self.reward_overrides.get(&d) {
                return reward;
            }
        }
        self.reward_overrides
            .get(&Difficulty::Easy)
            .or_else(|| self.reward_overrides.get(&Difficulty::Hard))
            .copied()
            .unwrap_or(self.reward)
    }
}

/// Total bonus gold from completed objectives. Failed and pending
/// objectives contribute nothing.
#[must_use]
pub fn calculate_objective_bonus(
    objectives: &ObjectiveSet,
    states: &[ObjectiveState],
    difficulty: Option<Difficulty>,
) -> i64 {
    states
        .iter()
        .filter(|state| state.is_completed())
        .filter_map(|state| objectives.get(state.id))
        .map(|definition| definition.reward_for(difficulty))
        .sum()
}

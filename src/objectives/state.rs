//! Per-session objective state and the batch check.
//!
//! An objective is Pending until a check transitions it to Completed or
//! Failed; both are terminal. The flags are private so the only writers
//! are the transition methods, which refuse to touch a terminal record.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::warn;

use crate::conditions::{ConditionEvaluator, EvalContext, Progress};
use crate::core::BoardSnapshot;
use crate::tracking::ObjectiveTracking;

use super::definition::{ObjectiveId, ObjectiveSet};

/// Per-session state of one objective.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveState {
    /// The definition this state belongs to.
    pub id: ObjectiveId,

    completed: bool,
    failed: bool,

    /// Latest evaluated progress.
    pub progress: Option<Progress>,

    /// Turn on which the objective completed.
    pub completed_on_turn: Option<u32>,

    /// Turn on which the objective failed.
    pub failed_on_turn: Option<u32>,
}

impl ObjectiveState {
    /// Create a pending state.
    #[must_use]
    pub fn new(id: ObjectiveId) -> Self {
        Self {
            id,
            completed: false,
            failed: false,
            progress: None,
            completed_on_turn: None,
            failed_on_turn: None,
        }
    }

    /// Has the objective completed?
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Has the objective failed?
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Is the objective still undecided?
    #[must_use]
    pub fn is_pending(&self) -> bool {
        !self.completed && !self.failed
    }

    /// Transition to Completed. No-op once terminal.
    pub(crate) fn complete(&mut self, turn: u32) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.completed = true;
        self.completed_on_turn = Some(turn);
        true
    }

    /// Transition to Failed. No-op once terminal.
    pub(crate) fn fail(&mut self, turn: u32) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.failed = true;
        self.failed_on_turn = Some(turn);
        true
    }
}

/// Ids that transitioned during one batch check. Never includes ids that
/// were already terminal before the call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjectiveDelta {
    /// Newly completed objective ids.
    pub completed: SmallVec<[ObjectiveId; 4]>,
    /// Newly failed objective ids.
    pub failed: SmallVec<[ObjectiveId; 4]>,
}

impl ObjectiveDelta {
    /// Did nothing transition?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.completed.is_empty() && self.failed.is_empty()
    }
}

/// Seed one pending state per definition, carrying authored initial
/// progress.
#[must_use]
pub fn initialize_objective_states(objectives: &ObjectiveSet) -> Vec<ObjectiveState> {
    objectives
        .iter()
        .map(|definition| {
            let mut state = ObjectiveState::new(definition.id);
            state.progress = definition.initial_progress;
            state
        })
        .collect()
}

/// Evaluate every still-pending objective and apply transitions.
///
/// `allow_non_permanent` is the caller's protocol: when `false`, only
/// conditions whose met state cannot regress may complete; the host passes
/// `true` at level end to settle the rest. Failure transitions are applied
/// regardless, after the completion check, so one call can never leave a
/// record in both terminal states.
pub fn check_all_objectives(
    objectives: &ObjectiveSet,
    states: &mut [ObjectiveState],
    tracking: &ObjectiveTracking,
    board: Option<&BoardSnapshot>,
    allow_non_permanent: bool,
) -> ObjectiveDelta {
    let mut ctx = EvalContext::new(tracking);
    if let Some(board) = board {
        ctx = ctx.with_board(board);
    }

    let turn = tracking.turn();
    let mut delta = ObjectiveDelta::default();

    for state in states.iter_mut().filter(|s| s.is_pending()) {
        let Some(definition) = objectives.get(state.id) else {
            warn!(id = %state.id, "objective state has no definition");
            continue;
        };

        let result = ConditionEvaluator::evaluate(&definition.condition, &ctx);

        if let Some(progress) = result.progress {
            state.progress = Some(progress);
        }

        if result.met && (result.permanently_met || allow_non_permanent) {
            if state.complete(turn) {
                delta.completed.push(state.id);
            }
        } else if result.failed && state.fail(turn) {
            delta.failed.push(state.id);
        }
    }

    delta
}

//! # objective-engine
//!
//! Optional objective evaluation engine for a chess-roguelike.
//!
//! The host game loop feeds telemetry into a per-session
//! [`ObjectiveTracking`] record as events occur (pieces lost, kills,
//! items used, the king moving). At each checkpoint it calls
//! [`check_all_objectives`], which evaluates every still-pending
//! objective's condition and returns the ids that just completed or
//! failed; rewards and display text are then resolved per objective.
//!
//! ## Design Principles
//!
//! 1. **Declarative conditions**: objectives are data - a condition kind
//!    plus parameters, with per-difficulty overrides merged key by key.
//!
//! 2. **Terminal states stay terminal**: once an objective completes or
//!    fails, no later evaluation can alter it.
//!
//! 3. **Degrade, never fault**: unknown kinds, malformed parameters, and
//!    unresolvable templates produce neutral results or best-effort text
//!    plus a `tracing` diagnostic - evaluation itself cannot fail.
//!
//! ## Modules
//!
//! - `core`: pieces, board positions, difficulty
//! - `tracking`: per-session telemetry fed by game-loop events
//! - `conditions`: condition specs, parameters, and the evaluator
//! - `objectives`: definitions, per-session states, batch check, rewards
//! - `text`: description templating and progress display

pub mod conditions;
pub mod core;
pub mod objectives;
pub mod text;
pub mod tracking;

// Re-export commonly used types
pub use crate::core::{
    BoardPos, BoardSnapshot, Difficulty, KingDefeat, Piece, PieceColor, PieceType,
    VictoryCondition, BOARD_SIZE,
};

pub use crate::tracking::{KillFilter, KillRecord, ObjectiveTracking, WinningPiece};

pub use crate::conditions::{
    Condition, ConditionEvaluator, ConditionKind, EvalContext, EvalResult, ParamValue, Params,
    Progress,
};

pub use crate::objectives::{
    calculate_objective_bonus, check_all_objectives, initialize_objective_states,
    ObjectiveDefinition, ObjectiveDelta, ObjectiveId, ObjectiveSet, ObjectiveSetError,
    ObjectiveState,
};

pub use crate::text::{describe_objective, expand_template, MAX_EXPANSION_PASSES};

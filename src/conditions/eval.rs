//! Condition evaluation.
//!
//! `ConditionEvaluator` maps a condition spec plus the current tracking
//! record (and an optional board snapshot) to an `EvalResult`. Evaluation
//! is pure: no side effects, no panics, always a well-formed result.
//! Malformed parameters and the inert kinds degrade to a neutral result
//! with a `tracing` diagnostic.
//!
//! "Met" and "permanently met" are distinct: a threshold that cannot be
//! un-crossed (kill at least N) reports `permanently_met` and may lock in
//! mid-level, while a condition that can still regress (casualties under a
//! cap) only completes when the caller allows it, at level end.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{BoardSnapshot, PieceType};
use crate::tracking::{KillFilter, ObjectiveTracking};

use super::params::Params;
use super::spec::{Condition, ConditionKind};

/// Progress toward a numeric goal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Current count.
    pub current: u32,
    /// Target count. A zero target is informational only and is not
    /// displayed.
    pub target: u32,
}

impl Progress {
    /// Create a progress pair.
    #[must_use]
    pub const fn new(current: u32, target: u32) -> Self {
        Self { current, target }
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.current, self.target)
    }
}

/// Result of evaluating one condition. Transient - recomputed every check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvalResult {
    /// The condition holds right now.
    pub met: bool,

    /// The condition can no longer be satisfied this session.
    pub failed: bool,

    /// The satisfied state cannot regress; the objective may lock in
    /// before level end.
    pub permanently_met: bool,

    /// Progress toward the goal, when the kind tracks one.
    pub progress: Option<Progress>,
}

impl EvalResult {
    /// Neutral result: not met, not failed. The unknown/custom outcome.
    #[must_use]
    pub const fn inert() -> Self {
        Self {
            met: false,
            failed: false,
            permanently_met: false,
            progress: None,
        }
    }

    /// Result from a met/failed pair.
    #[must_use]
    pub const fn status(met: bool, failed: bool) -> Self {
        Self {
            met,
            failed,
            permanently_met: false,
            progress: None,
        }
    }

    /// Attach progress (builder pattern).
    #[must_use]
    pub const fn with_progress(mut self, current: u32, target: u32) -> Self {
        self.progress = Some(Progress::new(current, target));
        self
    }

    /// Mark the met state as unable to regress (builder pattern).
    #[must_use]
    pub const fn locked_when_met(mut self) -> Self {
        self.permanently_met = self.met;
        self
    }
}

/// Inputs for one evaluation.
pub struct EvalContext<'a> {
    /// Current session telemetry.
    pub tracking: &'a ObjectiveTracking,
    /// Board snapshot, when the host can provide one.
    pub board: Option<&'a BoardSnapshot>,
}

impl<'a> EvalContext<'a> {
    /// Create a context without a board snapshot.
    #[must_use]
    pub fn new(tracking: &'a ObjectiveTracking) -> Self {
        Self {
            tracking,
            board: None,
        }
    }

    /// Attach a board snapshot (builder pattern).
    #[must_use]
    pub fn with_board(mut self, board: &'a BoardSnapshot) -> Self {
        self.board = Some(board);
        self
    }
}

/// How a kill count compares against its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Comparison {
    Exact,
    AtLeast,
    AtMost,
}

impl Comparison {
    fn parse(text: &str) -> Option<Self> {
        match text {
            "exact" => Some(Comparison::Exact),
            "atleast" => Some(Comparison::AtLeast),
            "atmost" => Some(Comparison::AtMost),
            _ => None,
        }
    }
}

/// Evaluator for condition specs.
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Evaluate a condition against the session.
    ///
    /// Difficulty is read from the tracking record and applied to the
    /// condition's parameter overrides before evaluation.
    #[must_use]
    pub fn evaluate(condition: &Condition, ctx: &EvalContext) -> EvalResult {
        let params = condition.effective_params(ctx.tracking.difficulty());

        match condition.kind {
            ConditionKind::NoPieceTypeLost => Self::no_piece_type_lost(&params, ctx),
            ConditionKind::WinUnderTurns => Self::win_under_turns(&params, ctx),
            ConditionKind::KingAtPosition => Self::king_at_position(&params, ctx),
            ConditionKind::ConvertPieces => Self::convert_pieces(&params, ctx),
            ConditionKind::KillCount => Self::kill_count(&params, ctx),
            ConditionKind::NoItemUsed => Self::no_item_used(&params, ctx),
            ConditionKind::MaxCasualties => Self::max_casualties(&params, ctx),
            ConditionKind::KeepKingDisguised => {
                let disguised = ctx.tracking.king_disguised();
                EvalResult::status(disguised, !disguised)
            }
            ConditionKind::CheckmateWithPiece => Self::checkmate_with_piece(&params, ctx),
            ConditionKind::DontKillCourtiers => Self::dont_kill_courtiers(&params, ctx),
            ConditionKind::Custom => {
                warn!(kind = "custom", "inert condition kind evaluated");
                EvalResult::inert()
            }
            ConditionKind::Unknown => {
                warn!(kind = "unknown", "unrecognized condition kind evaluated");
                EvalResult::inert()
            }
        }
    }

    fn no_piece_type_lost(params: &Params, ctx: &EvalContext) -> EvalResult {
        let Some(kind) = required_piece_type(params, "pieceType") else {
            return EvalResult::inert();
        };

        match params.text("pieceName") {
            None => {
                let lost = ctx.tracking.losses_of(kind);
                EvalResult::status(lost == 0, lost > 0).with_progress(lost, 0)
            }
            Some(name) => {
                let lost = ctx
                    .tracking
                    .losses()
                    .iter()
                    .any(|p| p.kind == kind && p.is_named(name));
                // Presence on the board can only be checked when the host
                // supplied a snapshot.
                let absent = ctx
                    .board
                    .map(|board| !board.has_piece_named(name))
                    .unwrap_or(false);

                let failed = lost || absent;
                EvalResult::status(!failed, failed)
            }
        }
    }

    fn win_under_turns(params: &Params, ctx: &EvalContext) -> EvalResult {
        let Some(limit) = required_int(params, "maxTurns", ConditionKind::WinUnderTurns) else {
            return EvalResult::inert();
        };

        let turn = ctx.tracking.turn();
        EvalResult::status(i64::from(turn) <= limit, i64::from(turn) > limit)
            .with_progress(turn, clamp_target(limit))
    }

    fn king_at_position(params: &Params, ctx: &EvalContext) -> EvalResult {
        let rank = params.int("rank");
        let file = params.int("file");
        let edge = params.text("edge");

        if rank.is_none() && file.is_none() && edge.is_none() {
            warn!(
                kind = %ConditionKind::KingAtPosition,
                "condition specifies no rank, file, or edge"
            );
            return EvalResult::inert();
        }

        let Some(pos) = ctx.tracking.king_position() else {
            return EvalResult::inert();
        };

        let met = rank.is_none_or(|r| i64::from(pos.rank) == r)
            && file.is_none_or(|f| i64::from(pos.file) == f)
            && edge.is_none_or(|e| pos.matches_edge(e));

        // Only finalized at level end; never failed mid-level.
        EvalResult::status(met, false)
    }

    fn convert_pieces(params: &Params, ctx: &EvalContext) -> EvalResult {
        let Some(target) = required_int(params, "count", ConditionKind::ConvertPieces) else {
            return EvalResult::inert();
        };

        let converted = ctx.tracking.conversions();
        EvalResult::status(i64::from(converted) >= target, false)
            .with_progress(converted, clamp_target(target))
            .locked_when_met()
    }

    fn kill_count(params: &Params, ctx: &EvalContext) -> EvalResult {
        let Some(target) = required_int(params, "count", ConditionKind::KillCount) else {
            return EvalResult::inert();
        };

        let comparison = match params.text("comparison") {
            None => Comparison::AtLeast,
            Some(text) => Comparison::parse(text).unwrap_or_else(|| {
                warn!(comparison = text, "unrecognized kill_count comparison");
                Comparison::AtLeast
            }),
        };

        let mut filter = KillFilter::default();
        if params.text("pieceType").is_some() {
            let Some(kind) = required_piece_type(params, "pieceType") else {
                return EvalResult::inert();
            };
            filter.victim_kind = Some(kind);
        }
        if params.text("killerType").is_some() {
            let Some(kind) = required_piece_type(params, "killerType") else {
                return EvalResult::inert();
            };
            filter.killer_kind = Some(kind);
        }
        filter.killer_name = params.text("killerName").map(str::to_string);
        filter.killer_terrain = params.text("killerTerrain").map(str::to_string);
        filter.victim_stunned = params.bool("stunned");

        let count = i64::from(ctx.tracking.kill_count(&filter));
        let result = match comparison {
            Comparison::Exact => EvalResult::status(count == target, false),
            Comparison::AtLeast => EvalResult::status(count >= target, false).locked_when_met(),
            // "at most" fails strictly on exceeding, not on equaling.
            Comparison::AtMost => EvalResult::status(count <= target, count > target),
        };
        result.with_progress(count.max(0) as u32, clamp_target(target))
    }

    fn no_item_used(params: &Params, ctx: &EvalContext) -> EvalResult {
        let Some(item) = params.text("itemType") else {
            warn!(kind = %ConditionKind::NoItemUsed, "missing itemType parameter");
            return EvalResult::inert();
        };

        let used = ctx.tracking.was_item_used(item);
        EvalResult::status(!used, used)
    }

    fn max_casualties(params: &Params, ctx: &EvalContext) -> EvalResult {
        let Some(limit) = required_int(params, "maxLosses", ConditionKind::MaxCasualties) else {
            return EvalResult::inert();
        };

        let losses = ctx.tracking.total_losses();
        EvalResult::status(i64::from(losses) <= limit, i64::from(losses) > limit)
            .with_progress(losses, clamp_target(limit))
    }

    fn checkmate_with_piece(params: &Params, ctx: &EvalContext) -> EvalResult {
        let Some(required) = required_piece_type(params, "pieceType") else {
            return EvalResult::inert();
        };

        match ctx.tracking.winning_piece() {
            // The winning blow is only known once the level is decided.
            None => EvalResult::inert(),
            Some(winner) => {
                let met = winner.original_kind == required;
                EvalResult::status(met, !met).locked_when_met()
            }
        }
    }

    fn dont_kill_courtiers(params: &Params, ctx: &EvalContext) -> EvalResult {
        let Some(limit) = required_int(params, "maxKills", ConditionKind::DontKillCourtiers)
        else {
            return EvalResult::inert();
        };

        let destroyed = ctx.tracking.courtiers_destroyed();
        EvalResult::status(i64::from(destroyed) <= limit, i64::from(destroyed) > limit)
            .with_progress(destroyed, clamp_target(limit))
    }
}

fn required_int(params: &Params, key: &str, kind: ConditionKind) -> Option<i64> {
    let value = params.int(key);
    if value.is_none() {
        warn!(kind = %kind, param = key, "missing or non-integer parameter");
    }
    value
}

fn required_piece_type(params: &Params, key: &str) -> Option<PieceType> {
    let Some(text) = params.text(key) else {
        warn!(param = key, "missing piece type parameter");
        return None;
    };
    let kind = PieceType::parse(text);
    if kind.is_none() {
        warn!(param = key, value = text, "unrecognized piece type");
    }
    kind
}

fn clamp_target(target: i64) -> u32 {
    target.clamp(0, i64::from(u32::MAX)) as u32
}

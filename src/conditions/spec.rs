//! Condition specs.
//!
//! A condition is a kind plus its parameters, with optional per-difficulty
//! parameter overrides. Kinds are a closed set - authored content naming a
//! kind this engine does not know deserializes to `Unknown` and evaluates
//! inert rather than failing the load.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::Difficulty;

use super::params::{ParamValue, Params};

/// The closed set of condition kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    /// No piece of a given type lost (optionally a specific named piece).
    NoPieceTypeLost,
    /// Win within a turn limit.
    WinUnderTurns,
    /// King standing on a target square or edge area (level-end check).
    KingAtPosition,
    /// Convert at least N enemy pieces.
    ConvertPieces,
    /// Kill count compared against a target, with optional filters.
    KillCount,
    /// Never use a given item kind.
    NoItemUsed,
    /// Lose at most N pieces.
    MaxCasualties,
    /// Keep the king's disguise active.
    KeepKingDisguised,
    /// Deliver the winning blow with a given piece type.
    CheckmateWithPiece,
    /// Destroy at most N courtier obstacles.
    DontKillCourtiers,
    /// Inert placeholder for externally-scripted goals.
    Custom,
    /// Catch-all for kind strings this engine does not recognize.
    #[serde(other)]
    Unknown,
}

impl ConditionKind {
    /// Authored snake_case name (the serialization form).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ConditionKind::NoPieceTypeLost => "no_piece_type_lost",
            ConditionKind::WinUnderTurns => "win_under_turns",
            ConditionKind::KingAtPosition => "king_at_position",
            ConditionKind::ConvertPieces => "convert_pieces",
            ConditionKind::KillCount => "kill_count",
            ConditionKind::NoItemUsed => "no_item_used",
            ConditionKind::MaxCasualties => "max_casualties",
            ConditionKind::KeepKingDisguised => "keep_king_disguised",
            ConditionKind::CheckmateWithPiece => "checkmate_with_piece",
            ConditionKind::DontKillCourtiers => "dont_kill_courtiers",
            ConditionKind::Custom => "custom",
            ConditionKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A condition spec: kind, base parameters, per-difficulty overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// What to evaluate.
    pub kind: ConditionKind,

    /// Base parameter set.
    #[serde(default, skip_serializing_if = "Params::is_empty")]
    pub params: Params,

    /// Per-difficulty parameter overrides, merged key-by-key over the base.
    #[serde(default, skip_serializing_if = "FxHashMap::is_empty")]
    pub overrides: FxHashMap<Difficulty, Params>,
}

impl Condition {
    /// Create a condition with no parameters.
    #[must_use]
    pub fn new(kind: ConditionKind) -> Self {
        Self {
            kind,
            params: Params::new(),
            overrides: FxHashMap::default(),
        }
    }

    /// Add a base parameter (builder pattern).
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.set(key, value);
        self
    }

    /// Add a difficulty override set (builder pattern).
    #[must_use]
    pub fn with_override(mut self, difficulty: Difficulty, params: Params) -> Self {
        self.overrides.insert(difficulty, params);
        self
    }

    /// Resolve the effective parameters for a difficulty.
    ///
    /// With a difficulty, its override set (if any) is merged key-by-key
    /// over the base. With none, the `easy` set stands in if present, else
    /// `hard`, else the base alone.
    #[must_use]
    pub fn effective_params(&self, difficulty: Option<Difficulty>) -> Params {
        let chosen = match difficulty {
            Some(d) => self.overrides.get(&d),
            None => self
                .overrides
                .get(&Difficulty::Easy)
                .or_else(|| self.overrides.get(&Difficulty::Hard)),
        };

        match chosen {
            Some(overrides) => self.params.merged(overrides),
            None => self.params.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_override_applies() {
        let condition = Condition::new(ConditionKind::MaxCasualties)
            .with_param("maxLosses", 3)
            .with_override(Difficulty::Hard, Params::new().with("maxLosses", 1));

        let hard = condition.effective_params(Some(Difficulty::Hard));
        assert_eq!(hard.int("maxLosses"), Some(1));

        let easy = condition.effective_params(Some(Difficulty::Easy));
        assert_eq!(easy.int("maxLosses"), Some(3));
    }

    #[test]
    fn test_no_difficulty_falls_back_easy_then_hard() {
        let hard_only = Condition::new(ConditionKind::MaxCasualties)
            .with_param("maxLosses", 3)
            .with_override(Difficulty::Hard, Params::new().with("maxLosses", 1));
        assert_eq!(hard_only.effective_params(None).int("maxLosses"), Some(1));

        let both = Condition::new(ConditionKind::MaxCasualties)
            .with_param("maxLosses", 3)
            .with_override(Difficulty::Easy, Params::new().with("maxLosses", 5))
            .with_override(Difficulty::Hard, Params::new().with("maxLosses", 1));
        assert_eq!(both.effective_params(None).int("maxLosses"), Some(5));

        let base_only =
            Condition::new(ConditionKind::MaxCasualties).with_param("maxLosses", 3);
        assert_eq!(base_only.effective_params(None).int("maxLosses"), Some(3));
    }

    #[test]
    fn test_merge_keeps_unrelated_keys() {
        let condition = Condition::new(ConditionKind::KillCount)
            .with_param("count", 3)
            .with_param("pieceType", "knight")
            .with_override(Difficulty::Hard, Params::new().with("count", 5));

        let hard = condition.effective_params(Some(Difficulty::Hard));
        assert_eq!(hard.int("count"), Some(5));
        assert_eq!(hard.text("pieceType"), Some("knight"));
    }

    #[test]
    fn test_unknown_kind_deserializes() {
        let condition: Condition =
            serde_json::from_str(r#"{"kind": "survive_eclipse"}"#).unwrap();
        assert_eq!(condition.kind, ConditionKind::Unknown);
    }

    #[test]
    fn test_condition_serialization() {
        let condition = Condition::new(ConditionKind::KillCount)
            .with_param("count", 2)
            .with_param("comparison", "atmost")
            .with_override(Difficulty::Hard, Params::new().with("count", 1));

        let json = serde_json::to_string(&condition).unwrap();
        let back: Condition = serde_json::from_str(&json).unwrap();
        assert_eq!(condition, back);
    }
}

//! Session difficulty and victory condition.
//!
//! Difficulty drives two override mechanisms: condition parameters and
//! objective rewards. In both, `Easy` and `Hard` double as the fallback
//! chain when no explicit override matches; `Normal` only ever matches
//! its own overrides.

use serde::{Deserialize, Serialize};

/// Difficulty selected for the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// The session's active win rule.
///
/// Recorded in tracking for the host's benefit; no condition consumes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VictoryCondition {
    /// Checkmate the enemy king.
    Checkmate,
    /// Kill every enemy piece.
    KillAll,
    /// Survive a set number of turns.
    Survive,
}

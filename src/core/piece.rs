//! Piece vocabulary shared by tracking and evaluation.
//!
//! The engine never moves pieces - it only receives notifications about
//! them. `Piece` is the record carried by loss notifications and board
//! snapshots; `PieceType` is the closed set of types the evaluator can
//! compare against authored parameter text.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Side a piece belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceColor {
    White,
    Black,
}

/// Piece type.
///
/// Authored condition parameters reference types as text ("knight",
/// "queen"); `FromStr` parses that text case-insensitively. Text that
/// parses to no type simply never matches a tracked piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    /// Lowercase name, matching the authored parameter spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PieceType::Pawn => "pawn",
            PieceType::Knight => "knight",
            PieceType::Bishop => "bishop",
            PieceType::Rook => "rook",
            PieceType::Queen => "queen",
            PieceType::King => "king",
        }
    }

    /// Parse authored parameter text, returning `None` for unrecognized
    /// names instead of an error.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        text.parse().ok()
    }
}

impl FromStr for PieceType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pawn" => Ok(PieceType::Pawn),
            "knight" => Ok(PieceType::Knight),
            "bishop" => Ok(PieceType::Bishop),
            "rook" => Ok(PieceType::Rook),
            "queen" => Ok(PieceType::Queen),
            "king" => Ok(PieceType::King),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for PieceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A piece as reported by the host: its type plus the optional unique
/// name some story pieces carry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    /// Piece type.
    pub kind: PieceType,

    /// Unique name, when the piece is a named character.
    pub name: Option<String>,
}

impl Piece {
    /// Create an unnamed piece.
    #[must_use]
    pub fn new(kind: PieceType) -> Self {
        Self { kind, name: None }
    }

    /// Create a named piece.
    #[must_use]
    pub fn named(kind: PieceType, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: Some(name.into()),
        }
    }

    /// Check the piece's name against a required name.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }
}

/// How a king was defeated. Carried on king kill records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KingDefeat {
    Checkmate,
    Captured,
}

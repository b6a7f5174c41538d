//! Board positions and the read-only snapshot handed into evaluation.
//!
//! The engine does not own a board. Conditions that care about the board
//! (a named piece still standing, the king reaching a square) receive a
//! `BoardSnapshot` built by the host for the duration of one check.

use serde::{Deserialize, Serialize};

use super::piece::Piece;

/// Board side length. Positions are 0-based ranks and files.
pub const BOARD_SIZE: u8 = 8;

/// A square on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardPos {
    /// Rank (row), 0-based.
    pub rank: u8,
    /// File (column), 0-based.
    pub file: u8,
}

impl BoardPos {
    /// Create a position.
    #[must_use]
    pub const fn new(rank: u8, file: u8) -> Self {
        Self { rank, file }
    }

    /// Check whether this square lies in a named edge area.
    ///
    /// Recognized areas: `"top"`, `"bottom"`, `"left"`, `"right"`, and
    /// `"any"` (any square of the outer ring). Unrecognized names never
    /// match.
    #[must_use]
    pub fn matches_edge(self, edge: &str) -> bool {
        let last = BOARD_SIZE - 1;
        match edge {
            "top" => self.rank == last,
            "bottom" => self.rank == 0,
            "left" => self.file == 0,
            "right" => self.file == last,
            "any" => {
                self.rank == 0 || self.rank == last || self.file == 0 || self.file == last
            }
            _ => false,
        }
    }
}

impl std::fmt::Display for BoardPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.rank, self.file)
    }
}

/// Read-only view of the player's side of the board at check time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    player_pieces: Vec<Piece>,
}

impl BoardSnapshot {
    /// Snapshot the player's pieces currently on the board.
    #[must_use]
    pub fn new(player_pieces: Vec<Piece>) -> Self {
        Self { player_pieces }
    }

    /// Does the player still have a piece with this name on the board?
    #[must_use]
    pub fn has_piece_named(&self, name: &str) -> bool {
        self.player_pieces.iter().any(|p| p.is_named(name))
    }

    /// The player's pieces on the board.
    #[must_use]
    pub fn player_pieces(&self) -> &[Piece] {
        &self.player_pieces
    }
}

//! Core vocabulary: pieces, board positions, difficulty.
//!
//! These are the types the host's notifications speak in. The engine
//! interprets them only as far as conditions need to compare them.

pub mod board;
pub mod difficulty;
pub mod piece;

pub use board::{BoardPos, BoardSnapshot, BOARD_SIZE};
pub use difficulty::{Difficulty, VictoryCondition};
pub use piece::{KingDefeat, Piece, PieceColor, PieceType};

//! Session telemetry fed by game-loop events.

pub mod store;

pub use store::{KillFilter, KillRecord, ObjectiveTracking, WinningPiece};

//! Per-session telemetry record.
//!
//! ## ObjectiveTracking
//!
//! One instance per level session, created at level start and discarded at
//! level end or on reset. The host game loop feeds it through the mutation
//! operations as gameplay events occur; evaluation reads it through the
//! accessors. Fields are private so every write goes through a named
//! operation.
//!
//! Collections use `im` persistent structures, so cloning a session
//! snapshot is O(1).

use im::{HashSet as ImHashSet, Vector};
use serde::{Deserialize, Serialize};

use crate::core::{BoardPos, Difficulty, KingDefeat, Piece, PieceType, VictoryCondition};

/// One enemy piece killed, with the context conditions filter on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillRecord {
    /// The piece that died.
    pub victim: Piece,

    /// For kings: how the king was defeated.
    pub king_defeat: Option<KingDefeat>,

    /// Type of the piece that made the kill.
    pub killer_kind: Option<PieceType>,

    /// Name of the killer, when it is a named piece.
    pub killer_name: Option<String>,

    /// Terrain the killer stood on.
    pub killer_terrain: Option<String>,

    /// Was the victim stunned when it died?
    pub victim_stunned: bool,
}

impl KillRecord {
    /// Create a kill record with just the victim.
    #[must_use]
    pub fn new(victim: Piece) -> Self {
        Self {
            victim,
            king_defeat: None,
            killer_kind: None,
            killer_name: None,
            killer_terrain: None,
            victim_stunned: false,
        }
    }

    /// Set the killer's type (builder pattern).
    #[must_use]
    pub fn with_killer(mut self, kind: PieceType) -> Self {
        self.killer_kind = Some(kind);
        self
    }

    /// Set the killer's name (builder pattern).
    #[must_use]
    pub fn with_killer_name(mut self, name: impl Into<String>) -> Self {
        self.killer_name = Some(name.into());
        self
    }

    /// Set the killer's terrain (builder pattern).
    #[must_use]
    pub fn with_killer_terrain(mut self, terrain: impl Into<String>) -> Self {
        self.killer_terrain = Some(terrain.into());
        self
    }

    /// Mark the victim as stunned (builder pattern).
    #[must_use]
    pub fn with_victim_stunned(mut self) -> Self {
        self.victim_stunned = true;
        self
    }

    /// Tag a king defeat (builder pattern).
    #[must_use]
    pub fn with_king_defeat(mut self, defeat: KingDefeat) -> Self {
        self.king_defeat = Some(defeat);
        self
    }
}

/// Filter over kill records. Unset fields are unconstrained.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KillFilter {
    /// Victim must be of this type.
    pub victim_kind: Option<PieceType>,
    /// Killer must be of this type.
    pub killer_kind: Option<PieceType>,
    /// Killer must have this name.
    pub killer_name: Option<String>,
    /// Killer must have stood on this terrain.
    pub killer_terrain: Option<String>,
    /// Victim must (not) have been stunned.
    pub victim_stunned: Option<bool>,
}

impl KillFilter {
    /// Does a kill record pass the filter?
    #[must_use]
    pub fn matches(&self, kill: &KillRecord) -> bool {
        if let Some(kind) = self.victim_kind {
            if kill.victim.kind != kind {
                return false;
            }
        }
        if let Some(kind) = self.killer_kind {
            if kill.killer_kind != Some(kind) {
                return false;
            }
        }
        if let Some(name) = &self.killer_name {
            if kill.killer_name.as_deref() != Some(name.as_str()) {
                return false;
            }
        }
        if let Some(terrain) = &self.killer_terrain {
            if kill.killer_terrain.as_deref() != Some(terrain.as_str()) {
                return false;
            }
        }
        if let Some(stunned) = self.victim_stunned {
            if kill.victim_stunned != stunned {
                return false;
            }
        }
        true
    }
}

/// The piece that delivered the winning blow.
///
/// `original_kind` is the type before any disguise was applied; conditions
/// compare against it, not the displayed type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningPiece {
    /// Type as it appeared when the blow landed.
    pub kind: PieceType,
    /// Type before any disguise.
    pub original_kind: PieceType,
}

/// Mutable per-session telemetry. See module docs for the ownership rules.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObjectiveTracking {
    turn: u32,
    color_turns: u32,
    losses: Vector<Piece>,
    kills: Vector<KillRecord>,
    conversions: u32,
    courtiers_destroyed: u32,
    items_used: ImHashSet<String>,
    king_position: Option<BoardPos>,
    king_disguised: bool,
    winning_piece: Option<WinningPiece>,
    victory_condition: Option<VictoryCondition>,
    difficulty: Option<Difficulty>,
}

impl Default for ObjectiveTracking {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectiveTracking {
    /// Create a fresh session record. The turn counter starts at 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            turn: 1,
            color_turns: 0,
            losses: Vector::new(),
            kills: Vector::new(),
            conversions: 0,
            courtiers_destroyed: 0,
            items_used: ImHashSet::new(),
            king_position: None,
            king_disguised: false,
            winning_piece: None,
            victory_condition: None,
            difficulty: None,
        }
    }

    /// Create a session record with difficulty and victory rule set.
    #[must_use]
    pub fn for_session(
        difficulty: Option<Difficulty>,
        victory_condition: Option<VictoryCondition>,
    ) -> Self {
        let mut tracking = Self::new();
        tracking.difficulty = difficulty;
        tracking.victory_condition = victory_condition;
        tracking
    }

    // === Turn progression ===

    /// Advance to the next turn.
    pub fn advance_turn(&mut self) {
        self.turn += 1;
    }

    /// Count one turn taken by the relevant color.
    pub fn advance_color_turn(&mut self) {
        self.color_turns += 1;
    }

    /// Current turn number (starts at 1).
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Turns taken by the relevant color.
    #[must_use]
    pub fn color_turns(&self) -> u32 {
        self.color_turns
    }

    // === Event ingestion ===

    /// Record a player piece lost.
    pub fn record_piece_lost(&mut self, piece: Piece) {
        self.losses.push_back(piece);
    }

    /// Record an enemy piece killed.
    pub fn record_kill(&mut self, kill: KillRecord) {
        self.kills.push_back(kill);
    }

    /// Record an item kind used. Using the same kind twice is one entry.
    pub fn record_item_used(&mut self, item: impl Into<String>) {
        self.items_used.insert(item.into());
    }

    /// Record a piece conversion.
    pub fn record_conversion(&mut self) {
        self.conversions += 1;
    }

    /// Record a courtier obstacle destroyed.
    pub fn record_courtier_destroyed(&mut self) {
        self.courtiers_destroyed += 1;
    }

    /// Update the king's recorded position.
    pub fn set_king_position(&mut self, pos: BoardPos) {
        self.king_position = Some(pos);
    }

    /// Toggle the king's disguise flag.
    pub fn set_king_disguised(&mut self, disguised: bool) {
        self.king_disguised = disguised;
    }

    /// Record the piece that delivered the winning blow.
    pub fn set_winning_piece(&mut self, kind: PieceType, original_kind: PieceType) {
        self.winning_piece = Some(WinningPiece {
            kind,
            original_kind,
        });
    }

    /// Set the session difficulty.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = Some(difficulty);
    }

    /// Set the session victory rule.
    pub fn set_victory_condition(&mut self, victory: VictoryCondition) {
        self.victory_condition = Some(victory);
    }

    // === Reads ===

    /// Pieces the player has lost, in order.
    #[must_use]
    pub fn losses(&self) -> &Vector<Piece> {
        &self.losses
    }

    /// Total player losses.
    #[must_use]
    pub fn total_losses(&self) -> u32 {
        self.losses.len() as u32
    }

    /// Losses of one piece type.
    #[must_use]
    pub fn losses_of(&self, kind: PieceType) -> u32 {
        self.losses.iter().filter(|p| p.kind == kind).count() as u32
    }

    /// Enemy kills, in order.
    #[must_use]
    pub fn kills(&self) -> &Vector<KillRecord> {
        &self.kills
    }

    /// Kills passing a filter.
    #[must_use]
    pub fn kill_count(&self, filter: &KillFilter) -> u32 {
        self.kills.iter().filter(|k| filter.matches(k)).count() as u32
    }

    /// Conversions performed.
    #[must_use]
    pub fn conversions(&self) -> u32 {
        self.conversions
    }

    /// Courtier obstacles destroyed.
    #[must_use]
    pub fn courtiers_destroyed(&self) -> u32 {
        self.courtiers_destroyed
    }

    /// Has an item of this kind been used?
    #[must_use]
    pub fn was_item_used(&self, item: &str) -> bool {
        self.items_used.contains(item)
    }

    /// Distinct item kinds used so far.
    #[must_use]
    pub fn items_used(&self) -> &ImHashSet<String> {
        &self.items_used
    }

    /// The king's recorded position, if any update has arrived.
    #[must_use]
    pub fn king_position(&self) -> Option<BoardPos> {
        self.king_position
    }

    /// Is the king's disguise currently active?
    #[must_use]
    pub fn king_disguised(&self) -> bool {
        self.king_disguised
    }

    /// The recorded winning blow, once the level is decided.
    #[must_use]
    pub fn winning_piece(&self) -> Option<WinningPiece> {
        self.winning_piece
    }

    /// The session's victory rule.
    #[must_use]
    pub fn victory_condition(&self) -> Option<VictoryCondition> {
        self.victory_condition
    }

    /// The session's difficulty.
    #[must_use]
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_counters() {
        let mut tracking = ObjectiveTracking::new();
        assert_eq!(tracking.turn(), 1);
        assert_eq!(tracking.color_turns(), 0);

        tracking.advance_turn();
        tracking.advance_color_turn();
        assert_eq!(tracking.turn(), 2);
        assert_eq!(tracking.color_turns(), 1);
    }

    #[test]
    fn test_loss_counting() {
        let mut tracking = ObjectiveTracking::new();
        tracking.record_piece_lost(Piece::new(PieceType::Pawn));
        tracking.record_piece_lost(Piece::new(PieceType::Pawn));
        tracking.record_piece_lost(Piece::named(PieceType::Rook, "Aldric"));

        assert_eq!(tracking.total_losses(), 3);
        assert_eq!(tracking.losses_of(PieceType::Pawn), 2);
        assert_eq!(tracking.losses_of(PieceType::Queen), 0);
    }

    #[test]
    fn test_kill_filter() {
        let mut tracking = ObjectiveTracking::new();
        tracking.record_kill(
            KillRecord::new(Piece::new(PieceType::Knight))
                .with_killer(PieceType::Pawn)
                .with_killer_terrain("swamp"),
        );
        tracking.record_kill(
            KillRecord::new(Piece::new(PieceType::Knight))
                .with_killer(PieceType::Queen)
                .with_victim_stunned(),
        );
        tracking.record_kill(KillRecord::new(Piece::new(PieceType::Pawn)));

        assert_eq!(tracking.kill_count(&KillFilter::default()), 3);

        let knights = KillFilter {
            victim_kind: Some(PieceType::Knight),
            ..KillFilter::default()
        };
        assert_eq!(tracking.kill_count(&knights), 2);

        let pawn_kills = KillFilter {
            killer_kind: Some(PieceType::Pawn),
            ..KillFilter::default()
        };
        assert_eq!(tracking.kill_count(&pawn_kills), 1);

        let stunned = KillFilter {
            victim_stunned: Some(true),
            ..KillFilter::default()
        };
        assert_eq!(tracking.kill_count(&stunned), 1);

        let swamp = KillFilter {
            killer_terrain: Some("swamp".to_string()),
            ..KillFilter::default()
        };
        assert_eq!(tracking.kill_count(&swamp), 1);
    }

    #[test]
    fn test_items_deduplicate() {
        let mut tracking = ObjectiveTracking::new();
        tracking.record_item_used("potion");
        tracking.record_item_used("potion");
        tracking.record_item_used("scroll");

        assert_eq!(tracking.items_used().len(), 2);
        assert!(tracking.was_item_used("potion"));
        assert!(!tracking.was_item_used("banner"));
    }

    #[test]
    fn test_session_snapshot_is_cheap_and_independent() {
        let mut tracking = ObjectiveTracking::new();
        tracking.record_piece_lost(Piece::new(PieceType::Pawn));

        let snapshot = tracking.clone();
        tracking.record_piece_lost(Piece::new(PieceType::Pawn));

        assert_eq!(snapshot.total_losses(), 1);
        assert_eq!(tracking.total_losses(), 2);
    }

    #[test]
    fn test_tracking_serialization() {
        let mut tracking = ObjectiveTracking::for_session(
            Some(Difficulty::Hard),
            Some(VictoryCondition::Checkmate),
        );
        tracking.record_item_used("potion");
        tracking.set_king_position(BoardPos::new(0, 4));

        let json = serde_json::to_string(&tracking).unwrap();
        let back: ObjectiveTracking = serde_json::from_str(&json).unwrap();
        assert_eq!(back.difficulty(), Some(Difficulty::Hard));
        assert!(back.was_item_used("potion"));
        assert_eq!(back.king_position(), Some(BoardPos::new(0, 4)));
    }
}

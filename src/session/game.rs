//! Session state.
//!
//! ## Player
//!
//! Seat, table name, private hand, running score (may go negative).
//!
//! ## Game
//!
//! Everything a play-through needs between interactions:
//! - players in turn order, whose turn it is, first-attempt flag
//! - the board and the rules in force (match mode, scoring)
//! - phase, turn counter, move history
//! - rules text for display
//!
//! `Game` is read-only to callers. [`TurnController`](super::TurnController)
//! is the only writer. The board and history use `im` persistent
//! structures, so cloning a game is cheap.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::MoveRecord;
use super::event::GameResult;
use super::scoring::ScoringPolicy;
use crate::board::{Board, MatchEngine};
use crate::core::error::SnapshotError;
use crate::core::{PlayerId, PlayerMap};
use crate::tiles::{Tile, TileId};

/// A seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    hand: Vec<Tile>,
    score: i64,
}

impl Player {
    /// Seat a player with a dealt hand and zero score.
    #[must_use]
    pub fn new(id: PlayerId, hand: Vec<Tile>) -> Self {
        Self {
            id,
            name: id.name(),
            hand,
            score: 0,
        }
    }

    /// Seat.
    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Table name, e.g. "Player 1".
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tiles held, in deal order.
    #[must_use]
    pub fn hand(&self) -> &[Tile] {
        &self.hand
    }

    /// Running score.
    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    pub(super) fn position(&self, tile: TileId) -> Option<usize> {
        self.hand.iter().position(|t| t.id() == tile)
    }

    pub(super) fn tile_mut(&mut self, tile: TileId) -> Option<&mut Tile> {
        self.hand.iter_mut().find(|t| t.id() == tile)
    }

    pub(super) fn take(&mut self, index: usize) -> Tile {
        self.hand.remove(index)
    }

    pub(super) fn add_score(&mut self, delta: i64) {
        self.score += delta;
    }
}

/// Where the session is in its lifecycle.
///
/// Setup happens inside construction and a resolved turn immediately hands
/// over to the next player, so those states are never observable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for the current player to commit a placement.
    AwaitingMove,
    /// Finished; no further moves are accepted.
    GameOver(GameResult),
}

/// One play-through.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub(super) players: PlayerMap<Player>,
    pub(super) current: PlayerId,
    pub(super) first_attempt: bool,
    pub(super) board: Board,
    pub(super) engine: MatchEngine,
    pub(super) scoring: ScoringPolicy,
    pub(super) phase: TurnPhase,
    pub(super) turn_number: u32,
    pub(super) sequence: u32,
    pub(super) history: Vector<MoveRecord>,
    pub(super) rules: Vec<String>,
}

impl Game {
    pub(super) fn new(
        hands: PlayerMap<Vec<Tile>>,
        engine: MatchEngine,
        scoring: ScoringPolicy,
        rules: Vec<String>,
    ) -> Self {
        let players = PlayerMap::from_vec(
            hands
                .iter()
                .map(|(id, hand)| Player::new(id, hand.clone()))
                .collect(),
        );

        Self {
            players,
            current: PlayerId::new(0),
            first_attempt: true,
            board: Board::new(),
            engine,
            scoring,
            phase: TurnPhase::AwaitingMove,
            turn_number: 1,
            sequence: 0,
            history: Vector::new(),
            rules,
        }
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// Players in turn order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().map(|(_, p)| p)
    }

    /// A single player, or `None` for a seat this game does not have.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    /// Whose turn it is (the turn index).
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    /// Has the current player not yet made an attempt this turn?
    #[must_use]
    pub fn is_first_attempt(&self) -> bool {
        self.first_attempt
    }

    /// The board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Placement rules in force.
    #[must_use]
    pub fn engine(&self) -> MatchEngine {
        self.engine
    }

    /// Scoring rules in force.
    #[must_use]
    pub fn scoring(&self) -> ScoringPolicy {
        self.scoring
    }

    /// Lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> &TurnPhase {
        &self.phase
    }

    /// Finished?
    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self.phase, TurnPhase::GameOver(_))
    }

    /// Final result, once finished.
    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        match &self.phase {
            TurnPhase::GameOver(result) => Some(result),
            TurnPhase::AwaitingMove => None,
        }
    }

    /// Turn counter (starts at 1, increments on every hand-over).
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Every attempt and auto-pass so far.
    pub fn history(&self) -> impl Iterator<Item = &MoveRecord> {
        self.history.iter()
    }

    /// Rules text, for display.
    #[must_use]
    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    /// Scores in turn order.
    #[must_use]
    pub fn scores(&self) -> Vec<(PlayerId, i64)> {
        self.players.iter().map(|(id, p)| (id, p.score)).collect()
    }

    /// Encode for a caller-provided session store.
    pub fn snapshot(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a snapshot taken with [`Game::snapshot`].
    pub fn restore(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }

    // === Transitions (TurnController only) ===

    pub(super) fn record(&mut self, player: PlayerId, outcome: super::action::MoveOutcome) {
        let sequence = self.sequence;
        self.sequence += 1;
        self.history
            .push_back(MoveRecord::new(player, self.turn_number, sequence, outcome));
    }

    /// Hand the turn to the next seat.
    pub(super) fn advance_turn(&mut self) {
        self.current = self.current.next(self.player_count());
        self.first_attempt = true;
        self.turn_number += 1;
        self.sequence = 0;
    }
}

//! Events emitted by turn transitions, for the presentation layer.

use serde::{Deserialize, Serialize};

use crate::board::Placement;
use crate::core::error::IllegalPlacementError;
use crate::core::PlayerId;
use crate::tiles::TileId;

/// Result of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Shared victory (a blocked game tied on fewest tiles).
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
        }
    }
}

/// Something that happened during a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnEvent {
    /// A tile went down.
    Placed {
        player: PlayerId,
        tile: TileId,
        placement: Placement,
        score_delta: i64,
    },
    /// An attempt did not match; the same player tries again.
    Rejected {
        player: PlayerId,
        error: IllegalPlacementError,
        score_delta: i64,
    },
    /// The player had nothing playable and was skipped.
    AutoPassed { player: PlayerId },
    /// The game ended. `blocked` is set when nobody could move.
    GameOver { result: GameResult, blocked: bool },
}

//! Moves and the move history.
//!
//! A [`Move`] is what a player submits: a tile from their hand, the end to
//! attach it to, and a written justification of the conceptual match.
//! Every attempt, success or not, and every auto-pass is kept as a
//! [`MoveRecord`].

use serde::{Deserialize, Serialize};

use crate::board::{End, Placement};
use crate::core::PlayerId;
use crate::tiles::TileId;

/// A placement attempt.
///
/// ## Example
///
/// ```
/// use concept_domino::board::End;
/// use concept_domino::session::Move;
/// use concept_domino::tiles::TileId;
///
/// let mv = Move::new(TileId::new(5), End::Left, "both faces are derivatives");
/// assert!(mv.has_justification());
/// assert!(!Move::new(TileId::new(5), End::Left, "   ").has_justification());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Tile from the acting player's hand.
    pub tile: TileId,

    /// Chosen end. Ignored for the first tile on an empty board.
    pub end: End,

    /// Why the faces match. Must not be blank.
    pub justification: String,
}

impl Move {
    /// Create a move.
    pub fn new(tile: TileId, end: End, justification: impl Into<String>) -> Self {
        Self {
            tile,
            end,
            justification: justification.into(),
        }
    }

    /// Does the justification contain anything besides whitespace?
    #[must_use]
    pub fn has_justification(&self) -> bool {
        !self.justification.trim().is_empty()
    }
}

/// What happened on one history entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The tile was placed.
    Placed {
        tile: TileId,
        placement: Placement,
        justification: String,
        score_delta: i64,
    },
    /// The tile did not match the chosen end.
    Rejected {
        tile: TileId,
        end: End,
        justification: String,
        score_delta: i64,
    },
    /// The player had no legal placement.
    AutoPassed,
}

impl MoveOutcome {
    /// Score change caused by this entry.
    #[must_use]
    pub fn score_delta(&self) -> i64 {
        match self {
            MoveOutcome::Placed { score_delta, .. } | MoveOutcome::Rejected { score_delta, .. } => *score_delta,
            MoveOutcome::AutoPassed => 0,
        }
    }
}

/// A history entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The player who acted (or was passed).
    pub player: PlayerId,

    /// Turn number when it happened.
    pub turn: u32,

    /// Sequence number within the turn.
    pub sequence: u32,

    /// What happened.
    pub outcome: MoveOutcome,
}

impl MoveRecord {
    /// Create a history entry.
    #[must_use]
    pub fn new(player: PlayerId, turn: u32, sequence: u32, outcome: MoveOutcome) -> Self {
        Self {
            player,
            turn,
            sequence,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::FaceSide;

    #[test]
    fn test_justification_check() {
        assert!(Move::new(TileId::new(0), End::Right, "chain rule").has_justification());
        assert!(!Move::new(TileId::new(0), End::Right, "").has_justification());
        assert!(!Move::new(TileId::new(0), End::Right, "\n\t ").has_justification());
    }

    #[test]
    fn test_outcome_score_delta() {
        let placed = MoveOutcome::Placed {
            tile: TileId::new(1),
            placement: Placement::Attach { end: End::Left, face: FaceSide::A },
            justification: "same concept".to_string(),
            score_delta: 4,
        };
        let rejected = MoveOutcome::Rejected {
            tile: TileId::new(1),
            end: End::Right,
            justification: "guess".to_string(),
            score_delta: -2,
        };

        assert_eq!(placed.score_delta(), 4);
        assert_eq!(rejected.score_delta(), -2);
        assert_eq!(MoveOutcome::AutoPassed.score_delta(), 0);
    }

    #[test]
    fn test_record_serialization() {
        let record = MoveRecord::new(PlayerId::new(1), 3, 0, MoveOutcome::AutoPassed);

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: MoveRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}

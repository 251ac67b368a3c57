//! Error taxonomy.
//!
//! Setup errors ([`ConceptResolutionError`], [`SetupError`]) are fatal: the
//! game cannot start. In-turn errors ([`IllegalPlacementError`],
//! [`MoveError`]) are recovered by the turn controller and never end a game.

use thiserror::Error;

use crate::board::End;
use crate::core::PlayerId;
use crate::tiles::TileId;

/// The concept backend could not produce a label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConceptResolutionError {
    #[error("concept inference unavailable for '{expression}': {reason}")]
    Unavailable { expression: String, reason: String },

    #[error("concept inference returned an unusable label for '{expression}': {response:?}")]
    Malformed { expression: String, response: String },

    #[error("concept inference backend cannot be used: {0}")]
    BackendUnavailable(String),
}

/// Session setup failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error(transparent)]
    ConceptResolution(#[from] ConceptResolutionError),

    #[error("deck must hold exactly {expected} tiles (got {actual})")]
    InvalidDeckSize { expected: usize, actual: usize },

    #[error("player count must be 2 or 4 (got {0})")]
    InvalidPlayerCount(usize),

    #[error("tile at position {0} is beyond the last assignable tile id")]
    TooManyTiles(usize),
}

/// A tile cannot be placed at the chosen end.
///
/// Carries the open labels so the player can be told what was expected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("tile {tile} does not match the {end} end (open ends: left {}, right {})",
    display_label(.expected_left.as_deref()),
    display_label(.expected_right.as_deref()))]
pub struct IllegalPlacementError {
    pub tile: TileId,
    pub end: End,
    pub expected_left: Option<String>,
    pub expected_right: Option<String>,
}

fn display_label(label: Option<&str>) -> String {
    match label {
        Some(label) => format!("'{label}'"),
        None => "closed".to_string(),
    }
}

/// A move was refused before it reached the board. Nothing changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("a justification is required to play a tile")]
    EmptyJustification,

    #[error("it is {current}'s turn, not {attempted}'s")]
    NotYourTurn { current: PlayerId, attempted: PlayerId },

    #[error("{0} is not seated in this game")]
    UnknownPlayer(PlayerId),

    #[error("{player} does not hold tile {tile}")]
    TileNotInHand { player: PlayerId, tile: TileId },

    #[error("the game is over")]
    GameOver,
}

/// Engine configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A saved session could not be encoded or decoded.
#[derive(Debug, Error)]
#[error("session snapshot failed: {0}")]
pub struct SnapshotError(#[from] bincode::Error);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_placement_message_names_open_ends() {
        let err = IllegalPlacementError {
            tile: TileId::new(3),
            end: End::Left,
            expected_left: Some("derivative".to_string()),
            expected_right: None,
        };

        let message = err.to_string();
        assert!(message.contains("'derivative'"));
        assert!(message.contains("right closed"));
        assert!(message.contains("left end"));
    }

    #[test]
    fn test_setup_error_wraps_resolution_error() {
        let err: SetupError = ConceptResolutionError::Unavailable {
            expression: "x".to_string(),
            reason: "timeout".to_string(),
        }
        .into();

        assert!(matches!(err, SetupError::ConceptResolution(_)));
        assert!(err.to_string().contains("timeout"));
    }
}

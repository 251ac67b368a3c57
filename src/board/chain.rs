//! The chain of placed tiles.
//!
//! Tiles are kept in layout order: a tile attached on the left becomes the
//! first element. Each end carries the concept still waiting to be matched.
//! Both labels are `None` exactly when the board is empty.
//!
//! The board is read-only outside this module; [`MatchEngine`](super::MatchEngine)
//! is the only writer.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::tiles::Tile;

/// A physical end of the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum End {
    Left,
    Right,
}

impl End {
    /// Both ends, left first.
    pub const BOTH: [End; 2] = [End::Left, End::Right];
}

impl std::fmt::Display for End {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            End::Left => write!(f, "left"),
            End::Right => write!(f, "right"),
        }
    }
}

/// Placed tiles plus the open concept at each end.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    tiles: Vector<Tile>,
    left: Option<String>,
    right: Option<String>,
}

impl Board {
    /// An empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tiles in layout order, leftmost first.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Number of placed tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Has anything been placed?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Leftmost tile.
    #[must_use]
    pub fn leftmost(&self) -> Option<&Tile> {
        self.tiles.front()
    }

    /// Rightmost tile (the last one played on a linear chain).
    #[must_use]
    pub fn rightmost(&self) -> Option<&Tile> {
        self.tiles.back()
    }

    /// Unmatched concept on the left end.
    #[must_use]
    pub fn left_concept(&self) -> Option<&str> {
        self.left.as_deref()
    }

    /// Unmatched concept on the right end.
    #[must_use]
    pub fn right_concept(&self) -> Option<&str> {
        self.right.as_deref()
    }

    /// Unmatched concept at `end`.
    #[must_use]
    pub fn concept_at(&self, end: End) -> Option<&str> {
        match end {
            End::Left => self.left_concept(),
            End::Right => self.right_concept(),
        }
    }

    /// Put the first tile down: face A seeds the left end, face B the right.
    pub(super) fn seed(&mut self, tile: Tile) {
        debug_assert!(self.tiles.is_empty());
        self.left = Some(tile.face_a().concept().to_string());
        self.right = Some(tile.face_b().concept().to_string());
        self.tiles.push_back(tile);
    }

    /// Attach a tile at `end` and expose `open` as that end's new concept.
    pub(super) fn attach(&mut self, end: End, tile: Tile, open: String) {
        debug_assert!(!self.tiles.is_empty());
        match end {
            End::Left => {
                self.tiles.push_front(tile);
                self.left = Some(open);
            }
            End::Right => {
                self.tiles.push_back(tile);
                self.right = Some(open);
            }
        }
    }
}

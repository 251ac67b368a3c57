//! Placement legality and board updates.
//!
//! Matching compares concepts, never expressions. For an end whose open
//! concept is `c`:
//! - face A matches `c` → the tile attaches by A and exposes B's concept
//! - face B matches `c` → the tile attaches by B and exposes A's concept
//!
//! On an empty board any tile may go down; face A seeds the left end and
//! face B the right, whatever the tile's orientation.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use super::chain::{Board, End};
use crate::core::error::IllegalPlacementError;
use crate::tiles::{FaceSide, Tile, TileId};

/// Which ends of the chain accept tiles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Both ends are open.
    #[default]
    TwoEnded,
    /// Only the right end is open; tiles extend a single line.
    Linear,
}

impl MatchMode {
    /// Ends that accept tiles once the board is seeded.
    #[must_use]
    pub fn open_ends(self) -> &'static [End] {
        match self {
            MatchMode::TwoEnded => &End::BOTH,
            MatchMode::Linear => &[End::Right],
        }
    }
}

/// One legal way to put a tile down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Placement {
    /// First tile on an empty board.
    First,
    /// Attach at `end`, matching that end's concept with `face`.
    Attach { end: End, face: FaceSide },
}

/// Placements for a single tile. At most four: two ends, two faces.
pub type Placements = SmallVec<[Placement; 4]>;

/// Computes and applies placements for one match mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEngine {
    mode: MatchMode,
}

impl MatchEngine {
    /// Create an engine for `mode`.
    #[must_use]
    pub const fn new(mode: MatchMode) -> Self {
        Self { mode }
    }

    /// The match mode.
    #[must_use]
    pub const fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Every legal placement for `tile` on `board`.
    ///
    /// Orientation is never consulted.
    #[must_use]
    pub fn legal_placements(&self, tile: &Tile, board: &Board) -> Placements {
        let mut out = Placements::new();

        if board.is_empty() {
            out.push(Placement::First);
            return out;
        }

        for &end in self.mode.open_ends() {
            let Some(open) = board.concept_at(end) else {
                continue;
            };
            for face in [FaceSide::A, FaceSide::B] {
                if tile.concept(face) == open {
                    out.push(Placement::Attach { end, face });
                }
            }
        }

        out
    }

    /// Can `tile` go anywhere on `board`?
    #[must_use]
    pub fn is_playable(&self, tile: &Tile, board: &Board) -> bool {
        !self.legal_placements(tile, board).is_empty()
    }

    /// Legal placements for every tile in `hand`, in hand order.
    #[must_use]
    pub fn legal_moves(&self, hand: &[Tile], board: &Board) -> Vec<(TileId, Placement)> {
        hand.iter()
            .flat_map(|tile| {
                self.legal_placements(tile, board)
                    .into_iter()
                    .map(move |placement| (tile.id(), placement))
            })
            .collect()
    }

    /// Place `tile` at `end`, updating that end's open concept.
    ///
    /// On an empty board `end` is ignored and the tile seeds both ends.
    /// When both faces match, face A is used; the exposed concept is the
    /// same either way.
    pub fn place(&self, board: &mut Board, tile: &Tile, end: End) -> Result<Placement, IllegalPlacementError> {
        if board.is_empty() {
            board.seed(tile.clone());
            debug!(tile = %tile.id(), "Seeded board");
            return Ok(Placement::First);
        }

        let face = self
            .legal_placements(tile, board)
            .into_iter()
            .find_map(|placement| match placement {
                Placement::Attach { end: e, face } if e == end => Some(face),
                _ => None,
            })
            .ok_or_else(|| self.illegal(tile, end, board))?;

        let open = tile.concept(face.other()).to_string();
        debug!(tile = %tile.id(), %end, ?face, open = %open, "Attached tile");
        board.attach(end, tile.clone(), open);
        Ok(Placement::Attach { end, face })
    }

    fn illegal(&self, tile: &Tile, end: End, board: &Board) -> IllegalPlacementError {
        let open = |e: End| {
            self.mode
                .open_ends()
                .contains(&e)
                .then(|| board.concept_at(e).map(str::to_string))
                .flatten()
        };

        IllegalPlacementError {
            tile: tile.id(),
            end,
            expected_left: open(End::Left),
            expected_right: open(End::Right),
        }
    }
}

//! Deck building and dealing.
//!
//! A deck is built from raw expression pairs supplied by a loader. Both
//! faces are resolved once, here, and never again. Dealing shuffles once
//! through a [`Shuffler`] and splits the result into contiguous hands; the
//! deck is consumed by the deal.

use tracing::{debug, info};

use super::tile::{Face, Tile, TileId};
use crate::concepts::ConceptResolver;
use crate::core::error::SetupError;
use crate::core::{PlayerMap, Shuffler};

/// Tiles in the canonical double-six conceptual set.
pub const STANDARD_DECK_SIZE: usize = 28;

/// Seat counts the standard deck divides evenly into.
pub const SUPPORTED_PLAYER_COUNTS: [usize; 2] = [2, 4];

/// An ordered set of tiles awaiting the deal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    tiles: Vec<Tile>,
}

impl Deck {
    /// Build a deck from raw `(face A, face B)` expressions.
    ///
    /// IDs are assigned densely in input order. Expressions are trimmed
    /// before resolution. The first resolution failure aborts the build.
    pub fn build<I, A, B>(raw_pairs: I, resolver: &mut ConceptResolver) -> Result<Self, SetupError>
    where
        I: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let mut tiles = Vec::new();

        for (index, (a, b)) in raw_pairs.into_iter().enumerate() {
            let a = a.as_ref().trim();
            let b = b.as_ref().trim();
            let face_a = Face::new(a, resolver.resolve(a)?);
            let face_b = Face::new(b, resolver.resolve(b)?);
            tiles.push(Tile::new(tile_id(index)?, face_a, face_b));
        }

        info!(
            tiles = tiles.len(),
            backend = resolver.backend_name(),
            backend_calls = resolver.backend_calls(),
            "Built deck"
        );
        Ok(Self { tiles })
    }

    /// Wrap tiles that are already resolved.
    #[must_use]
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    /// Number of tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Is the deck empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tiles in deck order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Shuffle once and split into `player_count` equal, contiguous hands.
    ///
    /// Player 1 gets the first `28 / player_count` shuffled tiles, Player 2
    /// the next run, and so on.
    pub fn deal(
        self,
        player_count: usize,
        shuffler: &mut impl Shuffler,
    ) -> Result<PlayerMap<Vec<Tile>>, SetupError> {
        if self.tiles.len() != STANDARD_DECK_SIZE {
            return Err(SetupError::InvalidDeckSize {
                expected: STANDARD_DECK_SIZE,
                actual: self.tiles.len(),
            });
        }
        if !SUPPORTED_PLAYER_COUNTS.contains(&player_count) {
            return Err(SetupError::InvalidPlayerCount(player_count));
        }

        let per_player = STANDARD_DECK_SIZE / player_count;
        let shuffled = shuffler.permute(self.tiles);

        let mut remaining = shuffled.into_iter();
        let hands: Vec<Vec<Tile>> = (0..player_count)
            .map(|_| remaining.by_ref().take(per_player).collect())
            .collect();

        debug!(player_count, per_player, "Dealt hands");
        Ok(PlayerMap::from_vec(hands))
    }
}

fn tile_id(index: usize) -> Result<TileId, SetupError> {
    u32::try_from(index)
        .map(TileId::new)
        .map_err(|_| SetupError::TooManyTiles(index))
}

/// Pair consecutive non-empty lines into `(face A, face B)` expressions.
///
/// Lines are trimmed and blank lines skipped; an odd trailing line has no
/// partner and is dropped.
///
/// ```
/// use concept_domino::tiles::pairs_from_lines;
///
/// let pairs = pairs_from_lines(["d/dx x^2", "", "2x", "orphan"]);
/// assert_eq!(pairs, vec![("d/dx x^2".to_string(), "2x".to_string())]);
/// ```
pub fn pairs_from_lines<I, S>(lines: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let lines: Vec<String> = lines
        .into_iter()
        .map(|line| line.as_ref().trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    lines
        .chunks_exact(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect()
}

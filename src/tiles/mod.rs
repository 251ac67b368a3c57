//! Tiles and the deck they are dealt from.

pub mod tile;
pub mod deck;

pub use tile::{display_expression, Face, FaceSide, Orientation, Tile, TileId};
pub use deck::{pairs_from_lines, Deck, STANDARD_DECK_SIZE, SUPPORTED_PLAYER_COUNTS};

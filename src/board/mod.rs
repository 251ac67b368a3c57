//! The board and the matching rules that grow it.
//!
//! Only [`MatchEngine::place`] mutates a [`Board`]; everything else reads it.

pub mod chain;
pub mod matching;

pub use chain::{Board, End};
pub use matching::{MatchEngine, MatchMode, Placement, Placements};

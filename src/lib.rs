//! # concept-domino
//!
//! A domino engine where tiles match by meaning. Every face carries an
//! expression ("d/dx x^2") and a concept label ("derivative"); two faces
//! match when their labels are equal, however different they look.
//!
//! ## Design Principles
//!
//! 1. **Resolve once**: concept labels are computed at deck build and
//!    cached per session. Play never calls the resolver.
//!
//! 2. **One writer**: only the turn controller mutates a game, and every
//!    transition either fully applies or changes nothing.
//!
//! 3. **Configuration over branches**: match mode (two-ended or linear),
//!    scoring policy and concept backend are chosen once in `EngineConfig`.
//!
//! 4. **Injectable randomness**: the deck shuffle is the only random step
//!    and goes through a `Shuffler`, so games replay exactly from a seed.
//!
//! ## Modules
//!
//! - `core`: players, RNG and shuffling, configuration, errors
//! - `concepts`: concept backends and the caching resolver
//! - `tiles`: tiles, faces, deck build and deal
//! - `board`: the tile chain and the matching rules
//! - `session`: game state, moves, scoring, turn controller
//!
//! ## Example
//!
//! ```
//! use concept_domino::board::End;
//! use concept_domino::concepts::ConceptResolver;
//! use concept_domino::core::EngineConfig;
//! use concept_domino::session::{Move, TurnController};
//!
//! let pairs: Vec<(String, String)> = (0..28)
//!     .map(|i| (format!("f{}", i % 7), format!("f{}", (i + 1) % 7)))
//!     .collect();
//!
//! let mut resolver = ConceptResolver::fallback();
//! let mut game = TurnController::start(&EngineConfig::default(), pairs, Vec::new(), &mut resolver).unwrap();
//!
//! let player = game.current_player();
//! let tile = game.hand(player).unwrap()[0].id();
//! game.commit(player, Move::new(tile, End::Right, "opening tile")).unwrap();
//!
//! assert_eq!(game.scores()[0].1, 4);
//! ```

pub mod core;
pub mod concepts;
pub mod tiles;
pub mod board;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    ConceptResolutionError, EngineConfig, FixedPermutation, GameRng, IllegalPlacementError, KeepOrder,
    MoveError, PlayerId, PlayerMap, ResolverConfig, SetupError, Shuffler,
};

pub use crate::concepts::{ConceptBackend, ConceptResolver, FallbackBackend, InferenceBackend, InferenceClient};

pub use crate::tiles::{Deck, Face, FaceSide, Orientation, Tile, TileId, STANDARD_DECK_SIZE};

pub use crate::board::{Board, End, MatchEngine, MatchMode, Placement};

pub use crate::session::{
    Game, GameResult, Move, MoveOutcome, MoveRecord, Player, ScoringPolicy, TurnController, TurnEvent,
    TurnPhase,
};

//! Core engine types: players, RNG, configuration, errors.
//!
//! These are the building blocks shared by every other module.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use player::{PlayerId, PlayerMap};
pub use rng::{FixedPermutation, GameRng, KeepOrder, Shuffler};
pub use config::{EngineConfig, ResolverConfig, DEFAULT_MAX_CONCEPT_LEN};
pub use error::{
    ConceptResolutionError, ConfigError, IllegalPlacementError, MoveError, SetupError, SnapshotError,
};

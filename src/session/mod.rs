//! Game sessions: state, moves, scoring and the turn controller.
//!
//! A session is created by [`TurnController::start`], advanced with
//! [`TurnController::commit`], and can be parked in a caller's store as a
//! [`Game`] between interactions.

pub mod action;
pub mod controller;
pub mod event;
pub mod game;
pub mod scoring;

pub use action::{Move, MoveOutcome, MoveRecord};
pub use controller::TurnController;
pub use event::{GameResult, TurnEvent};
pub use game::{Game, Player, TurnPhase};
pub use scoring::{ScoringPolicy, INVALID_ATTEMPT_POINTS, PLACEMENT_POINTS};

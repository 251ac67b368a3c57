//! Turn controller: the only code that mutates a [`Game`].
//!
//! Each transition runs to completion before returning:
//!
//! 1. Refuse moves that cannot be attempted (game over, wrong player,
//!    blank justification, tile not held). Nothing changes.
//! 2. Try the placement.
//!    - Success: tile leaves the hand, score moves, turn passes on.
//!    - Illegal: score moves, the same player tries again.
//! 3. If the acting player emptied their hand, they win.
//! 4. Otherwise skip every following player with no legal placement. If a
//!    full rotation is skipped the game is blocked and the fewest tiles win.
//!
//! Transitions return the [`TurnEvent`]s they produced, in order.

use tracing::{debug, info, warn};

use super::action::{Move, MoveOutcome};
use super::event::{GameResult, TurnEvent};
use super::game::{Game, TurnPhase};
use crate::board::{MatchEngine, Placement};
use crate::concepts::ConceptResolver;
use crate::core::error::{MoveError, SetupError};
use crate::core::{EngineConfig, GameRng, PlayerId, Shuffler};
use crate::tiles::{Deck, Orientation, Tile, TileId, SUPPORTED_PLAYER_COUNTS};

/// Drives one game session.
#[derive(Clone, Debug)]
pub struct TurnController {
    game: Game,
}

impl TurnController {
    /// Start a session from raw face expressions.
    ///
    /// Resets the resolver cache, resolves every face, shuffles with the
    /// configured seed and deals. Any error here means no game.
    pub fn start<I, A, B>(
        config: &EngineConfig,
        raw_pairs: I,
        rules: Vec<String>,
        resolver: &mut ConceptResolver,
    ) -> Result<Self, SetupError>
    where
        I: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        // Checked before resolution so a bad config costs no inference calls.
        if !SUPPORTED_PLAYER_COUNTS.contains(&config.player_count) {
            return Err(SetupError::InvalidPlayerCount(config.player_count));
        }

        resolver.reset();
        let deck = Deck::build(raw_pairs, resolver)?;
        Self::from_deck(config, deck, rules, &mut GameRng::new(config.seed))
    }

    /// Start a session from a resolved deck with an explicit shuffler.
    pub fn from_deck(
        config: &EngineConfig,
        deck: Deck,
        rules: Vec<String>,
        shuffler: &mut impl Shuffler,
    ) -> Result<Self, SetupError> {
        let hands = deck.deal(config.player_count, shuffler)?;
        let game = Game::new(hands, MatchEngine::new(config.match_mode), config.scoring, rules);

        info!(
            players = game.player_count(),
            mode = ?config.match_mode,
            scoring = ?config.scoring,
            "Game started"
        );

        let mut controller = Self { game };
        controller.settle();
        Ok(controller)
    }

    /// Resume a session from stored state.
    #[must_use]
    pub fn from_game(game: Game) -> Self {
        Self { game }
    }

    /// Hand the state back for storage.
    #[must_use]
    pub fn into_game(self) -> Game {
        self.game
    }

    /// Read-only view of the session.
    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.game.current
    }

    /// Hand of `player`, or `None` for a seat this game does not have.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> Option<&[Tile]> {
        self.game.player(player).map(|p| p.hand())
    }

    /// Scores in turn order.
    #[must_use]
    pub fn scores(&self) -> Vec<(PlayerId, i64)> {
        self.game.scores()
    }

    /// Winner(s), once the game is over.
    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.game.result()
    }

    /// Legal placements for the current player.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<(TileId, Placement)> {
        self.legal_moves_for(self.game.current)
    }

    fn legal_moves_for(&self, player: PlayerId) -> Vec<(TileId, Placement)> {
        self.game
            .engine
            .legal_moves(self.game.players[player].hand(), &self.game.board)
    }

    /// Toggle the orientation of a tile `player` holds.
    ///
    /// Purely visual: faces, legality and turn order are untouched.
    pub fn rotate_tile(&mut self, player: PlayerId, tile: TileId) -> Result<Orientation, MoveError> {
        let held = self
            .game
            .players
            .get_mut(player)
            .ok_or(MoveError::UnknownPlayer(player))?
            .tile_mut(tile)
            .ok_or(MoveError::TileNotInHand { player, tile })?;
        held.rotate();
        Ok(held.orientation())
    }

    /// Attempt a placement for `player`.
    ///
    /// `Err` means the move was refused outright and nothing changed.
    /// An illegal placement is not an `Err`: it is scored and reported as
    /// [`TurnEvent::Rejected`], and the same player moves again.
    pub fn commit(&mut self, player: PlayerId, mv: Move) -> Result<Vec<TurnEvent>, MoveError> {
        if self.game.is_over() {
            return Err(MoveError::GameOver);
        }
        if player != self.game.current {
            return Err(MoveError::NotYourTurn {
                current: self.game.current,
                attempted: player,
            });
        }
        if !mv.has_justification() {
            return Err(MoveError::EmptyJustification);
        }
        let index = self.game.players[player]
            .position(mv.tile)
            .ok_or(MoveError::TileNotInHand { player, tile: mv.tile })?;

        let first_attempt = self.game.first_attempt;
        let game = &mut self.game;
        let placed = game
            .engine
            .place(&mut game.board, &game.players[player].hand()[index], mv.end);

        let mut events = Vec::new();
        match placed {
            Ok(placement) => {
                let score_delta = game.scoring.on_success(first_attempt);
                let acting = &mut game.players[player];
                acting.take(index);
                acting.add_score(score_delta);
                let emptied = acting.hand().is_empty();

                info!(%player, tile = %mv.tile, ?placement, score_delta, "Tile placed");
                game.record(
                    player,
                    MoveOutcome::Placed {
                        tile: mv.tile,
                        placement,
                        justification: mv.justification,
                        score_delta,
                    },
                );
                events.push(TurnEvent::Placed {
                    player,
                    tile: mv.tile,
                    placement,
                    score_delta,
                });

                if emptied {
                    events.push(self.finish(GameResult::Winner(player), false));
                } else {
                    self.game.advance_turn();
                    events.extend(self.settle());
                }
            }
            Err(error) => {
                let score_delta = game.scoring.on_failure(first_attempt);
                game.players[player].add_score(score_delta);
                game.first_attempt = false;

                debug!(%player, %error, score_delta, "Placement rejected");
                game.record(
                    player,
                    MoveOutcome::Rejected {
                        tile: mv.tile,
                        end: mv.end,
                        justification: mv.justification,
                        score_delta,
                    },
                );
                events.push(TurnEvent::Rejected {
                    player,
                    error,
                    score_delta,
                });
            }
        }

        Ok(events)
    }

    /// Skip players with no legal placement until someone can move.
    fn settle(&mut self) -> Vec<TurnEvent> {
        let mut events = Vec::new();
        let mut passes = 0;

        while !self.game.is_over() && self.legal_moves().is_empty() {
            let player = self.game.current;
            debug!(%player, "No legal placement, auto-passing");
            self.game.record(player, MoveOutcome::AutoPassed);
            events.push(TurnEvent::AutoPassed { player });

            passes += 1;
            if passes == self.game.player_count() {
                let result = self.fewest_tiles();
                events.push(self.finish(result, true));
                break;
            }
            self.game.advance_turn();
        }

        events
    }

    fn fewest_tiles(&self) -> GameResult {
        let fewest = self
            .game
            .players()
            .map(|p| p.hand().len())
            .min()
            .unwrap_or_default();

        let mut leaders: Vec<PlayerId> = self
            .game
            .players()
            .filter(|p| p.hand().len() == fewest)
            .map(|p| p.id())
            .collect();

        if leaders.len() == 1 {
            GameResult::Winner(leaders.remove(0))
        } else {
            GameResult::Winners(leaders)
        }
    }

    fn finish(&mut self, result: GameResult, blocked: bool) -> TurnEvent {
        if blocked {
            warn!(?result, "Game blocked, no player can move");
        } else {
            info!(?result, "Game over");
        }
        self.game.phase = TurnPhase::GameOver(result.clone());
        TurnEvent::GameOver { result, blocked }
    }
}

//! End-to-end play-throughs of full 28-tile sessions.
//!
//! Decks are dealt with `KeepOrder`, so Player 1 holds the first
//! `28 / player_count` tiles of the source, Player 2 the next run, and so on.

use std::collections::HashMap;

use concept_domino::board::End;
use concept_domino::concepts::{ConceptBackend, ConceptResolver};
use concept_domino::core::{ConceptResolutionError, EngineConfig, KeepOrder, MoveError, PlayerId};
use concept_domino::session::{GameResult, Move, MoveOutcome, ScoringPolicy, TurnController, TurnEvent};
use concept_domino::tiles::{Deck, TileId};

/// Labels from a fixed table; anything else is its own label.
struct TableBackend {
    labels: HashMap<String, String>,
}

impl TableBackend {
    fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            labels: entries
                .iter()
                .map(|(e, c)| ((*e).to_string(), (*c).to_string()))
                .collect(),
        }
    }
}

impl ConceptBackend for TableBackend {
    fn name(&self) -> &'static str {
        "table"
    }

    fn label(&self, expression: &str) -> Result<String, ConceptResolutionError> {
        Ok(self
            .labels
            .get(expression)
            .cloned()
            .unwrap_or_else(|| expression.to_lowercase()))
    }
}

const P1: PlayerId = PlayerId::new(0);
const P2: PlayerId = PlayerId::new(1);

/// Player 1: calculus tiles that chain off the opening integral.
/// Player 2: unrelated tiles.
fn calculus_source() -> Vec<(String, String)> {
    let mut pairs = vec![("d/dx x^2".to_string(), "∫ 2x dx".to_string())];
    pairs.extend((1..14).map(|i| (format!("chain{i}"), format!("chain{}", i + 1))));
    pairs.extend((14..28).map(|i| (format!("noise{i}a"), format!("noise{i}b"))));
    pairs
}

fn calculus_resolver() -> ConceptResolver {
    ConceptResolver::new(TableBackend::new(&[
        ("d/dx x^2", "derivative"),
        ("f'(x) where f = x^2", "derivative"),
        ("∫ 2x dx", "integral"),
        ("chain1", "integral"),
    ]))
}

fn start(config: &EngineConfig, source: Vec<(String, String)>, resolver: &mut ConceptResolver) -> TurnController {
    let deck = Deck::build(source, resolver).unwrap();
    TurnController::from_deck(config, deck, vec!["Justify every move.".to_string()], &mut KeepOrder).unwrap()
}

#[test]
fn test_opening_move_flat_scoring() {
    let mut resolver = calculus_resolver();
    let mut game = start(&EngineConfig::default(), calculus_source(), &mut resolver);

    let opening = game.hand(P1).unwrap()[0].clone();
    assert_eq!(opening.face_a().expression(), "d/dx x^2");
    assert_eq!(opening.face_a().concept(), "derivative");

    let events = game
        .commit(P1, Move::new(opening.id(), End::Right, "the derivative of x squared"))
        .unwrap();

    let board = game.game().board();
    assert_eq!(board.len(), 1);
    assert_eq!(board.left_concept(), Some("derivative"));
    assert_eq!(board.right_concept(), Some("integral"));
    assert_eq!(game.scores()[0], (P1, 4));
    assert!(matches!(events[0], TurnEvent::Placed { player: P1, score_delta: 4, .. }));
    assert_eq!(game.game().rules(), ["Justify every move."]);
}

#[test]
fn test_unmatched_hand_auto_passes() {
    let mut resolver = calculus_resolver();
    let mut game = start(&EngineConfig::default(), calculus_source(), &mut resolver);

    let events = game
        .commit(P1, Move::new(TileId::new(0), End::Right, "opening"))
        .unwrap();

    // Player 2 holds only noise tiles and is skipped with no input.
    assert_eq!(events[1], TurnEvent::AutoPassed { player: P2 });
    assert_eq!(game.current_player(), P1);
    assert_eq!(game.scores(), vec![(P1, 4), (P2, 0)]);
    assert_eq!(game.hand(P2).unwrap().len(), 14);
    assert!(game.game().is_first_attempt());
}

#[test]
fn test_different_expressions_same_concept_match() {
    let mut source = calculus_source();
    // Player 2's first tile carries a different-looking derivative.
    source[14] = ("f'(x) where f = x^2".to_string(), "product rule".to_string());

    let mut resolver = calculus_resolver();
    let mut game = start(&EngineConfig::default(), source, &mut resolver);

    game.commit(P1, Move::new(TileId::new(0), End::Right, "opening"))
        .unwrap();
    assert_eq!(game.current_player(), P2);

    game.commit(P2, Move::new(TileId::new(14), End::Left, "both are the derivative of x^2"))
        .unwrap();

    let board = game.game().board();
    assert_eq!(board.left_concept(), Some("product rule"));
    assert_eq!(board.leftmost().map(|t| t.id()), Some(TileId::new(14)));
}

#[test]
fn test_invalid_attempt_then_retry_same_player() {
    let mut source = calculus_source();
    source[14] = ("integral".to_string(), "limit".to_string());
    source[15] = ("series".to_string(), "sequence".to_string());

    let mut resolver = calculus_resolver();
    let config = EngineConfig::default().with_scoring(ScoringPolicy::FirstAttemptOnly);
    let mut game = start(&config, source, &mut resolver);

    game.commit(P1, Move::new(TileId::new(0), End::Right, "opening"))
        .unwrap();

    let events = game
        .commit(P2, Move::new(TileId::new(15), End::Right, "series integrate termwise"))
        .unwrap();
    match &events[..] {
        [TurnEvent::Rejected { error, score_delta: -2, .. }] => {
            assert_eq!(error.expected_left.as_deref(), Some("derivative"));
            assert_eq!(error.expected_right.as_deref(), Some("integral"));
        }
        other => panic!("unexpected events {other:?}"),
    }
    assert_eq!(game.current_player(), P2);

    assert_eq!(
        game.commit(P2, Move::new(TileId::new(14), End::Right, "")),
        Err(MoveError::EmptyJustification)
    );

    game.commit(P2, Move::new(TileId::new(14), End::Right, "antiderivative"))
        .unwrap();
    assert_eq!(game.scores(), vec![(P1, 4), (P2, -2)]);

    let outcomes: Vec<i64> = game
        .game()
        .history()
        .filter(|r| r.outcome != MoveOutcome::AutoPassed)
        .map(|r| r.outcome.score_delta())
        .collect();
    assert_eq!(outcomes, vec![4, -2, 0]);
}

#[test]
fn test_four_player_game_to_win() {
    // Player 1 holds a seven-tile chain c0|c1, c1|c2, ... ; everyone else holds noise.
    let mut source: Vec<(String, String)> = (0..7).map(|i| (format!("c{i}"), format!("c{}", i + 1))).collect();
    source.extend((7..28).map(|i| (format!("n{i}a"), format!("n{i}b"))));

    let mut resolver = ConceptResolver::fallback();
    let config = EngineConfig::default().with_player_count(4);
    let mut game = start(&config, source, &mut resolver);
    assert_eq!(game.hand(P1).unwrap().len(), 7);

    let mut last_events = Vec::new();
    for id in 0..7 {
        assert_eq!(game.current_player(), P1);
        last_events = game
            .commit(P1, Move::new(TileId::new(id), End::Right, "continues the chain"))
            .unwrap();
    }

    assert_eq!(
        last_events.last(),
        Some(&TurnEvent::GameOver { result: GameResult::Winner(P1), blocked: false })
    );
    assert_eq!(game.scores()[0], (P1, 28));
    assert!(game.hand(P1).unwrap().is_empty());
    assert_eq!(game.game().board().len(), 7);
    assert_eq!(
        game.commit(PlayerId::new(1), Move::new(TileId::new(7), End::Right, "late")),
        Err(MoveError::GameOver)
    );

    let passes = game
        .game()
        .history()
        .filter(|r| r.outcome == MoveOutcome::AutoPassed)
        .count();
    assert_eq!(passes, 6 * 3);
}

#[test]
fn test_queries_for_missing_seats_do_not_panic() {
    let mut game = TurnController::start(&EngineConfig::default(), calculus_source(), Vec::new(), &mut calculus_resolver())
        .unwrap();

    assert!(game.hand(PlayerId::new(2)).is_none());
    assert!(game.game().player(PlayerId::new(2)).is_none());
    assert_eq!(
        game.rotate_tile(PlayerId::new(3), TileId::new(0)),
        Err(MoveError::UnknownPlayer(PlayerId::new(3)))
    );
    assert_eq!(game.hand(P1).map(|hand| hand.len()), Some(14));
}

#[test]
fn test_seeded_start_is_reproducible() {
    let source = calculus_source();
    let config = EngineConfig::default().with_seed(2024);

    let a = TurnController::start(&config, source.clone(), Vec::new(), &mut calculus_resolver()).unwrap();
    let b = TurnController::start(&config, source, Vec::new(), &mut calculus_resolver()).unwrap();

    assert_eq!(a.game(), b.game());
}

//! Round flow integration tests
//!
//! Drives full rounds through the public orchestrator API.

use std::sync::{Arc, Mutex};

use pife_engine::domain::entities::{Card, DifficultyTier, Rank};
use pife_engine::domain::services::{DeckManager, CARDS_PER_DECK};
use pife_engine::domain::value_objects::{GameSettings, RoundPhase, HUMAN_SEAT};
use pife_engine::infrastructure::events::GameEventKind;
use pife_engine::{GameError, IllegalAction, TurnOrchestrator};

fn orchestrator(seed: u64, double_deck: bool) -> TurnOrchestrator {
    let settings = GameSettings {
        use_double_decks: double_deck,
        ai_difficulty: [DifficultyTier::Easy, DifficultyTier::Hard, DifficultyTier::Expert],
        seed: Some(seed),
        ..Default::default()
    };
    TurnOrchestrator::new(settings).unwrap()
}

/// Draw from the deck (or the discard when the deck is dry) and throw the
/// drawn card back.
fn human_cycle(game: &mut TurnOrchestrator) -> Result<(), GameError> {
    let card = match game.player_draw_from_deck() {
        Ok(card) => card,
        Err(GameError::DeckExhausted) => game.player_draw_from_discard()?,
        Err(e) => return Err(e),
    };
    game.player_discard_card(card)
}

#[test]
fn test_round_conserves_cards() {
    for double_deck in [false, true] {
        let mut game = orchestrator(40, double_deck);
        game.start_new_game().unwrap();
        let total = CARDS_PER_DECK * if double_deck { 2 } else { 1 } - 1;
        assert_eq!(game.cards_in_circulation(), total);

        for _ in 0..60 {
            if game.is_game_ended() {
                break;
            }
            human_cycle(&mut game).unwrap();
            assert_eq!(game.cards_in_circulation(), total);
            game.play_ai_turns_immediately().unwrap();
            assert_eq!(game.cards_in_circulation(), total);
        }
    }
}

#[test]
fn test_event_sequence_for_one_cycle() {
    let mut game = orchestrator(41, false);
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    game.events().subscribe(move |e| sink.lock().unwrap().push(e.kind.clone()));

    game.start_new_game().unwrap();
    human_cycle(&mut game).unwrap();

    let events = log.lock().unwrap().clone();
    assert!(matches!(events[0], GameEventKind::GameStarted { round_number: 1, .. }));
    assert_eq!(events[1], GameEventKind::TurnChanged { player_index: 0 });
    assert!(matches!(events[2], GameEventKind::CardDrawn { player_index: 0, .. }));
    assert!(matches!(events[3], GameEventKind::CardDiscarded { player_index: 0, .. }));
    assert_eq!(events[4], GameEventKind::TurnChanged { player_index: 1 });
}

#[test]
fn test_turns_rotate_through_every_seat() {
    let mut game = orchestrator(42, false);
    let turns = Arc::new(Mutex::new(Vec::new()));
    let sink = turns.clone();
    game.events().subscribe(move |e| {
        if let GameEventKind::TurnChanged { player_index } = e.kind {
            sink.lock().unwrap().push(player_index);
        }
    });

    game.start_new_game().unwrap();
    human_cycle(&mut game).unwrap();
    game.play_ai_turns_immediately().unwrap();

    if !game.is_game_ended() {
        assert_eq!(*turns.lock().unwrap(), vec![0, 1, 2, 3, 0]);
        assert_eq!(game.current_player_index(), HUMAN_SEAT);
    }
}

#[test]
fn test_rejected_actions_leave_state_untouched() {
    let mut game = orchestrator(43, false);
    game.start_new_game().unwrap();
    human_cycle(&mut game).unwrap();

    let hand = game.human_hand().to_vec();
    let draw_pile = game.draw_pile_len();
    let discard_pile = game.discard_pile_len();

    assert!(matches!(
        game.player_draw_from_discard(),
        Err(GameError::IllegalAction(IllegalAction::NotYourTurn { .. }))
    ));
    assert!(matches!(
        game.player_try_beat(),
        Err(GameError::IllegalAction(IllegalAction::NotYourTurn { .. }))
    ));
    assert!(matches!(
        game.player_discard_card(hand[0]),
        Err(GameError::IllegalAction(IllegalAction::NotYourTurn { .. }))
    ));

    assert_eq!(game.human_hand(), hand.as_slice());
    assert_eq!(game.draw_pile_len(), draw_pile);
    assert_eq!(game.discard_pile_len(), discard_pile);
    assert_eq!(game.phase(), RoundPhase::AwaitingDraw);
}

#[test]
fn test_scores_accumulate_over_rounds() {
    let mut game = orchestrator(44, false);
    let mut previous = [0u32; 4];

    for round in 1..=3 {
        game.start_new_game().unwrap();
        assert_eq!(game.round_number(), round);
        for _ in 0..200 {
            if game.is_game_ended() {
                break;
            }
            human_cycle(&mut game).unwrap();
            game.play_ai_turns_immediately().unwrap();
        }

        let scores = game.scores();
        for seat in 0..4 {
            assert!(scores[seat] >= previous[seat]);
        }
        if let Some(summary) = game.last_round() {
            if summary.round_number == round {
                for seat in 0..4 {
                    assert_eq!(scores[seat], previous[seat] + summary.penalties[seat]);
                }
            }
        }
        previous = scores;
    }
}

#[test]
fn test_wildcard_follows_definer() {
    let mut game = orchestrator(45, false);
    game.start_new_game().unwrap();
    let definer = game.wildcard_definer().unwrap();
    let expected = Rank::from_value(definer.rank.value() % 13 + 1).unwrap();
    assert_eq!(game.wildcard(), Some(expected));
}

#[test]
fn test_draw_exhaustion_and_refill() {
    let mut deck = DeckManager::new(Some(46));
    deck.reset(1);
    deck.define_wildcard().unwrap();

    let mut drawn = Vec::new();
    while deck.draw_pile_len() > 0 {
        drawn.push(deck.draw().unwrap());
    }
    assert_eq!(drawn.len(), CARDS_PER_DECK - 1);

    // One card on the discard pile: nothing to reshuffle
    deck.discard(drawn[0]);
    assert_eq!(deck.draw(), Err(GameError::DeckExhausted));
    assert_eq!(deck.discard_pile_len(), 1);
    assert_eq!(deck.draw_pile_len(), 0);
    assert_eq!(deck.top_discard(), Some(drawn[0]));

    // More than one: everything under the top is reshuffled
    deck.discard(drawn[1]);
    deck.discard(drawn[2]);
    let card = deck.draw().unwrap();
    assert!(card == drawn[0] || card == drawn[1]);
    assert_eq!(deck.top_discard(), Some(drawn[2]));
    assert_eq!(deck.discard_pile_len(), 1);
    assert_eq!(deck.draw_pile_len(), 1);
}

#[tokio::test]
async fn test_channel_subscriber() {
    let mut game = orchestrator(47, false);
    let mut receiver = game.events().subscribe_channel(16);

    game.start_new_game().unwrap();
    let first = receiver.recv().await.unwrap();
    assert_eq!(first.event_type(), "gameStarted");
    assert_eq!(first.generation, game.generation());
    let second = receiver.recv().await.unwrap();
    assert_eq!(second.kind, GameEventKind::TurnChanged { player_index: 0 });
}

#[test]
fn test_event_json_carries_card() {
    let mut game = orchestrator(48, false);
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    game.events().subscribe(move |e| sink.lock().unwrap().push(e.to_json()));

    game.start_new_game().unwrap();
    let drawn: Card = game.player_draw_from_deck().unwrap();

    let events = log.lock().unwrap();
    let draw = events.last().unwrap();
    assert_eq!(draw["type"], "cardDrawn");
    assert_eq!(draw["source"], "deck");
    assert_eq!(draw["playerIndex"], 0);
    assert_eq!(
        serde_json::from_value::<Card>(draw["card"].clone()).unwrap(),
        drawn
    );
}

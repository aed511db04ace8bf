//! Turn orchestrator
//!
//! Owns the round: piles, hands, phase and the event bus. Player actions live
//! in `player_actions`, AI steps in `ai_turn`; both mutate state only through
//! this type.

use crate::domain::entities::{Card, Player, Rank};
use crate::domain::errors::{GameError, IllegalAction};
use crate::domain::services::hand_penalty;
use crate::domain::value_objects::{
    ConfigError, GameSettings, RoundPhase, RoundState, RoundSummary, HUMAN_SEAT, PLAYER_COUNT,
};
use crate::infrastructure::bot::AiStrategyEngine;
use crate::infrastructure::events::{EventBus, GameEvent, GameEventKind};

/// Sequences draw, beat check and discard across the four seats
#[derive(Debug)]
pub struct TurnOrchestrator {
    pub(crate) settings: GameSettings,
    pub(crate) state: RoundState,
    pub(crate) events: EventBus,
    pub(crate) ai: AiStrategyEngine,
}

impl TurnOrchestrator {
    pub fn new(settings: GameSettings) -> Result<Self, ConfigError> {
        let ai = AiStrategyEngine::seeded(settings.seed.map(|s| s.wrapping_add(1)));
        Self::with_ai(settings, ai)
    }

    /// Use a specific AI engine, e.g. one backed by a scripted random source
    pub fn with_ai(settings: GameSettings, ai: AiStrategyEngine) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            state: RoundState::new(&settings),
            settings,
            events: EventBus::new(),
            ai,
        })
    }

    /// Reset hands and piles, turn the vira, deal and hand the turn to seat 0.
    ///
    /// Cumulative scores survive. Any AI step still pending for the previous
    /// round becomes stale.
    pub fn start_new_game(&mut self) -> Result<(), GameError> {
        self.state.generation += 1;
        for player in self.state.players.iter_mut() {
            player.reset_for_round();
        }
        self.state.current_player_index = HUMAN_SEAT;

        if let Err(e) = self.deal() {
            tracing::error!("Could not start round: {}", e);
            self.state.phase = RoundPhase::NotStarted;
            return Err(e);
        }

        self.state.round_number += 1;
        self.state.phase = RoundPhase::AwaitingDraw;

        let (Some(definer), Some(rank)) = (
            self.state.deck.wildcard_definer(),
            self.state.deck.wildcard_rank(),
        ) else {
            return Err(GameError::InvalidWildcardDefinition);
        };

        tracing::info!(
            "Round {} started (generation {}), {} cards each, wildcard rank {:?}",
            self.state.round_number,
            self.state.generation,
            self.settings.cards_per_player,
            rank
        );

        self.emit(GameEventKind::GameStarted {
            round_number: self.state.round_number,
            wildcard_definer: definer,
            wildcard_rank: rank,
        });
        self.emit(GameEventKind::TurnChanged {
            player_index: self.state.current_player_index,
        });
        Ok(())
    }

    fn deal(&mut self) -> Result<(), GameError> {
        let deck = &mut self.state.deck;
        deck.reset(self.settings.deck_count());
        deck.define_wildcard()?;

        for _ in 0..self.settings.cards_per_player {
            for player in self.state.players.iter_mut() {
                let card = deck.draw()?;
                player.hand.push(card);
            }
        }
        Ok(())
    }

    /// Close the round. `None` voids it: nobody beat and nobody pays.
    pub(crate) fn end_round(&mut self, winner: Option<usize>) {
        let mut penalties = [0u32; PLAYER_COUNT];
        if let Some(winner) = winner {
            for (index, player) in self.state.players.iter_mut().enumerate() {
                if index == winner {
                    player.has_beat = true;
                    continue;
                }
                penalties[index] = hand_penalty(&player.hand);
                player.score += penalties[index];
            }
        }

        self.state.phase = RoundPhase::Ended;
        self.state.last_round = Some(RoundSummary {
            round_number: self.state.round_number,
            winner,
            penalties,
            exhausted: winner.is_none(),
        });

        match winner {
            Some(w) => tracing::info!(
                "Round {} won by {} (penalties {:?})",
                self.state.round_number,
                self.state.players[w].name,
                penalties
            ),
            None => tracing::info!(
                "Round {} voided: both piles exhausted",
                self.state.round_number
            ),
        }

        self.emit(GameEventKind::GameEnded { winner, penalties });
    }

    /// Move `card` from seat `index` to the discard pile and pass the turn.
    /// A card the seat does not hold is rejected with nothing changed.
    pub(crate) fn discard_from_seat(&mut self, index: usize, card: Card) -> Result<(), GameError> {
        if !self.state.players[index].remove_card(&card) {
            return Err(self.reject("discard", IllegalAction::CardNotInHand(card)));
        }
        self.state.deck.discard(card);
        tracing::debug!("{} discards {}", self.state.players[index].name, card);

        self.emit(GameEventKind::CardDiscarded {
            player_index: index,
            card,
        });
        self.advance_turn();
        Ok(())
    }

    /// Pass the turn to the next seat
    pub(crate) fn advance_turn(&mut self) {
        self.state.advance_turn();
        self.emit(GameEventKind::TurnChanged {
            player_index: self.state.current_player_index,
        });
    }

    pub(crate) fn emit(&mut self, kind: GameEventKind) {
        self.events
            .publish(GameEvent::new(self.state.generation, kind));
    }

    /// Log and return a rejected action
    pub(crate) fn reject(&self, action: &str, reason: IllegalAction) -> GameError {
        tracing::warn!("Rejected {}: {}", action, reason);
        GameError::IllegalAction(reason)
    }

    // ----- Queries -----

    #[inline]
    pub fn current_player_index(&self) -> usize {
        self.state.current_player_index
    }

    pub fn player_hand_count(&self, index: usize) -> Result<usize, GameError> {
        self.player(index).map(|p| p.hand.len())
    }

    pub fn player(&self, index: usize) -> Result<&Player, GameError> {
        self.state
            .players
            .get(index)
            .ok_or(GameError::IllegalAction(IllegalAction::UnknownPlayer(index)))
    }

    pub fn players(&self) -> &[Player; PLAYER_COUNT] {
        &self.state.players
    }

    /// The human seat's cards
    pub fn human_hand(&self) -> &[Card] {
        &self.state.players[HUMAN_SEAT].hand
    }

    pub fn top_discard_card(&self) -> Option<Card> {
        self.state.top_discard()
    }

    pub fn wildcard(&self) -> Option<Rank> {
        self.state.wildcard_rank()
    }

    pub fn wildcard_definer(&self) -> Option<Card> {
        self.state.deck.wildcard_definer()
    }

    pub fn is_game_started(&self) -> bool {
        self.state.phase != RoundPhase::NotStarted
    }

    pub fn is_game_ended(&self) -> bool {
        self.state.phase == RoundPhase::Ended
    }

    pub fn phase(&self) -> RoundPhase {
        self.state.phase
    }

    pub fn generation(&self) -> u64 {
        self.state.generation
    }

    pub fn round_number(&self) -> u32 {
        self.state.round_number
    }

    pub fn draw_pile_len(&self) -> usize {
        self.state.deck.draw_pile_len()
    }

    pub fn discard_pile_len(&self) -> usize {
        self.state.deck.discard_pile_len()
    }

    pub fn cards_in_circulation(&self) -> usize {
        self.state.cards_in_circulation()
    }

    /// Cumulative penalty points per seat
    pub fn scores(&self) -> [u32; PLAYER_COUNT] {
        self.state.scores()
    }

    pub fn last_round(&self) -> Option<&RoundSummary> {
        self.state.last_round.as_ref()
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn events(&mut self) -> &mut EventBus {
        &mut self.events
    }

    /// True while an AI seat holds the turn of a live round
    pub fn is_ai_turn(&self) -> bool {
        matches!(
            self.state.phase,
            RoundPhase::AwaitingDraw | RoundPhase::AwaitingDiscardOrBeat
        ) && self.state.current_player().is_ai()
    }
}

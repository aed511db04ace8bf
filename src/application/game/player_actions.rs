//! Human seat actions
//!
//! Each action checks turn and phase first. A rejected action is logged and
//! returned as an `IllegalAction` without touching the round.

use super::TurnOrchestrator;
use crate::domain::entities::Card;
use crate::domain::errors::{GameError, IllegalAction};
use crate::domain::services::is_beat_eligible;
use crate::domain::value_objects::{RoundPhase, HUMAN_SEAT};
use crate::infrastructure::events::{DrawSource, GameEventKind};

impl TurnOrchestrator {
    fn check_human_turn(&self, expected: RoundPhase) -> Result<(), IllegalAction> {
        let phase = self.state.phase;
        match phase {
            RoundPhase::NotStarted => return Err(IllegalAction::GameNotStarted),
            RoundPhase::Ended => return Err(IllegalAction::GameEnded),
            _ => {}
        }
        if self.state.current_player_index != HUMAN_SEAT {
            return Err(IllegalAction::NotYourTurn {
                player: HUMAN_SEAT,
                current: self.state.current_player_index,
            });
        }
        if phase != expected {
            return Err(IllegalAction::WrongPhase {
                expected,
                actual: phase,
            });
        }
        Ok(())
    }

    pub fn player_draw_from_deck(&mut self) -> Result<Card, GameError> {
        self.check_human_turn(RoundPhase::AwaitingDraw)
            .map_err(|e| self.reject("draw from deck", e))?;

        let card = match self.state.deck.draw() {
            Ok(card) => card,
            Err(e) => {
                tracing::warn!("Human draw failed: {}", e);
                return Err(e);
            }
        };
        self.finish_human_draw(card, DrawSource::Deck);
        Ok(card)
    }

    pub fn player_draw_from_discard(&mut self) -> Result<Card, GameError> {
        self.check_human_turn(RoundPhase::AwaitingDraw)
            .map_err(|e| self.reject("draw from discard", e))?;

        let card = self
            .state
            .deck
            .take_discard()
            .map_err(|_| self.reject("draw from discard", IllegalAction::EmptyDiscardPile))?;
        self.finish_human_draw(card, DrawSource::Discard);
        Ok(card)
    }

    fn finish_human_draw(&mut self, card: Card, source: DrawSource) {
        self.state.players[HUMAN_SEAT].hand.push(card);
        self.state.phase = RoundPhase::AwaitingDiscardOrBeat;
        tracing::debug!("Human drew {} from {}", card, source.as_str());
        self.emit(GameEventKind::CardDrawn {
            player_index: HUMAN_SEAT,
            card,
            source,
        });
    }

    pub fn player_discard_card(&mut self, card: Card) -> Result<(), GameError> {
        self.check_human_turn(RoundPhase::AwaitingDiscardOrBeat)
            .map_err(|e| self.reject("discard", e))?;

        self.discard_from_seat(HUMAN_SEAT, card)
    }

    /// Claim the round. Only allowed after drawing, with a fully melded hand.
    pub fn player_try_beat(&mut self) -> Result<(), GameError> {
        self.check_human_turn(RoundPhase::AwaitingDiscardOrBeat)
            .map_err(|e| self.reject("beat", e))?;

        if !is_beat_eligible(&self.state.players[HUMAN_SEAT].hand) {
            return Err(self.reject("beat", IllegalAction::NotEligibleToBeat));
        }

        tracing::info!("Human beats round {}", self.state.round_number);
        self.end_round(Some(HUMAN_SEAT));
        Ok(())
    }
}

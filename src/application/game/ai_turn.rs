//! AI seat turns
//!
//! An AI turn is two steps: draw, then beat or discard. A driver may pause
//! between them, so each step carries the generation it was scheduled for
//! and does nothing if the round has since been replaced.

use super::TurnOrchestrator;
use crate::domain::entities::{Card, DifficultyTier, Rank};
use crate::domain::errors::GameError;
use crate::domain::value_objects::RoundPhase;
use crate::infrastructure::events::{DrawSource, GameEventKind};

/// Outcome of one AI step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiStep {
    Drew {
        player_index: usize,
        card: Card,
        source: DrawSource,
    },
    Discarded {
        player_index: usize,
        card: Card,
    },
    Beat {
        player_index: usize,
    },
    /// Neither pile had a card; the round ended without a winner
    RoundVoided,
    /// Scheduled for a round that no longer exists
    Stale,
    /// No AI step to take right now
    Idle,
}

impl TurnOrchestrator {
    /// Seat, tier and wildcard of the AI expected to act in `phase`
    fn acting_ai(&self, generation: u64, phase: RoundPhase) -> Option<(usize, DifficultyTier, Rank)> {
        if generation != self.state.generation {
            tracing::warn!(
                "Dropping AI step for generation {}, round is at {}",
                generation,
                self.state.generation
            );
            return None;
        }
        if self.state.phase != phase {
            return None;
        }
        let index = self.state.current_player_index;
        let tier = self.state.players[index].difficulty()?;
        let wildcard = self.state.wildcard_rank()?;
        Some((index, tier, wildcard))
    }

    fn idle_or_stale(&self, generation: u64) -> AiStep {
        if generation != self.state.generation {
            AiStep::Stale
        } else {
            AiStep::Idle
        }
    }

    /// Draw for the AI whose turn it is
    pub fn ai_draw_step(&mut self, generation: u64) -> Result<AiStep, GameError> {
        let Some((index, tier, wildcard)) = self.acting_ai(generation, RoundPhase::AwaitingDraw)
        else {
            return Ok(self.idle_or_stale(generation));
        };

        let hand = self.state.players[index].hand.clone();
        let top = self.state.top_discard();
        let take_discard =
            top.is_some_and(|card| self.ai.should_draw_from_discard(tier, &hand, wildcard, card));

        let (card, source) = if take_discard {
            (self.state.deck.take_discard()?, DrawSource::Discard)
        } else {
            match self.state.deck.draw() {
                Ok(card) => (card, DrawSource::Deck),
                Err(GameError::DeckExhausted) if top.is_some() => {
                    tracing::debug!("{} falls back to the discard pile", self.state.players[index].name);
                    (self.state.deck.take_discard()?, DrawSource::Discard)
                }
                Err(GameError::DeckExhausted) => {
                    tracing::warn!("{} cannot draw from either pile", self.state.players[index].name);
                    self.end_round(None);
                    return Ok(AiStep::RoundVoided);
                }
                Err(e) => return Err(e),
            }
        };

        self.state.players[index].hand.push(card);
        self.state.phase = RoundPhase::AwaitingDiscardOrBeat;
        tracing::debug!(
            "{} drawing from {}: {}",
            self.state.players[index].name,
            source.as_str(),
            card
        );
        self.emit(GameEventKind::CardDrawn {
            player_index: index,
            card,
            source,
        });

        Ok(AiStep::Drew {
            player_index: index,
            card,
            source,
        })
    }

    /// Beat if the AI wants to, otherwise discard and pass the turn
    pub fn ai_finish_turn_step(&mut self, generation: u64) -> Result<AiStep, GameError> {
        let Some((index, tier, wildcard)) =
            self.acting_ai(generation, RoundPhase::AwaitingDiscardOrBeat)
        else {
            return Ok(self.idle_or_stale(generation));
        };

        let hand = self.state.players[index].hand.clone();
        if self.ai.should_beat(tier, &hand) {
            tracing::info!("{} beats", self.state.players[index].name);
            self.end_round(Some(index));
            return Ok(AiStep::Beat {
                player_index: index,
            });
        }

        let card = self.ai.decide_card_to_discard(tier, &hand, wildcard)?;
        self.discard_from_seat(index, card)?;

        Ok(AiStep::Discarded {
            player_index: index,
            card,
        })
    }

    /// Run AI turns back to back until the human is up or the round ends.
    /// Returns the number of completed AI turns.
    pub fn play_ai_turns_immediately(&mut self) -> Result<usize, GameError> {
        let mut turns = 0;
        while self.is_ai_turn() {
            let generation = self.state.generation;
            if self.state.phase == RoundPhase::AwaitingDraw {
                match self.ai_draw_step(generation)? {
                    AiStep::Drew { .. } => {}
                    _ => break,
                }
            }
            match self.ai_finish_turn_step(generation)? {
                AiStep::Discarded { .. } => turns += 1,
                AiStep::Beat { .. } => {
                    turns += 1;
                    break;
                }
                _ => break,
            }
        }
        Ok(turns)
    }
}

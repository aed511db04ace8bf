//! Bot strategies module
//!
//! One engine, four difficulty tiers. Each decision is a single function that
//! matches on `DifficultyTier` and hands off to the tier's module. Every call
//! is stateless apart from the random source: it reads a copy of the hand and
//! never touches the piles.

mod easy_bot;
mod expert_bot;
mod hard_bot;
mod medium_bot;

use crate::domain::entities::{Card, DifficultyTier, Rank};
use crate::domain::errors::{GameError, IllegalAction};
use crate::domain::services::{
    evaluate_all_cards, evaluate_hand_quality, is_beat_eligible, CardEvaluation,
};
use crate::infrastructure::random::{RandomSource, SeededRandom};

/// AI decision engine shared by every bot seat
pub struct AiStrategyEngine {
    random: Box<dyn RandomSource>,
}

impl AiStrategyEngine {
    pub fn new(random: Box<dyn RandomSource>) -> Self {
        Self { random }
    }

    pub fn seeded(seed: Option<u64>) -> Self {
        Self::new(Box::new(SeededRandom::new(seed)))
    }

    /// Decide whether to take `top_discard` instead of drawing blind
    pub fn should_draw_from_discard(
        &mut self,
        tier: DifficultyTier,
        hand: &[Card],
        wildcard_rank: Rank,
        top_discard: Card,
    ) -> bool {
        let current = evaluate_hand_quality(hand, wildcard_rank);
        let mut with_candidate = hand.to_vec();
        with_candidate.push(top_discard);
        let potential = evaluate_hand_quality(&with_candidate, wildcard_rank);

        let take = match tier {
            DifficultyTier::Easy => {
                easy_bot::should_draw_from_discard(current, potential, self.random.as_mut())
            }
            DifficultyTier::Medium => medium_bot::should_draw_from_discard(current, potential),
            DifficultyTier::Hard | DifficultyTier::Expert => hard_bot::analyze_draw_decision(
                hand,
                &with_candidate,
                top_discard,
                wildcard_rank,
                potential - current,
            ),
        };

        tracing::debug!(
            "[{}] discard top {} scores {:.1} -> {:.1}, take: {}",
            tier,
            top_discard,
            current,
            potential,
            take
        );
        take
    }

    /// Pick the card to throw away
    pub fn decide_card_to_discard(
        &mut self,
        tier: DifficultyTier,
        hand: &[Card],
        wildcard_rank: Rank,
    ) -> Result<Card, GameError> {
        if hand.is_empty() {
            return Err(IllegalAction::EmptyHand.into());
        }

        let evaluations = evaluate_all_cards(hand, wildcard_rank);
        let choice = match tier {
            DifficultyTier::Easy => easy_bot::choose_discard(&evaluations, self.random.as_mut()),
            DifficultyTier::Medium => medium_bot::choose_discard(&evaluations),
            DifficultyTier::Hard => hard_bot::choose_discard(hand, &evaluations, wildcard_rank),
            DifficultyTier::Expert => expert_bot::choose_discard(hand, &evaluations),
        };

        let card = choice.ok_or(GameError::IllegalAction(IllegalAction::EmptyHand))?;
        tracing::debug!("[{}] discards {}", tier, card);
        Ok(card)
    }

    /// Decide whether to end the round. Only ever true for an eligible hand.
    pub fn should_beat(&mut self, tier: DifficultyTier, hand: &[Card]) -> bool {
        if !is_beat_eligible(hand) {
            return false;
        }

        match tier {
            DifficultyTier::Easy => easy_bot::should_beat(self.random.as_mut()),
            DifficultyTier::Medium => medium_bot::should_beat(self.random.as_mut()),
            DifficultyTier::Hard | DifficultyTier::Expert => true,
        }
    }
}

impl std::fmt::Debug for AiStrategyEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiStrategyEngine").finish_non_exhaustive()
    }
}

/// First card with the lowest utility
fn lowest_utility<'a>(
    evaluations: impl IntoIterator<Item = &'a CardEvaluation>,
) -> Option<&'a CardEvaluation> {
    evaluations
        .into_iter()
        .min_by(|a, b| a.utility_score.total_cmp(&b.utility_score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Suit;
    use crate::infrastructure::random::ScriptedRandom;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    fn engine(values: &[f64]) -> AiStrategyEngine {
        AiStrategyEngine::new(Box::new(ScriptedRandom::new(values.iter().copied())))
    }

    fn winning_hand() -> Vec<Card> {
        vec![
            card(Rank::Five, Suit::Spades),
            card(Rank::Five, Suit::Hearts),
            card(Rank::Five, Suit::Diamonds),
            card(Rank::Seven, Suit::Clubs),
            card(Rank::Eight, Suit::Clubs),
            card(Rank::Nine, Suit::Clubs),
            card(Rank::King, Suit::Spades),
            card(Rank::King, Suit::Hearts),
            card(Rank::King, Suit::Diamonds),
        ]
    }

    #[test]
    fn test_empty_hand_discard_is_illegal() {
        let mut ai = engine(&[]);
        for tier in [
            DifficultyTier::Easy,
            DifficultyTier::Medium,
            DifficultyTier::Hard,
            DifficultyTier::Expert,
        ] {
            assert_eq!(
                ai.decide_card_to_discard(tier, &[], Rank::Two),
                Err(GameError::IllegalAction(IllegalAction::EmptyHand))
            );
        }
    }

    #[test]
    fn test_easy_beat_depends_on_roll() {
        let mut ai = engine(&[0.2, 0.5]);
        assert!(!ai.should_beat(DifficultyTier::Easy, &winning_hand()));
        assert!(ai.should_beat(DifficultyTier::Easy, &winning_hand()));
    }

    #[test]
    fn test_medium_beat_depends_on_roll() {
        let mut ai = engine(&[0.05, 0.11]);
        assert!(!ai.should_beat(DifficultyTier::Medium, &winning_hand()));
        assert!(ai.should_beat(DifficultyTier::Medium, &winning_hand()));
    }

    #[test]
    fn test_ineligible_hand_never_beats() {
        let mut hand = winning_hand();
        hand[0] = card(Rank::Two, Suit::Hearts);
        let mut ai = engine(&[0.99, 0.99]);
        for tier in [
            DifficultyTier::Easy,
            DifficultyTier::Medium,
            DifficultyTier::Hard,
            DifficultyTier::Expert,
        ] {
            assert!(!ai.should_beat(tier, &hand));
        }
    }

    #[test]
    fn test_easy_draw_needs_benefit_and_roll() {
        let hand = vec![card(Rank::Ace, Suit::Spades), card(Rank::Ace, Suit::Hearts)];
        let useful = card(Rank::Ace, Suit::Diamonds);

        let mut ai = engine(&[0.6, 0.8]);
        assert!(!ai.should_draw_from_discard(DifficultyTier::Easy, &hand, Rank::Seven, useful));
        assert!(ai.should_draw_from_discard(DifficultyTier::Easy, &hand, Rank::Seven, useful));
    }

    #[test]
    fn test_medium_draw_threshold() {
        // A♠ A♥ -> A♠ A♥ A♦ improves by 10
        let hand = vec![card(Rank::Ace, Suit::Spades), card(Rank::Ace, Suit::Hearts)];
        let mut ai = engine(&[]);
        assert!(ai.should_draw_from_discard(
            DifficultyTier::Medium,
            &hand,
            Rank::Seven,
            card(Rank::Ace, Suit::Diamonds)
        ));
        assert!(!ai.should_draw_from_discard(
            DifficultyTier::Medium,
            &hand,
            Rank::Seven,
            card(Rank::Jack, Suit::Clubs)
        ));
    }
}

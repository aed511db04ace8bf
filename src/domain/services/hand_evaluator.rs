//! Hand evaluator - scores hand quality and per-card utility
//!
//! Stateless: every call re-runs the combination detector on the hand it is
//! given. Nothing here is cached between decisions.

use std::collections::HashSet;

use serde::Serialize;

use super::combination_detector::find_combinations;
use crate::domain::entities::{Card, Combination, Rank};

/// Bonus per wildcard-rank card held
pub const WILDCARD_BONUS: f64 = 8.0;
/// Penalty per card covered by no combination
pub const ISOLATED_PENALTY: f64 = 2.0;
/// Bonus per distinct suit present
pub const SUIT_DIVERSITY_BONUS: f64 = 1.5;

/// Fixed utility reported for wildcard cards
pub const WILDCARD_UTILITY: f64 = 95.0;
/// Fixed combination count reported for wildcard cards
pub const WILDCARD_COMBINATION_COUNT: u32 = 10;

const COMPLETE_MEMBERSHIP_UTILITY: f64 = 20.0;
const INCOMPLETE_MEMBERSHIP_UTILITY: f64 = 8.0;
const POTENTIAL_WEIGHT: f64 = 5.0;
const SAME_RANK_POTENTIAL: f64 = 1.5;
const SUIT_NEIGHBOUR_REACH: u8 = 2;

/// Minimum hand size for a beat
pub const MIN_BEAT_HAND_SIZE: usize = 9;

/// Per-card evaluation, computed fresh for each decision
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardEvaluation {
    pub card: Card,
    pub utility_score: f64,
    pub combination_count: u32,
    pub is_in_completed_combination: bool,
}

/// Cards covered by at least one of `combinations`
pub fn covered_cards<'a>(combinations: impl IntoIterator<Item = &'a Combination>) -> HashSet<Card> {
    combinations
        .into_iter()
        .flat_map(|combo| combo.cards.iter().copied())
        .collect()
}

/// Score a hand. Higher is better, never below zero.
pub fn evaluate_hand_quality(hand: &[Card], wildcard_rank: Rank) -> f64 {
    let combinations = find_combinations(hand);

    let melds: f64 = combinations.iter().map(|c| c.priority as f64).sum();

    let wildcards = hand.iter().filter(|c| c.is_wildcard(wildcard_rank)).count() as f64;

    let covered = covered_cards(&combinations);
    let isolated = hand.iter().filter(|c| !covered.contains(c)).count() as f64;

    let suits: HashSet<_> = hand.iter().map(|c| c.suit).collect();

    let score = melds + wildcards * WILDCARD_BONUS - isolated * ISOLATED_PENALTY
        + suits.len() as f64 * SUIT_DIVERSITY_BONUS;

    tracing::trace!(
        melds,
        wildcards,
        isolated,
        suits = suits.len(),
        score,
        "Evaluated hand"
    );

    score.max(0.0)
}

/// How promising a card is given its neighbours in the hand.
///
/// 1.5 per other card of the same rank, plus `3 - distance` for every other
/// same-suit card within two ranks. `index` identifies the card itself so
/// double-deck duplicates still count as neighbours.
pub fn card_potential(hand: &[Card], index: usize) -> f64 {
    let card = hand[index];
    let mut potential = 0.0;

    for (other_index, other) in hand.iter().enumerate() {
        if other_index == index {
            continue;
        }
        if other.rank == card.rank {
            potential += SAME_RANK_POTENTIAL;
        }
        if other.suit == card.suit {
            let distance = other.rank.value().abs_diff(card.rank.value());
            if distance <= SUIT_NEIGHBOUR_REACH {
                potential += (3 - distance) as f64;
            }
        }
    }

    potential
}

/// Evaluate every card of the hand, in hand order
pub fn evaluate_all_cards(hand: &[Card], wildcard_rank: Rank) -> Vec<CardEvaluation> {
    let combinations = find_combinations(hand);

    hand.iter()
        .enumerate()
        .map(|(index, &card)| {
            if card.is_wildcard(wildcard_rank) {
                return CardEvaluation {
                    card,
                    utility_score: WILDCARD_UTILITY,
                    combination_count: WILDCARD_COMBINATION_COUNT,
                    is_in_completed_combination: false,
                };
            }

            let mut utility = 0.0;
            let mut count = 0;
            let mut in_completed = false;
            for combo in combinations.iter().filter(|c| c.contains(&card)) {
                count += 1;
                if combo.is_complete() {
                    utility += COMPLETE_MEMBERSHIP_UTILITY;
                    in_completed = true;
                } else {
                    utility += INCOMPLETE_MEMBERSHIP_UTILITY;
                }
            }
            utility += POTENTIAL_WEIGHT * card_potential(hand, index);

            CardEvaluation {
                card,
                utility_score: utility,
                combination_count: count,
                is_in_completed_combination: in_completed,
            }
        })
        .collect()
}

/// True when the hand may end the round: at least nine cards, each covered
/// by a trinca or sequence.
pub fn is_beat_eligible(hand: &[Card]) -> bool {
    if hand.len() < MIN_BEAT_HAND_SIZE {
        return false;
    }
    let combinations = find_combinations(hand);
    let covered = covered_cards(combinations.iter().filter(|c| c.is_complete()));
    hand.iter().all(|c| covered.contains(c))
}

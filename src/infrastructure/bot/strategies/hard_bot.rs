//! Hard bot strategy
//!
//! Looks at what a card does to the melds, not only to the score. Discards
//! by simulating each removal.

use super::lowest_utility;
use crate::domain::entities::{Card, Rank};
use crate::domain::services::{evaluate_hand_quality, find_combinations, CardEvaluation};

/// Completed-meld cards above this utility are never simulated as discards
pub const HIGH_VALUE_UTILITY: f64 = 50.0;

/// Gain needed alongside a new complete meld
const MELD_IMPROVEMENT: f64 = 3.0;
/// Gain that justifies the draw on its own
const PURE_IMPROVEMENT: f64 = 8.0;

fn complete_count(hand: &[Card]) -> usize {
    find_combinations(hand)
        .iter()
        .filter(|c| c.is_complete())
        .count()
}

/// Take the candidate when it completes a meld, improves the hand a lot, or
/// is a wildcard.
pub fn analyze_draw_decision(
    hand: &[Card],
    with_candidate: &[Card],
    candidate: Card,
    wildcard_rank: Rank,
    improvement: f64,
) -> bool {
    let before = complete_count(hand);
    let after = complete_count(with_candidate);

    if after > before && improvement > MELD_IMPROVEMENT {
        return true;
    }
    if improvement > PURE_IMPROVEMENT {
        return true;
    }
    candidate.is_wildcard(wildcard_rank)
}

/// Keep the hand that scores best after the discard
pub fn choose_discard(
    hand: &[Card],
    evaluations: &[CardEvaluation],
    wildcard_rank: Rank,
) -> Option<Card> {
    let mut best: Option<(Card, f64)> = None;

    for (index, eval) in evaluations.iter().enumerate() {
        if eval.is_in_completed_combination && eval.utility_score > HIGH_VALUE_UTILITY {
            continue;
        }
        let remaining: Vec<Card> = hand
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, c)| *c)
            .collect();
        let score = evaluate_hand_quality(&remaining, wildcard_rank);

        tracing::trace!("Without {} the hand scores {:.1}", eval.card, score);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((eval.card, score));
        }
    }

    best.map(|(card, _)| card)
        .or_else(|| lowest_utility(evaluations).map(|eval| eval.card))
}

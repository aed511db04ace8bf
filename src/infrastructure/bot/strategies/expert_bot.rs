//! Expert bot strategy
//!
//! Holds on to multi-purpose cards and avoids feeding the next player
//! middle ranks or lone cards.

use std::ops::RangeInclusive;

use super::lowest_utility;
use crate::domain::entities::Card;
use crate::domain::services::CardEvaluation;

const COMBINATION_WEIGHT: f64 = 10.0;
/// Middle ranks fit the most sequences for the next player
const DANGEROUS_RANKS: RangeInclusive<u8> = 5..=9;

fn is_dangerous(card: &Card, hand: &[Card]) -> bool {
    if DANGEROUS_RANKS.contains(&card.rank.value()) {
        return true;
    }
    hand.iter().filter(|c| c.rank == card.rank).count() == 1
}

pub fn choose_discard(hand: &[Card], evaluations: &[CardEvaluation]) -> Option<Card> {
    let mut ranked: Vec<&CardEvaluation> = evaluations.iter().collect();
    ranked.sort_by(|a, b| {
        let ka = COMBINATION_WEIGHT * a.combination_count as f64 + a.utility_score;
        let kb = COMBINATION_WEIGHT * b.combination_count as f64 + b.utility_score;
        ka.total_cmp(&kb)
    });

    lowest_utility(ranked.iter().copied().filter(|e| !is_dangerous(&e.card, hand)))
        .or_else(|| lowest_utility(ranked.iter().copied()))
        .map(|eval| eval.card)
}

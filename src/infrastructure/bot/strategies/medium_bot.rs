//! Medium bot strategy
//!
//! Greedy on hand score. Keeps completed melds together when discarding.

use super::lowest_utility;
use crate::domain::entities::Card;
use crate::domain::services::CardEvaluation;
use crate::infrastructure::random::RandomSource;

/// Score gain needed before the discard is worth taking
const DRAW_MARGIN: f64 = 5.0;
const BEAT_ROLL: f64 = 0.1;

pub fn should_draw_from_discard(current: f64, potential: f64) -> bool {
    potential > current + DRAW_MARGIN
}

pub fn choose_discard(evaluations: &[CardEvaluation]) -> Option<Card> {
    lowest_utility(evaluations.iter().filter(|e| !e.is_in_completed_combination))
        .or_else(|| lowest_utility(evaluations))
        .map(|eval| eval.card)
}

pub fn should_beat(random: &mut dyn RandomSource) -> bool {
    random.next_unit() > BEAT_ROLL
}

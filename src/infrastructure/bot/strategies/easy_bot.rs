//! Easy bot strategy
//!
//! Mostly blind play: takes a useful discard only now and then and throws
//! away one of its weakest cards at random.

use crate::domain::entities::Card;
use crate::domain::services::CardEvaluation;
use crate::infrastructure::random::RandomSource;

/// Roll needed to take a beneficial discard
const DRAW_ROLL: f64 = 0.7;
/// Roll needed to end the round on an eligible hand
const BEAT_ROLL: f64 = 0.3;
/// How many of the weakest cards the discard is picked from
const DISCARD_POOL: usize = 3;

pub fn should_draw_from_discard(current: f64, potential: f64, random: &mut dyn RandomSource) -> bool {
    potential > current && random.next_unit() > DRAW_ROLL
}

pub fn choose_discard(evaluations: &[CardEvaluation], random: &mut dyn RandomSource) -> Option<Card> {
    let mut ranked: Vec<&CardEvaluation> = evaluations.iter().collect();
    ranked.sort_by(|a, b| a.utility_score.total_cmp(&b.utility_score));

    let pool = ranked.len().min(DISCARD_POOL);
    if pool == 0 {
        return None;
    }
    ranked.get(random.next_index(pool)).map(|eval| eval.card)
}

pub fn should_beat(random: &mut dyn RandomSource) -> bool {
    random.next_unit() > BEAT_ROLL
}

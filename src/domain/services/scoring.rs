use crate::domain::entities::{Card, Rank};

/// Penalty value of a single card: Ace 1, face cards 10, otherwise its rank
#[inline]
pub fn card_penalty(card: &Card) -> u32 {
    match card.rank {
        Rank::Ace => 1,
        rank if rank.is_face() => 10,
        rank => rank.value() as u32,
    }
}

/// Penalty for a hand left over at the end of a round
pub fn hand_penalty(hand: &[Card]) -> u32 {
    hand.iter().map(card_penalty).sum()
}

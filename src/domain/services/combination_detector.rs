//! Combination detector - finds trincas, sequences and near-melds in a hand
//!
//! Two independent passes (by rank, then by suit) whose results are simply
//! concatenated. A card may therefore appear in several combinations; the
//! result is not a partition of the hand.

use smallvec::SmallVec;

use crate::domain::entities::{Card, Combination, Suit};

/// Find every combination in `hand`
pub fn find_combinations(hand: &[Card]) -> Vec<Combination> {
    let mut combinations = Vec::with_capacity(hand.len());
    combinations.extend(find_rank_combinations(hand));
    combinations.extend(find_suit_combinations(hand));
    combinations
}

/// Rank pass: 3+ of a rank is a trinca, exactly 2 is a near-meld
pub fn find_rank_combinations(hand: &[Card]) -> Vec<Combination> {
    let mut by_rank: [SmallVec<[Card; 8]>; 13] = Default::default();
    for &card in hand {
        by_rank[card.rank.value() as usize - 1].push(card);
    }

    by_rank
        .into_iter()
        .filter_map(|cards| match cards.len() {
            0 | 1 => None,
            2 => Some(Combination::incomplete(cards)),
            _ => Some(Combination::trinca(cards)),
        })
        .collect()
}

/// Suit pass: runs of consecutive ranks within a suit.
///
/// A card exactly two ranks above the run's last card neither extends nor
/// ends the run; it is skipped and the scan keeps comparing against the same
/// last card. Skipped cards are not consumed and may seed a later run.
pub fn find_suit_combinations(hand: &[Card]) -> Vec<Combination> {
    let mut combinations = Vec::new();

    for suit in Suit::ALL {
        let mut cards: SmallVec<[Card; 16]> = hand.iter().copied().filter(|c| c.suit == suit).collect();
        if cards.len() < 2 {
            continue;
        }
        cards.sort_by_key(|c| c.rank.value());

        let mut start = 0;
        while start < cards.len() {
            let mut run: SmallVec<[Card; 8]> = SmallVec::new();
            run.push(cards[start]);
            let mut last_consumed = start;

            for (index, card) in cards.iter().enumerate().skip(start + 1) {
                let last = run[run.len() - 1].rank.value();
                let next = card.rank.value();
                if next == last + 1 {
                    run.push(*card);
                    last_consumed = index;
                } else if next > last + 2 {
                    break;
                }
            }

            match run.len() {
                0 | 1 => {}
                2 => combinations.push(Combination::incomplete(run)),
                _ => combinations.push(Combination::sequencia(run)),
            }

            start = last_consumed + 1;
        }
    }

    combinations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{CombinationKind, Rank};

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn test_trinca_and_pair_by_rank() {
        let hand = vec![
            card(Rank::Five, Suit::Spades),
            card(Rank::Five, Suit::Hearts),
            card(Rank::Five, Suit::Diamonds),
            card(Rank::King, Suit::Clubs),
            card(Rank::King, Suit::Hearts),
            card(Rank::Two, Suit::Clubs),
        ];

        let combos = find_rank_combinations(&hand);
        assert_eq!(combos.len(), 2);
        assert_eq!(combos[0].kind, CombinationKind::Trinca);
        assert_eq!(combos[0].priority, 15);
        assert_eq!(combos[0].cards.len(), 3);
        assert_eq!(combos[1].kind, CombinationKind::Incomplete);
        assert_eq!(combos[1].priority, 5);
    }

    #[test]
    fn test_four_of_a_kind_is_one_trinca() {
        let hand: Vec<Card> = Suit::ALL.iter().map(|&s| card(Rank::Nine, s)).collect();
        let combos = find_rank_combinations(&hand);
        assert_eq!(combos.len(), 1);
        assert_eq!(combos[0].cards.len(), 4);
    }

    #[test]
    fn test_sequence_detected_out_of_order() {
        let hand = vec![
            card(Rank::Nine, Suit::Clubs),
            card(Rank::Seven, Suit::Clubs),
            card(Rank::Eight, Suit::Clubs),
            card(Rank::Ten, Suit::Clubs),
        ];

        let combos = find_suit_combinations(&hand);
        assert_eq!(combos.len(), 1);
        assert_eq!(combos[0].kind, CombinationKind::Sequencia);
        assert_eq!(combos[0].priority, 15);
        let ranks: Vec<u8> = combos[0].cards.iter().map(|c| c.rank.value()).collect();
        assert_eq!(ranks, vec![7, 8, 9, 10]);
    }

    #[test]
    fn test_two_card_run_is_incomplete() {
        let hand = vec![card(Rank::Eight, Suit::Clubs), card(Rank::Nine, Suit::Clubs)];
        let combos = find_suit_combinations(&hand);
        assert_eq!(combos.len(), 1);
        assert_eq!(combos[0].kind, CombinationKind::Incomplete);
    }

    #[test]
    fn test_one_rank_gap_is_skipped_not_breaking() {
        // 5 is last+2 from 3, so it is skipped; 6 then ends the run
        let hand = vec![
            card(Rank::Three, Suit::Hearts),
            card(Rank::Five, Suit::Hearts),
            card(Rank::Six, Suit::Hearts),
        ];

        let combos = find_suit_combinations(&hand);
        // [3] closes alone, then 5 seeds [5, 6]
        assert_eq!(combos.len(), 1);
        assert_eq!(combos[0].kind, CombinationKind::Incomplete);
        let ranks: Vec<u8> = combos[0].cards.iter().map(|c| c.rank.value()).collect();
        assert_eq!(ranks, vec![5, 6]);
    }

    #[test]
    fn test_skipped_card_does_not_end_run() {
        // Double deck: 4, 4, 5, 6 of spades. The second 4 is neither last+1
        // nor beyond last+2, so the run 4-5-6 still forms around it.
        let hand = vec![
            card(Rank::Four, Suit::Spades),
            card(Rank::Four, Suit::Spades),
            card(Rank::Five, Suit::Spades),
            card(Rank::Six, Suit::Spades),
        ];

        let combos = find_suit_combinations(&hand);
        assert_eq!(combos.len(), 1);
        assert_eq!(combos[0].kind, CombinationKind::Sequencia);
        assert_eq!(combos[0].cards.len(), 3);
    }

    #[test]
    fn test_large_gap_ends_run() {
        let hand = vec![
            card(Rank::Ace, Suit::Diamonds),
            card(Rank::Two, Suit::Diamonds),
            card(Rank::Three, Suit::Diamonds),
            card(Rank::Nine, Suit::Diamonds),
            card(Rank::Ten, Suit::Diamonds),
        ];

        let combos = find_suit_combinations(&hand);
        assert_eq!(combos.len(), 2);
        assert_eq!(combos[0].kind, CombinationKind::Sequencia);
        assert_eq!(combos[1].kind, CombinationKind::Incomplete);
    }

    #[test]
    fn test_passes_are_concatenated() {
        // 7♣ 8♣ 9♣ plus 7♥ 7♦: the 7♣ sits in both a trinca and a sequence
        let hand = vec![
            card(Rank::Seven, Suit::Clubs),
            card(Rank::Eight, Suit::Clubs),
            card(Rank::Nine, Suit::Clubs),
            card(Rank::Seven, Suit::Hearts),
            card(Rank::Seven, Suit::Diamonds),
        ];

        let combos = find_combinations(&hand);
        assert_eq!(combos.len(), 2);
        let seven = card(Rank::Seven, Suit::Clubs);
        assert!(combos.iter().all(|c| c.contains(&seven)));
    }

    #[test]
    fn test_empty_hand() {
        assert!(find_combinations(&[]).is_empty());
    }
}

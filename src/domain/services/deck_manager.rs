//! Deck & wildcard manager
//!
//! Owns the draw pile and discard pile for one round. The top of each pile is
//! the last element of its `Vec`.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::entities::{Card, Rank, Suit};
use crate::domain::errors::{GameError, IllegalAction};

/// Cards in one standard deck
pub const CARDS_PER_DECK: usize = 52;

/// Build `deck_count` decks in suit-major, rank-minor order (unshuffled)
pub fn build_deck(deck_count: u8) -> Vec<Card> {
    let mut cards = Vec::with_capacity(CARDS_PER_DECK * deck_count as usize);
    for _ in 0..deck_count {
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
    }
    cards
}

/// Draw pile, discard pile and wildcard for a round
#[derive(Debug, Clone)]
pub struct DeckManager {
    draw_pile: Vec<Card>,
    discard_pile: Vec<Card>,
    wildcard_definer: Option<Card>,
    wildcard_rank: Option<Rank>,
    deck_count: u8,
    rng: ChaCha8Rng,
}

impl DeckManager {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            draw_pile: Vec::new(),
            discard_pile: Vec::new(),
            wildcard_definer: None,
            wildcard_rank: None,
            deck_count: 1,
            rng,
        }
    }

    /// Rebuild and shuffle the draw pile, clearing the discard pile and wildcard
    pub fn reset(&mut self, deck_count: u8) {
        self.deck_count = deck_count;
        self.draw_pile = build_deck(deck_count);
        self.draw_pile.shuffle(&mut self.rng);
        self.discard_pile.clear();
        self.wildcard_definer = None;
        self.wildcard_rank = None;
    }

    /// Turn the top card (vira). It leaves play for the rest of the round and
    /// the rank after it becomes wild.
    pub fn define_wildcard(&mut self) -> Result<Rank, GameError> {
        let definer = self
            .draw_pile
            .pop()
            .ok_or(GameError::InvalidWildcardDefinition)?;
        let rank = definer.rank.next_wrapping();
        self.wildcard_definer = Some(definer);
        self.wildcard_rank = Some(rank);
        tracing::info!("Vira is {}, wildcard rank is {:?}", definer, rank);
        Ok(rank)
    }

    /// Draw from the draw pile, refilling it from the discard pile when empty.
    ///
    /// The refill keeps the discard top in place and shuffles everything
    /// below it into the draw pile. With one card or less on the discard pile
    /// nothing moves and `DeckExhausted` is returned.
    pub fn draw(&mut self) -> Result<Card, GameError> {
        if self.draw_pile.is_empty() {
            self.refill_from_discard()?;
        }
        self.draw_pile.pop().ok_or(GameError::DeckExhausted)
    }

    fn refill_from_discard(&mut self) -> Result<(), GameError> {
        if self.discard_pile.len() <= 1 {
            return Err(GameError::DeckExhausted);
        }
        let top = self.discard_pile.split_off(self.discard_pile.len() - 1);
        self.draw_pile.append(&mut self.discard_pile);
        self.discard_pile = top;
        self.draw_pile.shuffle(&mut self.rng);
        tracing::info!(
            "Draw pile empty, reshuffled {} discarded cards",
            self.draw_pile.len()
        );
        Ok(())
    }

    /// Take the top card of the discard pile
    pub fn take_discard(&mut self) -> Result<Card, GameError> {
        self.discard_pile
            .pop()
            .ok_or(GameError::IllegalAction(IllegalAction::EmptyDiscardPile))
    }

    pub fn discard(&mut self, card: Card) {
        self.discard_pile.push(card);
    }

    #[inline]
    pub fn top_discard(&self) -> Option<Card> {
        self.discard_pile.last().copied()
    }

    #[inline]
    pub fn draw_pile_len(&self) -> usize {
        self.draw_pile.len()
    }

    #[inline]
    pub fn discard_pile_len(&self) -> usize {
        self.discard_pile.len()
    }

    pub fn wildcard_rank(&self) -> Option<Rank> {
        self.wildcard_rank
    }

    pub fn wildcard_definer(&self) -> Option<Card> {
        self.wildcard_definer
    }

    pub fn deck_count(&self) -> u8 {
        self.deck_count
    }

    /// Every card instance in the round, the vira included
    pub fn total_cards(&self) -> usize {
        CARDS_PER_DECK * self.deck_count as usize
    }

    /// Cards held by the two piles
    pub fn pile_cards(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len()
    }

    #[cfg(test)]
    pub(crate) fn replace_piles(&mut self, draw_pile: Vec<Card>, discard_pile: Vec<Card>) {
        self.draw_pile = draw_pile;
        self.discard_pile = discard_pile;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_build_deck_order() {
        let deck = build_deck(1);
        assert_eq!(deck.len(), 52);
        assert_eq!(deck[0], Card::new(Rank::Ace, Suit::Clubs));
        assert_eq!(deck[12], Card::new(Rank::King, Suit::Clubs));
        assert_eq!(deck[13], Card::new(Rank::Ace, Suit::Diamonds));
        assert_eq!(deck[51], Card::new(Rank::King, Suit::Spades));

        let unique: HashSet<Card> = deck.iter().copied().collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn test_double_deck_has_duplicates() {
        let deck = build_deck(2);
        assert_eq!(deck.len(), 104);
        let unique: HashSet<Card> = deck.iter().copied().collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn test_reset_shuffles_same_cards() {
        let mut deck = DeckManager::new(Some(7));
        deck.reset(1);
        assert_eq!(deck.draw_pile_len(), 52);
        assert_ne!(deck.draw_pile, build_deck(1));

        let mut sorted = deck.draw_pile.clone();
        sorted.sort();
        let mut expected = build_deck(1);
        expected.sort();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn test_seeded_shuffle_is_reproducible() {
        let mut a = DeckManager::new(Some(42));
        let mut b = DeckManager::new(Some(42));
        a.reset(2);
        b.reset(2);
        assert_eq!(a.draw_pile, b.draw_pile);
    }

    #[test]
    fn test_define_wildcard_removes_definer() {
        let mut deck = DeckManager::new(Some(1));
        deck.reset(1);
        let top = *deck.draw_pile.last().unwrap();

        let rank = deck.define_wildcard().unwrap();
        assert_eq!(rank, top.rank.next_wrapping());
        assert_eq!(deck.wildcard_definer(), Some(top));
        assert_eq!(deck.wildcard_rank(), Some(rank));
        assert_eq!(deck.draw_pile_len(), 51);
    }

    #[test]
    fn test_define_wildcard_on_empty_deck() {
        let mut deck = DeckManager::new(Some(1));
        assert_eq!(deck.define_wildcard(), Err(GameError::InvalidWildcardDefinition));
    }

    #[test]
    fn test_draw_exhausted_with_single_discard() {
        let mut deck = DeckManager::new(Some(3));
        let top = Card::new(Rank::Nine, Suit::Hearts);
        deck.discard(top);

        assert_eq!(deck.draw(), Err(GameError::DeckExhausted));
        assert_eq!(deck.draw_pile_len(), 0);
        assert_eq!(deck.discard_pile_len(), 1);
        assert_eq!(deck.top_discard(), Some(top));
    }

    #[test]
    fn test_draw_exhausted_with_nothing() {
        let mut deck = DeckManager::new(Some(3));
        assert_eq!(deck.draw(), Err(GameError::DeckExhausted));
    }

    #[test]
    fn test_draw_reshuffles_all_but_top() {
        let mut deck = DeckManager::new(Some(3));
        let top = Card::new(Rank::Nine, Suit::Hearts);
        deck.discard(Card::new(Rank::Two, Suit::Clubs));
        deck.discard(Card::new(Rank::Three, Suit::Clubs));
        deck.discard(Card::new(Rank::Four, Suit::Clubs));
        deck.discard(top);

        let drawn = deck.draw().unwrap();
        assert_ne!(drawn, top);
        assert_eq!(deck.draw_pile_len(), 2);
        assert_eq!(deck.discard_pile_len(), 1);
        assert_eq!(deck.top_discard(), Some(top));
        assert!(deck.draw().is_ok());
    }

    #[test]
    fn test_take_discard() {
        let mut deck = DeckManager::new(None);
        assert_eq!(
            deck.take_discard(),
            Err(GameError::IllegalAction(IllegalAction::EmptyDiscardPile))
        );

        let card = Card::new(Rank::Queen, Suit::Spades);
        deck.discard(card);
        assert_eq!(deck.take_discard(), Ok(card));
        assert_eq!(deck.top_discard(), None);
    }
}

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::Card;

/// Priority of a trinca (three or more of a rank)
pub const TRINCA_PRIORITY: i32 = 15;
/// Base priority of a three-card sequence; each extra card adds `SEQUENCE_STEP`
pub const SEQUENCE_BASE_PRIORITY: i32 = 12;
pub const SEQUENCE_STEP: i32 = 3;
/// Priority of a two-card near-meld
pub const INCOMPLETE_PRIORITY: i32 = 5;

/// Meld kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombinationKind {
    Trinca,
    Sequencia,
    Incomplete,
}

impl CombinationKind {
    #[inline]
    pub fn is_complete(&self) -> bool {
        !matches!(self, CombinationKind::Incomplete)
    }
}

/// A meld (or near-meld) found in a hand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combination {
    pub cards: SmallVec<[Card; 8]>,
    pub kind: CombinationKind,
    pub priority: i32,
}

impl Combination {
    pub fn trinca(cards: SmallVec<[Card; 8]>) -> Self {
        Self {
            cards,
            kind: CombinationKind::Trinca,
            priority: TRINCA_PRIORITY,
        }
    }

    pub fn sequencia(cards: SmallVec<[Card; 8]>) -> Self {
        let extra = cards.len().saturating_sub(3) as i32;
        Self {
            cards,
            kind: CombinationKind::Sequencia,
            priority: SEQUENCE_BASE_PRIORITY + SEQUENCE_STEP * extra,
        }
    }

    pub fn incomplete(cards: SmallVec<[Card; 8]>) -> Self {
        Self {
            cards,
            kind: CombinationKind::Incomplete,
            priority: INCOMPLETE_PRIORITY,
        }
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.kind.is_complete()
    }

    #[inline]
    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Card;

/// AI difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl DifficultyTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyTier::Easy => "easy",
            DifficultyTier::Medium => "medium",
            DifficultyTier::Hard => "hard",
            DifficultyTier::Expert => "expert",
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DifficultyTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(DifficultyTier::Easy),
            "medium" => Ok(DifficultyTier::Medium),
            "hard" => Ok(DifficultyTier::Hard),
            "expert" => Ok(DifficultyTier::Expert),
            other => Err(format!("unknown difficulty '{}'", other)),
        }
    }
}

/// Who controls a seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "difficulty")]
pub enum Seat {
    Human,
    Ai(DifficultyTier),
}

/// Player entity - one seat at the table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub name: String,
    pub hand: Vec<Card>,
    pub seat: Seat,
    /// Cumulative penalty points across rounds
    pub score: u32,
    /// Set when this player beat the current round
    pub has_beat: bool,
}

impl Player {
    pub fn human(name: impl Into<String>) -> Self {
        Self::new(name, Seat::Human)
    }

    pub fn ai(name: impl Into<String>, difficulty: DifficultyTier) -> Self {
        Self::new(name, Seat::Ai(difficulty))
    }

    fn new(name: impl Into<String>, seat: Seat) -> Self {
        Self {
            name: name.into(),
            hand: Vec::with_capacity(12),
            seat,
            score: 0,
            has_beat: false,
        }
    }

    #[inline]
    pub fn is_ai(&self) -> bool {
        matches!(self.seat, Seat::Ai(_))
    }

    pub fn difficulty(&self) -> Option<DifficultyTier> {
        match self.seat {
            Seat::Ai(tier) => Some(tier),
            Seat::Human => None,
        }
    }

    /// Remove one copy of `card` from the hand
    pub fn remove_card(&mut self, card: &Card) -> bool {
        match self.hand.iter().position(|c| c == card) {
            Some(pos) => {
                self.hand.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Clear per-round state, keeping the cumulative score
    pub fn reset_for_round(&mut self) {
        self.hand.clear();
        self.has_beat = false;
    }
}

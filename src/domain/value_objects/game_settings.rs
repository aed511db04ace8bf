use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::entities::DifficultyTier;
use crate::domain::services::CARDS_PER_DECK;

/// Seats at the table: one human and three AI opponents
pub const PLAYER_COUNT: usize = 4;
/// Index of the human seat
pub const HUMAN_SEAT: usize = 0;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameSettings {
    /// Fixed at 4
    pub number_of_players: u8,
    /// Cards dealt to every player
    pub cards_per_player: u8,
    /// Play with two 52-card decks
    pub use_double_decks: bool,
    /// Difficulty of seats 1..=3
    pub ai_difficulty: [DifficultyTier; 3],
    /// Lower bound of the AI think delay, in seconds
    pub min_think_time: f64,
    /// Upper bound of the AI think delay, in seconds
    pub max_think_time: f64,
    /// Seed for shuffling and AI randomness; entropy when absent
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            number_of_players: PLAYER_COUNT as u8,
            cards_per_player: 9,
            use_double_decks: false,
            ai_difficulty: [
                DifficultyTier::Easy,
                DifficultyTier::Medium,
                DifficultyTier::Hard,
            ],
            min_think_time: 0.8,
            max_think_time: 2.0,
            seed: None,
        }
    }
}

impl GameSettings {
    #[inline]
    pub fn deck_count(&self) -> u8 {
        if self.use_double_decks {
            2
        } else {
            1
        }
    }

    /// Think delay bounds
    pub fn think_time_range(&self) -> (Duration, Duration) {
        (
            Duration::from_secs_f64(self.min_think_time),
            Duration::from_secs_f64(self.max_think_time),
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.number_of_players as usize != PLAYER_COUNT {
            return Err(ConfigError::PlayerCount(self.number_of_players));
        }
        if self.cards_per_player == 0 {
            return Err(ConfigError::CardsPerPlayer(self.cards_per_player));
        }
        // Deal plus the vira must leave at least one card to draw
        let needed = PLAYER_COUNT * self.cards_per_player as usize + 1;
        if needed >= CARDS_PER_DECK * self.deck_count() as usize {
            return Err(ConfigError::CardsPerPlayer(self.cards_per_player));
        }
        if !self.min_think_time.is_finite()
            || !self.max_think_time.is_finite()
            || self.min_think_time < 0.0
            || self.min_think_time > self.max_think_time
        {
            return Err(ConfigError::ThinkTime {
                min: self.min_think_time,
                max: self.max_think_time,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Number of players must be 4, got {0}")]
    PlayerCount(u8),
    #[error("Cannot deal {0} cards per player from this deck")]
    CardsPerPlayer(u8),
    #[error("Invalid think time range {min}..{max}")]
    ThinkTime { min: f64, max: f64 },
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

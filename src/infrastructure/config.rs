//! Environment configuration
//!
//! Every variable is optional and falls back to `GameSettings::default()`.

use std::str::FromStr;

use crate::domain::entities::DifficultyTier;
use crate::domain::value_objects::{ConfigError, GameSettings};

pub const ENV_CARDS_PER_PLAYER: &str = "PIFE_CARDS_PER_PLAYER";
pub const ENV_DOUBLE_DECK: &str = "PIFE_DOUBLE_DECK";
pub const ENV_AI_DIFFICULTY: &str = "PIFE_AI_DIFFICULTY";
pub const ENV_MIN_THINK_SECS: &str = "PIFE_MIN_THINK_SECS";
pub const ENV_MAX_THINK_SECS: &str = "PIFE_MAX_THINK_SECS";
pub const ENV_SEED: &str = "PIFE_SEED";

impl GameSettings {
    /// Load settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut settings = GameSettings::default();

        if let Some(value) = lookup(ENV_CARDS_PER_PLAYER) {
            settings.cards_per_player = parse(ENV_CARDS_PER_PLAYER, &value)?;
        }
        if let Some(value) = lookup(ENV_DOUBLE_DECK) {
            settings.use_double_decks = parse_flag(ENV_DOUBLE_DECK, &value)?;
        }
        if let Some(value) = lookup(ENV_AI_DIFFICULTY) {
            settings.ai_difficulty = parse_difficulties(&value)?;
        }
        if let Some(value) = lookup(ENV_MIN_THINK_SECS) {
            settings.min_think_time = parse(ENV_MIN_THINK_SECS, &value)?;
        }
        if let Some(value) = lookup(ENV_MAX_THINK_SECS) {
            settings.max_think_time = parse(ENV_MAX_THINK_SECS, &value)?;
        }
        if let Some(value) = lookup(ENV_SEED) {
            settings.seed = Some(parse(ENV_SEED, &value)?);
        }

        settings.validate()?;
        Ok(settings)
    }
}

fn invalid(key: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn parse<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    value.trim().parse().map_err(|e: T::Err| invalid(key, e))
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(invalid(key, format!("'{}' is not a boolean", other))),
    }
}

fn parse_difficulties(value: &str) -> Result<[DifficultyTier; 3], ConfigError> {
    let tiers = value
        .split(',')
        .map(|part| part.parse::<DifficultyTier>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| invalid(ENV_AI_DIFFICULTY, e))?;

    match tiers.as_slice() {
        [tier] => Ok([*tier; 3]),
        [a, b, c] => Ok([*a, *b, *c]),
        _ => Err(invalid(
            ENV_AI_DIFFICULTY,
            format!("expected 1 or 3 tiers, got {}", tiers.len()),
        )),
    }
}

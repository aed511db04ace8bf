//! Rule engine and AI opponents for Pife, a four-player rummy-style meld game.
//!
//! `domain` holds the cards, meld detection, scoring and deck. `application`
//! runs the turns. `infrastructure` holds the bots, events, randomness and
//! environment config.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{AiStep, GameSession, TurnOrchestrator};
pub use domain::{GameError, IllegalAction};

pub mod game;

pub use game::{AiStep, GameSession, TurnOrchestrator};

mod ai_turn;
mod game_session;
mod player_actions;
mod turn_orchestrator;

pub use ai_turn::*;
pub use game_session::*;
pub use turn_orchestrator::*;

mod game_settings;
mod round_state;

pub use game_settings::*;
pub use round_state::*;

mod card;
mod combination;
mod player;

pub use card::*;
pub use combination::*;
pub use player::*;

pub mod bot;
pub mod config;
pub mod events;
pub mod random;

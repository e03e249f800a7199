//! Core engine types: seats, RNG, phases, actions, configuration.
//!
//! Everything here is independent of the card catalog and the deck.

pub mod action;
pub mod config;
pub mod phase;
pub mod player;
pub mod rng;

pub use action::GameAction;
pub use config::{ConfigError, GameConfig, SeatConfig, MAX_EXPANSION, MAX_PLAYERS};
pub use phase::Phase;
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};

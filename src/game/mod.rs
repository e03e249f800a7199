//! Game orchestration.
//!
//! ## Key Types
//!
//! - `Game`: one session; owns seats, deck, random source and provider
//! - `Player`: per-seat state, including the seat's answer log
//! - `GameError`: everything that can stop a step
//!
//! A session is `Game::new` (or `Game::replay`), optionally
//! `rotate_seats`, then `start`, then `play_round` until it returns
//! `true`. Every answer a seat gives is logged; `session_log` together
//! with the seed replays the session exactly.

pub mod error;
#[allow(clippy::module_inception)]
pub mod game;
pub mod player;
pub mod round;

pub use error::GameError;
pub use game::{Game, OPENING_DISCARD, OPENING_HAND};
pub use player::Player;

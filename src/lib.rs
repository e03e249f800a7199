//! # rust-tableau
//!
//! Rules-state core of a tableau-building card game.
//!
//! ## Design Principles
//!
//! 1. **Data-Driven Cards**: Card blueprints come from a line-based text
//!    catalog, parsed once and shared read-only between games.
//!
//! 2. **One Owner Per Transition**: Only the deck moves cards between
//!    locations, and it checks every argument before changing anything.
//!
//! 3. **Deterministic Sessions**: Each game owns one seeded random source.
//!    The seed plus the logged answers reproduce a session exactly.
//!
//! ## Modules
//!
//! - `core`: Seats, RNG, phases, actions, configuration
//! - `cards`: Design attributes, powers, the catalog parser and registry
//! - `zones`: Card locations and the deck state machine
//! - `decision`: Choice union, provider traits, interactive and replay providers
//! - `game`: Seat state, game setup and the round driver
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use rust_tableau::{Catalog, Deck, GameRng, Location, PlayerId};
//!
//! let catalog = Arc::new(Catalog::parse("N:Gene Mill\nT:2:3:1\nG:GENE\nE:base@0:3\n").unwrap());
//! let mut deck = Deck::new(catalog);
//! deck.build_with(0, 0..0);
//! deck.shuffle(&mut GameRng::new(42));
//!
//! let hand = deck.draw(2, Location::Hand, Some(PlayerId::new(0))).unwrap();
//! deck.discard(&hand[..1]).unwrap();
//! assert_eq!(deck.reshuffle_from_discard(), 1);
//! assert_eq!(deck.remaining(), 2);
//! ```

pub mod cards;
pub mod core;
pub mod decision;
pub mod game;
pub mod zones;

pub use crate::core::{GameAction, GameConfig, GameRng, GameRngState, Phase, PlayerId, PlayerMap, SeatConfig};

pub use crate::cards::{Card, CardId, Catalog, CatalogError, Design, DesignId, Power, PowerCode};

pub use crate::zones::{Deck, DeckError, Location};

pub use crate::decision::{
    Answer, Choice, ChoiceHandler, ChoiceKind, DecisionProvider, HandlerDecision, InteractiveDecision, ProtocolError,
    ReplayDecision, SessionLog,
};

pub use crate::game::{Game, GameError, Player};

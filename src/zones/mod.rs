//! Card locations and the deck that moves cards between them.
//!
//! ## Key Types
//!
//! - `Location`: the zone a card occupies (deck, discard, hand, table, ...)
//! - `Deck`: every card of one game plus the undrawn pile order
//! - `DeckError`: rejected deck mutations
//!
//! Only `Deck` changes a card's location or owner.

pub mod deck;
pub mod location;

pub use deck::{Deck, DeckError, PROMO_START_WORLDS};
pub use location::Location;

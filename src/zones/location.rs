//! Card locations.

use serde::{Deserialize, Serialize};

/// Where a card is. Every card is in exactly one location.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Location {
    /// Undrawn pile.
    #[default]
    Deck,
    Discard,
    Hand,
    /// Face up in a tableau.
    Active,
    /// Face down on a world, as a good.
    Good,
    Saved,
    Aside,
    Campaign,
}

impl Location {
    pub const ALL: [Location; 8] = [
        Location::Deck,
        Location::Discard,
        Location::Hand,
        Location::Active,
        Location::Good,
        Location::Saved,
        Location::Aside,
        Location::Campaign,
    ];

    /// Whether a card here must have an owner.
    ///
    /// Only the draw pile and the discard pile hold unowned cards.
    #[must_use]
    pub const fn requires_owner(self) -> bool {
        !matches!(self, Location::Deck | Location::Discard)
    }

    /// Upper-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Location::Deck => "DECK",
            Location::Discard => "DISCARD",
            Location::Hand => "HAND",
            Location::Active => "ACTIVE",
            Location::Good => "GOOD",
            Location::Saved => "SAVED",
            Location::Aside => "ASIDE",
            Location::Campaign => "CAMPAIGN",
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

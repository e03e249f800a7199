//! Card instances - the physical cards of one game.
//!
//! A `Card` is one copy of a design inside a `Deck`. Its location, owner,
//! goods and table order change during play; everything printed on it is
//! looked up through its design.
//!
//! Cards are only mutated by `Deck` operations. Callers get shared
//! references.

use serde::{Deserialize, Serialize};

use super::definition::{Design, DesignId};
use super::registry::Catalog;
use crate::core::PlayerId;
use crate::zones::Location;

/// Stable position of a card in its deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub usize);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Get the raw position.
    #[must_use]
    pub const fn raw(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// One physical card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Design this card is a copy of.
    pub design: DesignId,

    /// Design name, copied for display.
    pub name: String,

    /// Set while the card is used face-down as a good on another card.
    pub covering: bool,

    /// Goods currently placed on this card.
    pub num_goods: u32,

    /// World this card sits on while it is a good.
    pub on_world: Option<CardId>,

    /// Owning seat. `None` while in the draw pile or the discard pile.
    pub owner: Option<PlayerId>,

    pub location: Location,

    /// Order in which the card joined its owner's tableau.
    pub order: u32,
}

impl Card {
    pub(crate) fn new(design: &Design) -> Self {
        Self {
            design: design.id,
            name: design.name.clone(),
            covering: false,
            num_goods: 0,
            on_world: None,
            owner: None,
            location: Location::Deck,
            order: 0,
        }
    }

    /// Whether the card is owned by a seat.
    #[must_use]
    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }

    /// The card's design.
    #[must_use]
    pub fn design<'c>(&self, catalog: &'c Catalog) -> Option<&'c Design> {
        catalog.get(self.design)
    }

    /// Printed cost, or 0 if the design is missing.
    #[must_use]
    pub fn cost(&self, catalog: &Catalog) -> u32 {
        self.design(catalog).map_or(0, |d| d.cost)
    }

    /// Printed victory points, or 0 if the design is missing.
    #[must_use]
    pub fn vp(&self, catalog: &Catalog) -> i32 {
        self.design(catalog).map_or(0, |d| d.vp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_card_starts_in_deck_unowned() {
        let catalog = Catalog::parse("N:Old Earth\nT:1:3:2\nE:base@0:1\n").unwrap();
        let design = catalog.get(DesignId::new(0)).unwrap();
        let card = Card::new(design);

        assert_eq!(card.location, Location::Deck);
        assert_eq!(card.owner, None);
        assert!(!card.covering);
        assert_eq!(card.num_goods, 0);
        assert_eq!(card.cost(&catalog), 3);
        assert_eq!(card.vp(&catalog), 2);
        assert_eq!(card.design(&catalog).unwrap().name, "Old Earth");
    }

    #[test]
    fn test_ownership() {
        let catalog = Catalog::parse("N:Old Earth\nT:1:3:2\nE:base@0:1\n").unwrap();
        let mut card = Card::new(catalog.get(DesignId::new(0)).unwrap());
        card.owner = Some(PlayerId::new(1));

        assert!(card.is_owned_by(PlayerId::new(1)));
        assert!(!card.is_owned_by(PlayerId::new(0)));
        assert_eq!(CardId::new(3).to_string(), "Card(3)");
    }
}

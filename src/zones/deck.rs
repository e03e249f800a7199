//! The deck: every physical card of one game and the undrawn pile order.
//!
//! Cards keep a stable position (`CardId`) for the whole game. The undrawn
//! pile is a separate sequence of ids, front = top, so shuffling only
//! permutes that sequence.
//!
//! ## Invariants
//!
//! - The draw order holds exactly the cards whose location is `Deck`.
//! - Cards in `Deck` or `Discard` are unowned; everywhere else they have
//!   an owner.
//! - Mutations check every id and owner before touching anything, so a
//!   failed call leaves the deck as it was.

use std::collections::VecDeque;
use std::ops::Range;
use std::sync::Arc;

use thiserror::Error;

use super::location::Location;
use crate::cards::{Card, CardFlag, CardId, CardType, Catalog, Design, GoodType};
use crate::core::{GameRng, PlayerId};

/// Design indices of the promotional start worlds, left out of a normal deck.
pub const PROMO_START_WORLDS: Range<u32> = 0..6;

/// Errors from deck mutations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("{0} is not in this deck")]
    UnknownCard(CardId),
    #[error("a card in {0} must have an owner")]
    OwnerRequired(Location),
    #[error("{0} is in a pile and cannot be owned")]
    PileCard(CardId),
    #[error("{0} is not on its owner's table")]
    NotOnTable(CardId),
    #[error("{0} has no goods")]
    NoGoods(CardId),
}

/// Cards of one game.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use rust_tableau::cards::Catalog;
/// use rust_tableau::core::{GameRng, PlayerId};
/// use rust_tableau::zones::{Deck, Location};
///
/// let catalog = Arc::new(Catalog::parse("N:Spice World\nT:1:2:1\nE:base@0:4\n").unwrap());
/// let mut deck = Deck::new(catalog);
/// deck.build_with(0, 0..0);
/// deck.shuffle(&mut GameRng::new(7));
///
/// let hand = deck.draw(3, Location::Hand, Some(PlayerId::new(0))).unwrap();
/// assert_eq!(hand.len(), 3);
/// assert_eq!(deck.remaining(), 1);
///
/// // Fails closed: nothing is drawn when the pile is short.
/// assert!(deck.draw(2, Location::Hand, Some(PlayerId::new(0))).unwrap().is_empty());
/// assert_eq!(deck.remaining(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Deck {
    catalog: Arc<Catalog>,
    cards: Vec<Card>,
    draw_order: VecDeque<CardId>,
}

impl Deck {
    /// Create an empty deck over a catalog.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            cards: Vec::new(),
            draw_order: VecDeque::new(),
        }
    }

    /// The catalog the deck is built from.
    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Remove every card.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.draw_order.clear();
    }

    /// Rebuild the deck for an expansion level, leaving out the
    /// promotional start worlds. Returns the number of cards.
    pub fn build(&mut self, expansion: u8) -> usize {
        self.build_with(expansion, PROMO_START_WORLDS)
    }

    /// Rebuild the deck for an expansion level, leaving out the designs
    /// in `reserved`. Returns the number of cards.
    ///
    /// Every included design gets exactly its copy count of cards, all in
    /// the draw pile in catalog order.
    pub fn build_with(&mut self, expansion: u8, reserved: Range<u32>) -> usize {
        self.clear();
        let catalog = Arc::clone(&self.catalog);
        for design in catalog.iter() {
            if !design.in_expansion(expansion) || reserved.contains(&design.id.raw()) {
                continue;
            }
            for _ in 0..design.expansion.count {
                let id = CardId::new(self.cards.len());
                self.cards.push(Card::new(design));
                self.draw_order.push_back(id);
            }
        }
        tracing::debug!(expansion, cards = self.cards.len(), "deck built");
        self.cards.len()
    }

    /// Shuffle the draw pile. Card attributes are untouched.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(self.draw_order.make_contiguous());
        tracing::trace!(remaining = self.draw_order.len(), "deck shuffled");
    }

    /// Draw `count` cards from the top of the pile into `location`.
    ///
    /// Returns the drawn ids in draw order. If fewer than `count` cards
    /// remain, nothing is drawn and the result is empty.
    ///
    /// # Errors
    ///
    /// Returns `DeckError::OwnerRequired` if `location` needs an owner and
    /// `owner` is `None`.
    pub fn draw(
        &mut self,
        count: usize,
        location: Location,
        owner: Option<PlayerId>,
    ) -> Result<Vec<CardId>, DeckError> {
        check_destination(location, owner)?;
        if self.draw_order.len() < count {
            tracing::trace!(count, remaining = self.draw_order.len(), "draw refused");
            return Ok(Vec::new());
        }
        let drawn: Vec<CardId> = self.draw_order.iter().take(count).copied().collect();
        for &id in &drawn {
            self.relocate(id, location, owner);
        }
        tracing::trace!(count, %location, "cards drawn");
        Ok(drawn)
    }

    /// Return every discarded card to the bottom of the pile, in position
    /// order. Does not shuffle. Returns the number of cards moved.
    pub fn reshuffle_from_discard(&mut self) -> usize {
        let discarded: Vec<CardId> = self.in_location(Location::Discard);
        for &id in &discarded {
            self.relocate(id, Location::Deck, None);
        }
        tracing::debug!(cards = discarded.len(), "discard pile returned to deck");
        discarded.len()
    }

    /// Move cards to a location, keeping their owners.
    ///
    /// Moving to `Deck` puts cards at the bottom of the pile; moving to
    /// `Deck` or `Discard` clears the owner.
    ///
    /// # Errors
    ///
    /// Returns `DeckError::UnknownCard` for a bad id, or
    /// `DeckError::OwnerRequired` if `location` needs an owner and a card
    /// has none.
    pub fn set_location(&mut self, cards: &[CardId], location: Location) -> Result<(), DeckError> {
        self.check_ids(cards)?;
        if location.requires_owner() && cards.iter().any(|id| self.cards[id.raw()].owner.is_none()) {
            return Err(DeckError::OwnerRequired(location));
        }
        for &id in cards {
            let owner = self.cards[id.raw()].owner;
            self.relocate(id, location, owner);
        }
        Ok(())
    }

    /// Change the owner of cards outside the piles. Goods on a world
    /// follow it.
    ///
    /// # Errors
    ///
    /// Returns `DeckError::UnknownCard` for a bad id, `DeckError::PileCard`
    /// when giving an owner to a pile card, or `DeckError::OwnerRequired`
    /// when clearing the owner of a card that needs one.
    pub fn set_owner(&mut self, cards: &[CardId], owner: Option<PlayerId>) -> Result<(), DeckError> {
        self.check_ids(cards)?;
        for &id in cards {
            let location = self.cards[id.raw()].location;
            match owner {
                Some(_) if !location.requires_owner() => return Err(DeckError::PileCard(id)),
                None if location.requires_owner() => return Err(DeckError::OwnerRequired(location)),
                _ => {}
            }
        }
        for &id in cards {
            self.cards[id.raw()].owner = owner;
            for good in self.goods_on(id) {
                self.cards[good.raw()].owner = owner;
            }
        }
        Ok(())
    }

    /// Move specific cards to a location and owner, wherever they are,
    /// including out of the middle of the pile.
    ///
    /// # Errors
    ///
    /// Returns `DeckError::UnknownCard` for a bad id, or
    /// `DeckError::OwnerRequired` if `location` needs an owner and `owner`
    /// is `None`.
    pub fn pick(
        &mut self,
        cards: &[CardId],
        location: Location,
        owner: Option<PlayerId>,
    ) -> Result<(), DeckError> {
        self.check_ids(cards)?;
        check_destination(location, owner)?;
        for &id in cards {
            self.relocate(id, location, owner);
        }
        Ok(())
    }

    /// Discard cards. Discarded cards lose their owner, goods and covering
    /// mark; goods sitting on a discarded world are discarded with it.
    ///
    /// # Errors
    ///
    /// Returns `DeckError::UnknownCard` for a bad id.
    pub fn discard(&mut self, cards: &[CardId]) -> Result<(), DeckError> {
        self.pick(cards, Location::Discard, None)
    }

    /// Put a card face up on `owner`'s table with a placement order.
    ///
    /// # Errors
    ///
    /// Returns `DeckError::UnknownCard` for a bad id.
    pub fn place_on_table(&mut self, card: CardId, owner: PlayerId, order: u32) -> Result<(), DeckError> {
        self.check_ids(&[card])?;
        self.relocate(card, Location::Active, Some(owner));
        self.cards[card.raw()].order = order;
        Ok(())
    }

    /// Place `good` face down on `world` as a good for the world's owner.
    ///
    /// # Errors
    ///
    /// Returns `DeckError::UnknownCard` for a bad id, or
    /// `DeckError::NotOnTable` if `world` is not an owned active card or
    /// is the good itself.
    pub fn place_good(&mut self, world: CardId, good: CardId) -> Result<(), DeckError> {
        self.check_ids(&[world, good])?;
        let target = &self.cards[world.raw()];
        let owner = match target.owner {
            Some(owner) if target.location == Location::Active && world != good => owner,
            _ => return Err(DeckError::NotOnTable(world)),
        };
        self.detach_good(good);
        self.relocate(good, Location::Good, Some(owner));
        let card = &mut self.cards[good.raw()];
        card.covering = true;
        card.on_world = Some(world);
        self.cards[world.raw()].num_goods += 1;
        Ok(())
    }

    /// Discard one of the goods sitting on `world`, the earliest by card
    /// position. Returns the discarded good card.
    ///
    /// # Errors
    ///
    /// Returns `DeckError::UnknownCard` for a bad id, `DeckError::NotOnTable`
    /// if `world` is not an owned active card, or `DeckError::NoGoods` if
    /// it has no goods.
    pub fn consume_good(&mut self, world: CardId) -> Result<CardId, DeckError> {
        self.check_ids(&[world])?;
        let target = &self.cards[world.raw()];
        let owner = match target.owner {
            Some(owner) if target.location == Location::Active => owner,
            _ => return Err(DeckError::NotOnTable(world)),
        };
        if target.num_goods == 0 {
            return Err(DeckError::NoGoods(world));
        }
        let good = self
            .goods_on(world)
            .into_iter()
            .find(|good| self.cards[good.raw()].is_owned_by(owner))
            .ok_or(DeckError::NoGoods(world))?;
        self.relocate(good, Location::Discard, None);
        Ok(good)
    }

    /// Cards left in the draw pile.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.draw_order.len()
    }

    /// Whether at least `count` cards are left to draw.
    #[must_use]
    pub fn has_cards(&self, count: usize) -> bool {
        self.draw_order.len() >= count
    }

    /// The draw pile, top first.
    #[must_use]
    pub fn draw_order(&self) -> &VecDeque<CardId> {
        &self.draw_order
    }

    /// Total number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the deck has no cards at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// A card by id.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.raw())
    }

    /// A card by id, as an error on a miss.
    ///
    /// # Errors
    ///
    /// Returns `DeckError::UnknownCard` for a bad id.
    pub fn require(&self, id: CardId) -> Result<&Card, DeckError> {
        self.card(id).ok_or(DeckError::UnknownCard(id))
    }

    /// Every card, by position.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Every card id, by position.
    #[must_use]
    pub fn ids(&self) -> Vec<CardId> {
        (0..self.cards.len()).map(CardId::new).collect()
    }

    /// The design of a card.
    #[must_use]
    pub fn design(&self, id: CardId) -> Option<&Design> {
        self.card(id).and_then(|card| self.catalog.get(card.design))
    }

    /// Cards owned by a seat, any location.
    #[must_use]
    pub fn owned_by(&self, player: PlayerId) -> Vec<CardId> {
        self.select(|card| card.is_owned_by(player))
    }

    /// Cards of a seat in one location, e.g. its hand.
    #[must_use]
    pub fn at(&self, location: Location, player: PlayerId) -> Vec<CardId> {
        self.select(|card| card.location == location && card.is_owned_by(player))
    }

    /// Cards in one location, any owner.
    #[must_use]
    pub fn in_location(&self, location: Location) -> Vec<CardId> {
        self.select(|card| card.location == location)
    }

    /// Of `cards`, those whose design has `flag`.
    #[must_use]
    pub fn with_flag(&self, cards: &[CardId], flag: CardFlag) -> Vec<CardId> {
        self.filter(cards, |_, design| design.has_flag(flag))
    }

    /// Of `cards`, those carrying goods. With `GoodType::Any` any good
    /// counts; otherwise the design must produce that kind.
    #[must_use]
    pub fn with_goods(&self, cards: &[CardId], good: GoodType) -> Vec<CardId> {
        self.filter(cards, |card, design| {
            card.num_goods > 0 && (good == GoodType::Any || design.good == good)
        })
    }

    /// Of `cards`, those of a type, cheapest first. Equal costs keep their
    /// relative order.
    #[must_use]
    pub fn of_type_by_cost(&self, cards: &[CardId], card_type: CardType) -> Vec<CardId> {
        let mut result = self.filter(cards, |_, design| design.card_type == card_type);
        result.sort_by_key(|id| self.design(*id).map_or(0, |design| design.cost));
        result
    }

    /// `cards` sorted by table placement order, ascending.
    #[must_use]
    pub fn by_table_order(&self, cards: &[CardId]) -> Vec<CardId> {
        let mut result: Vec<CardId> = cards.iter().copied().filter(|id| self.card(*id).is_some()).collect();
        result.sort_by_key(|id| self.cards[id.raw()].order);
        result
    }

    /// Of `cards`, those used as goods.
    #[must_use]
    pub fn covering(&self, cards: &[CardId]) -> Vec<CardId> {
        self.filter(cards, |card, _| card.covering)
    }

    fn select(&self, predicate: impl Fn(&Card) -> bool) -> Vec<CardId> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, card)| predicate(card))
            .map(|(index, _)| CardId::new(index))
            .collect()
    }

    fn filter(&self, cards: &[CardId], predicate: impl Fn(&Card, &Design) -> bool) -> Vec<CardId> {
        cards
            .iter()
            .copied()
            .filter(|id| {
                self.card(*id)
                    .and_then(|card| self.catalog.get(card.design).map(|design| predicate(card, design)))
                    .unwrap_or(false)
            })
            .collect()
    }

    fn check_ids(&self, cards: &[CardId]) -> Result<(), DeckError> {
        match cards.iter().find(|id| id.raw() >= self.cards.len()) {
            Some(&id) => Err(DeckError::UnknownCard(id)),
            None => Ok(()),
        }
    }

    /// Move one checked card, keeping the draw order in step with the
    /// `Deck` location.
    ///
    /// A good leaving `Good` is taken off its world. A world leaving
    /// `Active` takes its goods to the discard pile.
    fn relocate(&mut self, id: CardId, location: Location, owner: Option<PlayerId>) {
        if location != Location::Good {
            self.detach_good(id);
            self.cards[id.raw()].covering = false;
        }
        if self.cards[id.raw()].location == Location::Active && location != Location::Active {
            for good in self.goods_on(id) {
                self.relocate(good, Location::Discard, None);
            }
        }

        let was_in_deck = self.cards[id.raw()].location == Location::Deck;
        if was_in_deck && location != Location::Deck {
            if let Some(position) = self.draw_order.iter().position(|&entry| entry == id) {
                self.draw_order.remove(position);
            }
        } else if !was_in_deck && location == Location::Deck {
            self.draw_order.push_back(id);
        }

        let card = &mut self.cards[id.raw()];
        card.location = location;
        if location.requires_owner() {
            card.owner = owner;
        } else {
            card.owner = None;
            card.covering = false;
            card.num_goods = 0;
            card.order = 0;
        }
    }

    /// Goods sitting on `world`, in card position order.
    fn goods_on(&self, world: CardId) -> Vec<CardId> {
        self.select(|card| card.location == Location::Good && card.on_world == Some(world))
    }

    fn detach_good(&mut self, id: CardId) {
        if let Some(world) = self.cards[id.raw()].on_world.take() {
            let target = &mut self.cards[world.raw()];
            target.num_goods = target.num_goods.saturating_sub(1);
        }
    }
}

fn check_destination(location: Location, owner: Option<PlayerId>) -> Result<(), DeckError> {
    if location.requires_owner() && owner.is_none() {
        return Err(DeckError::OwnerRequired(location));
    }
    Ok(())
}

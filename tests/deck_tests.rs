//! Deck state machine tests.
//!
//! Property tests drive random operation sequences against a deck built
//! from the sample catalog and check the location invariants after every
//! step. The fixed scenarios pin down build, draw and reshuffle.

use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;
use rust_tableau::cards::{Card, CardId, Catalog};
use rust_tableau::core::{GameRng, PlayerId};
use rust_tableau::zones::{Deck, Location};

const P0: PlayerId = PlayerId(0);
const P1: PlayerId = PlayerId(1);

fn sample() -> Arc<Catalog> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/cards.txt");
    Arc::new(Catalog::load(path).unwrap())
}

fn assert_invariants(deck: &Deck) {
    let in_deck: HashSet<CardId> = deck.in_location(Location::Deck).into_iter().collect();
    let order: HashSet<CardId> = deck.draw_order().iter().copied().collect();
    assert_eq!(order.len(), deck.remaining(), "draw order holds a card twice");
    assert_eq!(order, in_deck, "draw order out of step with DECK location");

    for card in deck.cards() {
        assert_eq!(
            card.location.requires_owner(),
            card.owner.is_some(),
            "{} in {} has owner {:?}",
            card.name,
            card.location,
            card.owner
        );
    }

    for (index, world) in deck.cards().iter().enumerate() {
        let id = CardId::new(index);
        let goods: Vec<&Card> = deck
            .cards()
            .iter()
            .filter(|good| good.location == Location::Good && good.on_world == Some(id))
            .collect();
        assert_eq!(world.num_goods as usize, goods.len(), "{} goods out of step", world.name);
        if !goods.is_empty() {
            assert_eq!(world.location, Location::Active);
            assert!(goods.iter().all(|good| good.owner == world.owner && good.covering));
        }
    }
}

#[derive(Clone, Debug)]
enum Op {
    Shuffle(u64),
    Draw(usize, Location, PlayerId),
    Discard(usize),
    Place(usize, PlayerId),
    Reshuffle,
    Return(usize),
    Produce(usize, usize),
    Consume(usize),
}

fn op() -> impl Strategy<Value = Op> {
    let location = prop_oneof![
        Just(Location::Hand),
        Just(Location::Aside),
        Just(Location::Saved),
        Just(Location::Discard),
    ];
    let seat = prop_oneof![Just(P0), Just(P1)];
    prop_oneof![
        any::<u64>().prop_map(Op::Shuffle),
        (0usize..12, location, seat.clone()).prop_map(|(count, location, who)| Op::Draw(count, location, who)),
        (0usize..100).prop_map(Op::Discard),
        (0usize..100, seat).prop_map(|(index, who)| Op::Place(index, who)),
        Just(Op::Reshuffle),
        (0usize..100).prop_map(Op::Return),
        (0usize..100, 0usize..100).prop_map(|(world, good)| Op::Produce(world, good)),
        (0usize..100).prop_map(Op::Consume),
    ]
}

fn apply(deck: &mut Deck, op: &Op) {
    match *op {
        Op::Shuffle(seed) => deck.shuffle(&mut GameRng::new(seed)),
        Op::Draw(count, location, who) => {
            let owner = location.requires_owner().then_some(who);
            let before = deck.remaining();
            let drawn = deck.draw(count, location, owner).unwrap();
            if before < count {
                assert!(drawn.is_empty());
                assert_eq!(deck.remaining(), before);
            } else {
                assert_eq!(drawn.len(), count);
                assert_eq!(deck.remaining(), before - count);
            }
        }
        Op::Discard(index) => {
            let id = CardId::new(index % deck.len());
            deck.discard(&[id]).unwrap();
            assert_eq!(deck.card(id).unwrap().location, Location::Discard);
        }
        Op::Place(index, who) => {
            let id = CardId::new(index % deck.len());
            deck.place_on_table(id, who, index as u32).unwrap();
        }
        Op::Reshuffle => {
            deck.reshuffle_from_discard();
            assert!(deck.in_location(Location::Discard).is_empty());
        }
        Op::Return(index) => {
            let id = CardId::new(index % deck.len());
            let was_in_deck = deck.card(id).unwrap().location == Location::Deck;
            deck.set_location(&[id], Location::Deck).unwrap();
            if !was_in_deck {
                assert_eq!(deck.draw_order().back(), Some(&id));
            }
        }
        Op::Produce(world, good) => {
            let (world, good) = (CardId::new(world % deck.len()), CardId::new(good % deck.len()));
            let on_table = deck.card(world).unwrap().location == Location::Active;
            let result = deck.place_good(world, good);
            if on_table && world != good {
                result.unwrap();
                assert_eq!(deck.card(good).unwrap().on_world, Some(world));
            } else {
                assert!(result.is_err());
            }
        }
        Op::Consume(index) => {
            let world = CardId::new(index % deck.len());
            let before = deck.card(world).unwrap().num_goods;
            match deck.consume_good(world) {
                Ok(good) => {
                    assert_eq!(deck.card(world).unwrap().num_goods, before - 1);
                    assert_eq!(deck.card(good).unwrap().location, Location::Discard);
                }
                Err(_) => assert_eq!(before, 0),
            }
        }
    }
}

proptest! {
    #[test]
    fn test_shuffle_is_a_permutation(seed in any::<u64>()) {
        let mut deck = Deck::new(sample());
        deck.build(0);
        let mut before: Vec<CardId> = deck.draw_order().iter().copied().collect();
        let cards = deck.cards().to_vec();

        deck.shuffle(&mut GameRng::new(seed));

        let mut after: Vec<CardId> = deck.draw_order().iter().copied().collect();
        prop_assert_eq!(deck.cards(), cards.as_slice());
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn test_draw_beyond_remaining_changes_nothing(extra in 1usize..20, drawn in 0usize..77) {
        let mut deck = Deck::new(sample());
        deck.build(0);
        deck.draw(drawn, Location::Hand, Some(P0)).unwrap();
        let snapshot = deck.clone();

        let result = deck.draw(deck.remaining() + extra, Location::Hand, Some(P1)).unwrap();

        prop_assert!(result.is_empty());
        prop_assert_eq!(deck.cards(), snapshot.cards());
        prop_assert_eq!(deck.draw_order(), snapshot.draw_order());
    }

    #[test]
    fn test_invariants_hold_for_any_operation_sequence(ops in prop::collection::vec(op(), 1..60)) {
        let mut deck = Deck::new(sample());
        deck.build(0);
        for op in &ops {
            apply(&mut deck, op);
            assert_invariants(&deck);
        }
    }

    #[test]
    fn test_same_seed_same_order(seed in any::<u64>()) {
        let mut first = Deck::new(sample());
        let mut second = Deck::new(sample());
        first.build(0);
        second.build(0);

        first.shuffle(&mut GameRng::new(seed));
        second.shuffle(&mut GameRng::new(seed));

        prop_assert_eq!(first.draw_order(), second.draw_order());
    }
}

#[test]
fn test_build_counts_copies_per_expansion() {
    let catalog = Catalog::parse(
        "N:Alpha\nT:1:1:1\nE:base@0:2\n\
         N:Beta\nT:1:1:1\nE:base@1:1\n\
         N:Gamma\nT:1:1:1\nE:base@0:1\n",
    )
    .unwrap();
    let mut deck = Deck::new(Arc::new(catalog));

    // Gamma is reserved, Beta is in a later expansion.
    assert_eq!(deck.build_with(0, 2..3), 2);
    let names: Vec<&str> = deck.cards().iter().map(|card| card.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Alpha"]);

    deck.shuffle(&mut GameRng::new(3));
    let drawn = deck.draw(2, Location::Hand, Some(P0)).unwrap();
    assert!(drawn.iter().all(|&id| deck.card(id).unwrap().name == "Alpha"));

    assert_eq!(deck.build_with(1, 2..3), 3);
}

#[test]
fn test_sample_deck_sizes() {
    let mut deck = Deck::new(sample());
    assert_eq!(deck.build(0), 77);
    assert_eq!(deck.build_with(0, 0..0), 83);
    assert_eq!(deck.build(1), 81);
    assert!(deck.cards().iter().all(|card| card.location == Location::Deck));
}

#[test]
fn test_discarded_hand_card_can_be_reshuffled() {
    let mut deck = Deck::new(sample());
    deck.build(0);
    deck.shuffle(&mut GameRng::new(11));
    let hand = deck.draw(3, Location::Hand, Some(P0)).unwrap();

    deck.discard(&hand[1..2]).unwrap();
    let card = deck.card(hand[1]).unwrap();
    assert_eq!(card.location, Location::Discard);
    assert_eq!(card.owner, None);

    let remaining = deck.remaining();
    assert_eq!(deck.reshuffle_from_discard(), 1);
    assert_eq!(deck.remaining(), remaining + 1);
    assert_eq!(deck.draw_order().back(), Some(&hand[1]));
    assert_invariants(&deck);
}

#[test]
fn test_goods_are_tracked_per_world() {
    let mut deck = Deck::new(sample());
    deck.build(0);
    let drawn = deck.draw(3, Location::Hand, Some(P1)).unwrap();
    let (world, good) = (drawn[0], drawn[1]);

    deck.place_on_table(world, P1, 1).unwrap();
    deck.place_good(world, good).unwrap();
    assert_eq!(deck.card(world).unwrap().num_goods, 1);
    assert_eq!(deck.covering(&drawn), vec![good]);
    assert_eq!(deck.at(Location::Good, P1), vec![good]);

    assert_eq!(deck.consume_good(world).unwrap(), good);
    assert_eq!(deck.card(world).unwrap().num_goods, 0);
    assert!(!deck.card(good).unwrap().covering);
    assert!(deck.consume_good(world).is_err());
    assert_invariants(&deck);
}

#[test]
fn test_goods_leave_with_a_discarded_world() {
    let mut deck = Deck::new(sample());
    deck.build(0);
    let drawn = deck.draw(4, Location::Hand, Some(P0)).unwrap();
    let (near, far) = (drawn[0], drawn[1]);
    deck.place_on_table(near, P0, 1).unwrap();
    deck.place_on_table(far, P0, 2).unwrap();
    deck.place_good(near, drawn[2]).unwrap();
    deck.place_good(far, drawn[3]).unwrap();

    // The good on the other world is never taken.
    assert_eq!(deck.consume_good(far).unwrap(), drawn[3]);
    assert_eq!(deck.at(Location::Good, P0), vec![drawn[2]]);
    assert_invariants(&deck);

    deck.discard(&[near]).unwrap();
    assert!(deck.at(Location::Good, P0).is_empty());
    assert_eq!(deck.card(drawn[2]).unwrap().location, Location::Discard);
    assert_invariants(&deck);
}

//! Round driver.
//!
//! A round asks every seat for its actions, resolves the phases those
//! actions call for in canonical order, trims hands to the limit and
//! checks the end conditions. Seats act one at a time in seat order.
//!
//! Resolution follows the base rules. The only card powers applied are
//! cost reductions, extra military and the phase-4 consume powers.

use super::error::GameError;
use super::game::{ask, card_ref, card_refs, power_ref, Game};
use crate::cards::{CardFlag, CardId, CardType, ConsumePower, DevelopPower, GoodType, Power, PowerCode, SettlePower};
use crate::core::{GameAction, Phase, PlayerId};
use crate::decision::{Answer, Choice, ChoiceKind, PowerRef, ProtocolError};
use crate::zones::{DeckError, Location};

/// Cards drawn and kept by everyone in Explore.
const EXPLORE_DRAW: usize = 2;
const EXPLORE_KEEP: usize = 1;

impl Game {
    /// Play one round.
    ///
    /// Returns `true` once the game is over.
    ///
    /// # Errors
    ///
    /// Returns `GameError::NotStarted` before `start`, `GameError::GameOver`
    /// after the end, and provider or deck errors as they occur.
    pub fn play_round(&mut self) -> Result<bool, GameError> {
        if !self.started {
            return Err(GameError::NotStarted);
        }
        if self.game_over {
            return Err(GameError::GameOver);
        }
        self.round += 1;
        self.phase = Phase::Action;
        self.select_actions()?;

        let phases = self.round_phases();
        for (index, &phase) in phases.iter().enumerate() {
            let runs = phases.iter().filter(|&&other| other == phase).count();
            let run = phases[..index].iter().filter(|&&other| other == phase).count();
            self.phase = phase;
            tracing::debug!(round = self.round, %phase, run, "phase started");
            for who in PlayerId::all(self.player_count()) {
                self.players[who].reset_phase();
                self.provider.prepare_phase(who, phase)?;
            }
            match phase {
                Phase::Explore => self.explore()?,
                Phase::Develop => self.develop(calling(phase, runs, run))?,
                Phase::Settle => self.settle(calling(phase, runs, run))?,
                Phase::Consume => self.consume()?,
                Phase::Produce => self.produce()?,
                Phase::Action | Phase::Discard => {}
            }
            self.turn += 1;
        }

        self.phase = Phase::Discard;
        self.discard_to_limit()?;
        for (_, player) in self.players.iter_mut() {
            player.prev_actions = std::mem::take(&mut player.actions);
            player.drawn_round = 0;
        }

        if self.check_end() {
            self.finish()?;
        }
        Ok(self.game_over)
    }

    /// Phases called for by this round's actions, in resolution order.
    ///
    /// Develop or Settle runs twice when a seat picked both copies of its
    /// action card.
    #[must_use]
    pub fn round_phases(&self) -> Vec<Phase> {
        let mut phases: Vec<Phase> = self
            .players
            .iter()
            .flat_map(|(_, player)| player.actions.iter().map(|action| action.phase()))
            .collect();
        phases.sort_unstable();
        phases.dedup();

        let mut runs = Vec::with_capacity(phases.len() + 2);
        for phase in phases {
            runs.push(phase);
            let copies = calling(phase, 1, 0);
            if copies.len() == 2
                && self
                    .players
                    .iter()
                    .any(|(_, player)| copies.iter().all(|&action| player.selected(action)))
            {
                runs.push(phase);
            }
        }
        runs
    }

    /// Whether an end condition holds: the VP pool is empty, a tableau
    /// reached the limit, or no cards are left in deck and discard pile.
    #[must_use]
    pub fn check_end(&self) -> bool {
        if self.vp_pool == 0 {
            return true;
        }
        if PlayerId::all(self.player_count()).any(|who| self.tableau(who).len() >= self.config.tableau_limit) {
            return true;
        }
        self.deck.remaining() == 0 && self.deck.in_location(Location::Discard).is_empty()
    }

    /// Score every seat: chips plus printed VP of its tableau. Every seat
    /// with the top score wins.
    pub fn score(&mut self) {
        let totals: Vec<i32> = PlayerId::all(self.player_count())
            .map(|who| {
                let printed: i32 = self
                    .tableau(who)
                    .iter()
                    .filter_map(|&id| self.deck.design(id))
                    .map(|design| design.vp)
                    .sum();
                self.players[who].vp as i32 + printed
            })
            .collect();
        let best = totals.iter().copied().max().unwrap_or(0);
        for ((_, player), total) in self.players.iter_mut().zip(totals) {
            player.end_vp = total;
            player.winner = total == best;
        }
    }

    /// Seats with the top score. Empty until the game is scored.
    #[must_use]
    pub fn winners(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|(_, player)| player.winner)
            .map(|(who, _)| who)
            .collect()
    }

    /// End the game: score, then tell every seat.
    ///
    /// # Errors
    ///
    /// Returns provider errors from the notifications.
    pub fn finish(&mut self) -> Result<(), GameError> {
        self.game_over = true;
        self.score();
        for who in PlayerId::all(self.player_count()) {
            self.provider.game_over(who)?;
            self.provider.shutdown(who)?;
        }
        tracing::info!(round = self.round, winners = ?self.winners(), "game over");
        Ok(())
    }

    fn select_actions(&mut self) -> Result<(), GameError> {
        let offered: &'static [GameAction] = if self.config.two_actions {
            &GameAction::ADVANCED
        } else {
            &GameAction::BASE
        };
        let choice = Choice::Action {
            actions: offered,
            count: self.config.actions_per_round(),
        };
        for who in PlayerId::all(self.player_count()) {
            match ask(self.provider.as_mut(), &mut self.players[who], who, &choice)? {
                Answer::Actions(chosen) => self.players[who].actions = chosen,
                _ => return Err(ProtocolError::AnswerShape(ChoiceKind::Action).into()),
            }
        }
        Ok(())
    }

    // === Explore ===

    fn explore(&mut self) -> Result<(), GameError> {
        for who in PlayerId::all(self.player_count()) {
            let player = &self.players[who];
            let mut draw = EXPLORE_DRAW;
            let mut keep = EXPLORE_KEEP;
            if player.selected(GameAction::Explore5_0) {
                draw += 5;
            }
            if player.selected(GameAction::Explore1_1) {
                draw += 1;
                keep += 1;
            }

            let drawn = self.draw_to(who, draw, Location::Aside)?;
            let discard = drawn.len().saturating_sub(keep);
            self.provider
                .explore_sample(who, drawn.len(), drawn.len() - discard, discard)?;
            if discard > 0 {
                let answer = {
                    let choice = Choice::Discard {
                        cards: card_refs(&self.deck, &drawn),
                        count: discard,
                    };
                    ask(self.provider.as_mut(), &mut self.players[who], who, &choice)?
                };
                self.deck.discard(answer.cards().unwrap_or_default())?;
            }

            let kept: Vec<CardId> = drawn
                .into_iter()
                .filter(|&id| self.deck.card(id).is_some_and(|card| card.location == Location::Aside))
                .collect();
            self.deck.set_location(&kept, Location::Hand)?;
            self.count_drawn(who, Location::Hand, kept.len());
            self.players[who].phase_cards += kept.len() as u32;
        }
        Ok(())
    }

    // === Develop / Settle ===

    fn develop(&mut self, calling: &[GameAction]) -> Result<(), GameError> {
        for who in PlayerId::all(self.player_count()) {
            let selected = calling.iter().any(|&action| self.players[who].selected(action));
            let reduce = i32::from(selected) + self.power_total(who, PowerCode::Develop(DevelopPower::Reduce));
            self.players[who].bonus_reduce = reduce;
            self.place(who, Phase::Develop)?;
        }
        Ok(())
    }

    fn settle(&mut self, calling: &[GameAction]) -> Result<(), GameError> {
        for who in PlayerId::all(self.player_count()) {
            let military = self.power_total(who, PowerCode::Settle(SettlePower::ExtraMilitary));
            let reduce = self.power_total(who, PowerCode::Settle(SettlePower::Reduce));
            let player = &mut self.players[who];
            player.bonus_military = military;
            player.bonus_reduce = reduce;

            let Some(world) = self.place(who, Phase::Settle)? else {
                continue;
            };
            if self.deck.design(world).is_some_and(|design| design.has_flag(CardFlag::Windfall)) {
                self.produce_on(who, world)?;
            }
            if calling.iter().any(|&action| self.players[who].selected(action)) {
                let drawn = self.draw_to(who, 1, Location::Hand)?;
                self.players[who].phase_cards += drawn.len() as u32;
            }
        }
        Ok(())
    }

    /// Offer the affordable hand cards for `phase`, then take payment and
    /// put the chosen card on the table. Returns the placed card.
    fn place(&mut self, who: PlayerId, phase: Phase) -> Result<Option<CardId>, GameError> {
        let card_type = if phase == Phase::Develop {
            CardType::Development
        } else {
            CardType::World
        };
        let hand = self.hand(who);
        let player = &self.players[who];
        let (reduce, military) = (player.bonus_reduce, player.bonus_military);
        let affordable = |cost: u32, is_military: bool| {
            if is_military {
                military >= cost as i32
            } else {
                ((cost as i32 - reduce).max(0) as usize) < hand.len()
            }
        };
        let candidates: Vec<CardId> = self
            .deck
            .of_type_by_cost(&hand, card_type)
            .into_iter()
            .filter(|&id| {
                self.deck
                    .design(id)
                    .is_some_and(|design| affordable(design.cost, design.has_flag(CardFlag::Military)))
            })
            .collect();
        if candidates.is_empty() {
            return Ok(None);
        }

        let answer = {
            let choice = Choice::Place {
                cards: card_refs(&self.deck, &candidates),
                phase,
            };
            ask(self.provider.as_mut(), &mut self.players[who], who, &choice)?
        };
        let Some(card) = answer.cards().and_then(|cards| cards.first().copied()) else {
            return Ok(None);
        };

        let cost = {
            let design = self.deck.design(card).ok_or(DeckError::UnknownCard(card))?;
            if design.has_flag(CardFlag::Military) {
                0
            } else {
                (design.cost as i32 - reduce).max(0) as usize
            }
        };
        if cost > 0 {
            let payment: Vec<CardId> = hand.iter().copied().filter(|&id| id != card).collect();
            let answer = {
                let choice = Choice::Payment {
                    placing: card_ref(&self.deck, card)?,
                    cards: card_refs(&self.deck, &payment),
                    cost,
                };
                ask(self.provider.as_mut(), &mut self.players[who], who, &choice)?
            };
            self.deck.discard(answer.cards().unwrap_or_default())?;
        }

        let order = self.players[who].next_order();
        self.deck.place_on_table(card, who, order)?;
        tracing::debug!(%who, %card, %phase, cost, "card placed");
        Ok(Some(card))
    }

    /// Sum of a power's values over a seat's tableau.
    fn power_total(&self, who: PlayerId, code: PowerCode) -> i32 {
        self.tableau(who)
            .iter()
            .filter_map(|&id| self.deck.design(id))
            .flat_map(|design| design.powers.iter())
            .filter(|power| power.code == code)
            .map(|power| power.value)
            .sum()
    }

    // === Consume ===

    fn consume(&mut self) -> Result<(), GameError> {
        for who in PlayerId::all(self.player_count()) {
            if self.players[who].selected(GameAction::ConsumeTrade) {
                self.trade(who)?;
            }
            let double = self.players[who].selected(GameAction::ConsumeX2);
            self.consume_powers(who, double)?;
        }
        Ok(())
    }

    fn trade(&mut self, who: PlayerId) -> Result<(), GameError> {
        let worlds = self.deck.with_goods(&self.tableau(who), GoodType::Any);
        if worlds.is_empty() {
            return Ok(());
        }
        let answer = {
            let choice = Choice::Trade {
                cards: card_refs(&self.deck, &worlds),
            };
            ask(self.provider.as_mut(), &mut self.players[who], who, &choice)?
        };
        let Some(world) = answer.cards().and_then(|cards| cards.first().copied()) else {
            return Ok(());
        };

        let value = self.deck.design(world).map_or(0, |design| design.good.trade_value());
        self.deck.consume_good(world)?;
        let drawn = self.draw_to(who, value, Location::Hand)?;
        self.players[who].phase_cards += drawn.len() as u32;
        tracing::debug!(%who, %world, cards = drawn.len(), "good traded");
        Ok(())
    }

    /// Offer unused consume powers until the seat stops or none are usable.
    fn consume_powers(&mut self, who: PlayerId, double: bool) -> Result<(), GameError> {
        let mut used: Vec<(CardId, usize)> = Vec::new();
        loop {
            let offers = self.consume_offers(who, &used);
            if offers.is_empty() {
                return Ok(());
            }
            let picked = {
                let powers: Vec<PowerRef<'_>> = offers
                    .iter()
                    .filter_map(|&(id, index)| power_ref(&self.deck, id, index))
                    .collect();
                let choice = Choice::Consume { powers, optional: true };
                match ask(self.provider.as_mut(), &mut self.players[who], who, &choice)? {
                    Answer::Power(Some(index)) => offers.get(index).copied(),
                    _ => None,
                }
            };
            let Some((source, index)) = picked else {
                return Ok(());
            };
            used.push((source, index));

            let power = self
                .deck
                .design(source)
                .and_then(|design| design.powers.get(index).copied())
                .ok_or(DeckError::UnknownCard(source))?;
            let PowerCode::Consume(code) = power.code else {
                continue;
            };
            let vp = match code {
                ConsumePower::DiscardHand => self.discard_for_vp(who, source, index, power)?,
                ConsumePower::DrawLucky => {
                    self.draw_lucky(who)?;
                    0
                }
                _ => match code.consumes() {
                    Some(good) => self.consume_goods(who, source, index, power, good)?,
                    None => 0,
                },
            };
            let vp = if double { vp * 2 } else { vp };
            self.award_vp(who, vp);
        }
    }

    /// Consume powers on the tableau that are unused and have something
    /// to work on, as (card, power index) pairs.
    fn consume_offers(&self, who: PlayerId, used: &[(CardId, usize)]) -> Vec<(CardId, usize)> {
        let tableau = self.tableau(who);
        let hand_empty = self.hand(who).is_empty();
        let mut offers = Vec::new();
        for &id in &tableau {
            let Some(design) = self.deck.design(id) else {
                continue;
            };
            for (index, power) in design.powers.iter().enumerate() {
                let PowerCode::Consume(code) = power.code else {
                    continue;
                };
                if used.contains(&(id, index)) {
                    continue;
                }
                let usable = match code {
                    ConsumePower::DiscardHand => !hand_empty,
                    ConsumePower::DrawLucky => true,
                    _ => code
                        .consumes()
                        .is_some_and(|good| !self.deck.with_goods(&tableau, good).is_empty()),
                };
                if usable {
                    offers.push((id, index));
                }
            }
        }
        offers
    }

    /// Consume goods for a power. Returns the VP earned.
    fn consume_goods(
        &mut self,
        who: PlayerId,
        source: CardId,
        index: usize,
        power: Power,
        good: GoodType,
    ) -> Result<u32, GameError> {
        let worlds = self.deck.with_goods(&self.tableau(who), good);
        let max = (power.times.max(1) as usize).min(worlds.len());
        let answer = {
            let Some(offered) = power_ref(&self.deck, source, index) else {
                return Ok(0);
            };
            let choice = Choice::Good {
                power: offered,
                cards: card_refs(&self.deck, &worlds),
                min: 1,
                max,
            };
            ask(self.provider.as_mut(), &mut self.players[who], who, &choice)?
        };
        let chosen = answer.cards().unwrap_or_default();
        for &world in chosen {
            self.deck.consume_good(world)?;
        }
        tracing::debug!(%who, goods = chosen.len(), code = %power.code, "goods consumed");
        Ok(power.value.max(0) as u32 * chosen.len() as u32)
    }

    /// Discard hand cards for a power. Returns the VP earned.
    fn discard_for_vp(&mut self, who: PlayerId, source: CardId, index: usize, power: Power) -> Result<u32, GameError> {
        let hand = self.hand(who);
        let max = (power.times.max(1) as usize).min(hand.len());
        let answer = {
            let Some(offered) = power_ref(&self.deck, source, index) else {
                return Ok(0);
            };
            let choice = Choice::ConsumeHand {
                power: offered,
                cards: card_refs(&self.deck, &hand),
                max,
            };
            ask(self.provider.as_mut(), &mut self.players[who], who, &choice)?
        };
        let chosen = answer.cards().unwrap_or_default();
        self.deck.discard(chosen)?;
        Ok(power.value.max(0) as u32 * chosen.len() as u32)
    }

    /// Call a number and turn over the top card; it is kept if its cost
    /// matches.
    fn draw_lucky(&mut self, who: PlayerId) -> Result<(), GameError> {
        let number = match ask(self.provider.as_mut(), &mut self.players[who], who, &Choice::Lucky)? {
            Answer::Number(number) => u32::from(number),
            _ => return Err(ProtocolError::AnswerShape(ChoiceKind::Lucky).into()),
        };
        let drawn = self.draw_to(who, 1, Location::Aside)?;
        let Some(&card) = drawn.first() else {
            return Ok(());
        };
        let cost = self.deck.design(card).map_or(u32::MAX, |design| design.cost);
        if cost == number {
            self.deck.set_location(&[card], Location::Hand)?;
            self.count_drawn(who, Location::Hand, 1);
            self.players[who].phase_cards += 1;
            self.provider.private_message(who, &format!("lucky {number}: card kept"))?;
        } else {
            self.deck.discard(&[card])?;
            self.provider.private_message(who, &format!("lucky {number}: card cost {cost}, discarded"))?;
        }
        Ok(())
    }

    /// Give VP chips from the pool. The pool floors at zero; chips are
    /// still awarded in full.
    fn award_vp(&mut self, who: PlayerId, vp: u32) {
        if vp == 0 {
            return;
        }
        self.vp_pool = self.vp_pool.saturating_sub(vp);
        let player = &mut self.players[who];
        player.vp += vp;
        player.phase_vp += vp;
        tracing::debug!(%who, vp, pool = self.vp_pool, "victory points awarded");
    }

    // === Produce ===

    fn produce(&mut self) -> Result<(), GameError> {
        for who in PlayerId::all(self.player_count()) {
            let (regular, windfall): (Vec<CardId>, Vec<CardId>) = self
                .tableau(who)
                .into_iter()
                .filter(|&id| {
                    let empty = self.deck.card(id).is_some_and(|card| card.num_goods == 0);
                    empty && self.deck.design(id).is_some_and(|design| design.is_world() && design.produces())
                })
                .partition(|&id| {
                    self.deck
                        .design(id)
                        .is_some_and(|design| !design.has_flag(CardFlag::Windfall))
                });

            for world in regular {
                if !self.produce_on(who, world)? {
                    break;
                }
            }

            if self.players[who].selected(GameAction::Produce) && !windfall.is_empty() {
                let answer = {
                    let choice = Choice::Windfall {
                        cards: card_refs(&self.deck, &windfall),
                    };
                    ask(self.provider.as_mut(), &mut self.players[who], who, &choice)?
                };
                if let Some(world) = answer.cards().and_then(|cards| cards.first().copied()) {
                    self.produce_on(who, world)?;
                }
            }
        }
        Ok(())
    }

    /// Put the top card of the deck on a world as a good. Returns `false`
    /// when no card was left.
    fn produce_on(&mut self, who: PlayerId, world: CardId) -> Result<bool, GameError> {
        let drawn = self.draw_to(who, 1, Location::Aside)?;
        match drawn.first() {
            Some(&good) => {
                self.deck.place_good(world, good)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // === Discard ===

    fn discard_to_limit(&mut self) -> Result<(), GameError> {
        let limit = self.config.hand_limit;
        for who in PlayerId::all(self.player_count()) {
            let hand = self.hand(who);
            if hand.len() <= limit {
                continue;
            }
            let answer = {
                let choice = Choice::Discard {
                    cards: card_refs(&self.deck, &hand),
                    count: hand.len() - limit,
                };
                ask(self.provider.as_mut(), &mut self.players[who], who, &choice)?
            };
            self.deck.discard(answer.cards().unwrap_or_default())?;
        }
        Ok(())
    }
}

/// Actions whose selector bonus applies in one run of a Develop or Settle
/// phase. With two runs the first belongs to the base card and the second
/// to its copy; a single run serves both.
fn calling(phase: Phase, runs: usize, run: usize) -> &'static [GameAction] {
    match (phase, runs > 1, run) {
        (Phase::Develop, true, 0) => &[GameAction::Develop],
        (Phase::Develop, true, _) => &[GameAction::Develop2],
        (Phase::Develop, false, _) => &[GameAction::Develop, GameAction::Develop2],
        (Phase::Settle, true, 0) => &[GameAction::Settle],
        (Phase::Settle, true, _) => &[GameAction::Settle2],
        (Phase::Settle, false, _) => &[GameAction::Settle, GameAction::Settle2],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    use super::*;
    use crate::cards::Catalog;
    use crate::core::{GameConfig, SeatConfig};
    use crate::decision::{CardRef, ChoiceHandler, HandlerDecision};
    use crate::game::OPENING_HAND;

    // Two start worlds and nothing but developments costing 2.
    const LABS: &str = "\
N:Home
T:1:0:0
E:base@0:2
F:START
N:Lab
T:2:2:1
E:base@0:40
";

    /// Fixed actions per seat; takes the first candidates and records
    /// every payment as (seat, cards paid).
    struct Scripted {
        actions: [[GameAction; 2]; 2],
        paid: Rc<RefCell<Vec<(PlayerId, usize)>>>,
    }

    fn first(cards: &[CardRef<'_>], count: usize) -> Answer {
        Answer::Cards(cards.iter().take(count).map(|candidate| candidate.id).collect())
    }

    impl ChoiceHandler for Scripted {
        fn choose_action(&mut self, who: PlayerId, _actions: &[GameAction], _count: usize) -> Result<Answer, ProtocolError> {
            Ok(Answer::Actions(self.actions[who.index()].iter().copied().collect()))
        }

        fn choose_discard(&mut self, _who: PlayerId, cards: &[CardRef<'_>], count: usize) -> Result<Answer, ProtocolError> {
            Ok(first(cards, count))
        }

        fn choose_place(&mut self, _who: PlayerId, cards: &[CardRef<'_>], _phase: Phase) -> Result<Answer, ProtocolError> {
            Ok(first(cards, 1))
        }

        fn choose_payment(
            &mut self,
            who: PlayerId,
            _placing: &CardRef<'_>,
            cards: &[CardRef<'_>],
            cost: usize,
        ) -> Result<Answer, ProtocolError> {
            self.paid.borrow_mut().push((who, cost));
            Ok(first(cards, cost))
        }
    }

    fn labs_game(actions: [[GameAction; 2]; 2]) -> (Game, Rc<RefCell<Vec<(PlayerId, usize)>>>) {
        let paid = Rc::new(RefCell::new(Vec::new()));
        let mut config = GameConfig::new(vec![SeatConfig::ai("Ada"), SeatConfig::ai("Bo")])
            .with_seed(3)
            .with_two_actions(true);
        config.promo = true;
        let handler = Scripted {
            actions,
            paid: Rc::clone(&paid),
        };
        let catalog = Arc::new(Catalog::parse(LABS).unwrap());
        let mut game = Game::new(catalog, config, Box::new(HandlerDecision::new(handler))).unwrap();
        game.start().unwrap();
        (game, paid)
    }

    #[test]
    fn test_calling_splits_copies_over_two_runs() {
        assert_eq!(calling(Phase::Develop, 1, 0), &[GameAction::Develop, GameAction::Develop2]);
        assert_eq!(calling(Phase::Develop, 2, 0), &[GameAction::Develop]);
        assert_eq!(calling(Phase::Develop, 2, 1), &[GameAction::Develop2]);
        assert_eq!(calling(Phase::Settle, 2, 1), &[GameAction::Settle2]);
        assert!(calling(Phase::Produce, 1, 0).is_empty());
    }

    #[test]
    fn test_both_develop_copies_give_two_phases() {
        let (mut game, paid) = labs_game([
            [GameAction::Develop, GameAction::Develop2],
            [GameAction::Settle, GameAction::Settle2],
        ]);
        let (ada, bo) = (PlayerId::new(0), PlayerId::new(1));
        game.players[ada].actions = [GameAction::Develop, GameAction::Develop2].into_iter().collect();
        game.players[bo].actions = [GameAction::Settle, GameAction::Settle2].into_iter().collect();
        assert_eq!(
            game.round_phases(),
            vec![Phase::Develop, Phase::Develop, Phase::Settle, Phase::Settle]
        );
        game.players[ada].actions.clear();
        game.players[bo].actions.clear();

        game.play_round().unwrap();
        assert_eq!(game.turn(), 4);

        // Ada's discount is 1 in each run, never 2 in one; Bo pays full
        // cost once and then cannot afford a second Lab.
        assert_eq!(*paid.borrow(), vec![(ada, 1), (bo, 2), (ada, 1)]);
        assert_eq!(game.tableau(ada).len(), 3);
        assert_eq!(game.tableau(bo).len(), 2);
    }

    #[test]
    fn test_one_copy_each_shares_a_single_run() {
        let (mut game, paid) = labs_game([
            [GameAction::Develop, GameAction::Produce],
            [GameAction::Develop2, GameAction::Produce],
        ]);
        game.play_round().unwrap();

        assert_eq!(game.turn(), 2);
        assert_eq!(*paid.borrow(), vec![(PlayerId::new(0), 1), (PlayerId::new(1), 1)]);
    }

    #[test]
    fn test_only_hand_draws_count_as_drawn() {
        let (mut game, _) = labs_game([
            [GameAction::Produce, GameAction::Develop],
            [GameAction::Produce, GameAction::Develop],
        ]);
        let ada = PlayerId::new(0);
        let home = game.player(ada).start.unwrap();
        assert_eq!(game.player(ada).drawn_round, OPENING_HAND as u32);

        assert!(game.produce_on(ada, home).unwrap());
        assert_eq!(game.deck().card(home).unwrap().num_goods, 1);
        game.draw_to(ada, 1, Location::Aside).unwrap();
        assert_eq!(game.player(ada).drawn_round, OPENING_HAND as u32);

        game.draw_to(ada, 2, Location::Hand).unwrap();
        assert_eq!(game.player(ada).drawn_round, OPENING_HAND as u32 + 2);
    }
}

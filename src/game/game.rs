//! The game: seats, deck, random source and counters for one session.
//!
//! A `Game` is created from a shared catalog, a configuration and one
//! decision provider. The random source is seeded exactly once, here, and
//! every shuffle goes through it. Together with the seats' answer logs the
//! seed reproduces the session.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use rust_tableau::cards::Catalog;
//! use rust_tableau::core::{GameConfig, SeatConfig};
//! use rust_tableau::decision::{ReplayDecision, SessionLog};
//! use rust_tableau::game::Game;
//!
//! let catalog = Arc::new(Catalog::parse("N:Old Earth\nT:1:3:2\nE:base@0:1\nF:START\n").unwrap());
//! let config = GameConfig::new(vec![SeatConfig::human("Ada")]).with_seed(5);
//! let game = Game::new(catalog, config, Box::new(ReplayDecision::new(SessionLog::new(5, 1)))).unwrap();
//!
//! assert_eq!(game.seed(), 5);
//! assert_eq!(game.player_count(), 1);
//! assert!(!game.is_started());
//! ```

use std::sync::Arc;

use super::error::GameError;
use super::player::Player;
use crate::cards::{CardFlag, CardId, Catalog};
use crate::core::{GameConfig, GameRng, GameRngState, Phase, PlayerId, PlayerMap};
use crate::decision::{
    Answer, CardRef, Choice, ChoiceRecord, DecisionProvider, PowerRef, ProtocolError, SessionLog,
};
use crate::zones::{Deck, DeckError, Location};

/// Times a live provider is asked again after an invalid answer.
const MAX_PROMPTS: usize = 3;

/// Cards dealt to each seat at the start.
pub const OPENING_HAND: usize = 6;

/// Cards each seat discards from the opening hand.
pub const OPENING_DISCARD: usize = 2;

/// One play session.
pub struct Game {
    pub(crate) config: GameConfig,
    pub(crate) catalog: Arc<Catalog>,
    pub(crate) players: PlayerMap<Player>,
    pub(crate) deck: Deck,
    pub(crate) provider: Box<dyn DecisionProvider>,
    pub(crate) rng: GameRng,

    // === Progress ===
    pub(crate) phase: Phase,
    pub(crate) round: u32,
    pub(crate) turn: u32,
    pub(crate) vp_pool: u32,
    pub(crate) started: bool,
    pub(crate) game_over: bool,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("seed", &self.rng.seed())
            .field("players", &self.players.player_count())
            .field("phase", &self.phase)
            .field("round", &self.round)
            .field("vp_pool", &self.vp_pool)
            .field("game_over", &self.game_over)
            .finish_non_exhaustive()
    }
}

impl Game {
    /// Create a game and build its deck.
    ///
    /// The seed comes from the configuration, or is drawn fresh.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Config` if the configuration is invalid.
    pub fn new(
        catalog: Arc<Catalog>,
        config: GameConfig,
        provider: Box<dyn DecisionProvider>,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };

        let mut deck = Deck::new(Arc::clone(&catalog));
        if config.promo {
            deck.build_with(config.expansion, 0..0);
        } else {
            deck.build(config.expansion);
        }

        let players = PlayerMap::new(config.player_count(), |who| Player::new(&config.seats[who.index()]));
        let vp_pool = config.vp_per_player * config.player_count() as u32;
        tracing::debug!(seed = rng.seed(), players = config.player_count(), cards = deck.len(), "game created");

        Ok(Self {
            config,
            catalog,
            players,
            deck,
            provider,
            rng,
            phase: Phase::Action,
            round: 0,
            turn: 0,
            vp_pool,
            started: false,
            game_over: false,
        })
    }

    /// Create a game that replays a recorded session.
    ///
    /// The log's seed replaces the configured one, and each seat answers
    /// from its log before `provider` is asked anything.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Config` if the configuration is invalid.
    pub fn replay(
        catalog: Arc<Catalog>,
        mut config: GameConfig,
        log: &SessionLog,
        provider: Box<dyn DecisionProvider>,
    ) -> Result<Self, GameError> {
        config.seed = Some(log.seed);
        let mut game = Self::new(catalog, config, provider)?;
        for (who, player) in game.players.iter_mut() {
            player.load_log(log.for_player(who));
        }
        Ok(game)
    }

    /// Rotate seats by one before the game starts. The provider is told
    /// each seat's new index.
    ///
    /// # Errors
    ///
    /// Returns `GameError::AlreadyStarted` once `start` has run.
    pub fn rotate_seats(&mut self) -> Result<(), GameError> {
        if self.started {
            return Err(GameError::AlreadyStarted);
        }
        self.players.rotate();
        self.config.seats.rotate_left(1);
        for who in self.players.player_ids() {
            self.provider.notify_rotation(who)?;
        }
        Ok(())
    }

    /// Shuffle, deal start worlds and opening hands.
    ///
    /// Each seat gets one start world, or picks one of two with
    /// `start_world_choice`; unchosen start worlds go back into the deck
    /// before it is shuffled again. Each seat is then dealt six cards and
    /// discards two.
    ///
    /// A failed start leaves the deck, seats and random source as they
    /// were, so `start` can be called again. Providers may see `init` and
    /// choices a second time.
    ///
    /// # Errors
    ///
    /// Returns `GameError::AlreadyStarted` once a start has succeeded,
    /// `GameError::NotEnoughStartWorlds` if the deck is short of start
    /// worlds, and provider or deck errors as they occur.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.started {
            return Err(GameError::AlreadyStarted);
        }
        let needed = self.start_worlds_per_seat() * self.player_count();
        let available = self
            .deck
            .with_flag(&self.deck.in_location(Location::Deck), CardFlag::Start)
            .len();
        if available < needed {
            return Err(GameError::NotEnoughStartWorlds { needed, available });
        }

        let snapshot = (self.deck.clone(), self.players.clone(), self.rng.clone());
        match self.deal_opening() {
            Ok(()) => {
                self.started = true;
                tracing::info!(seed = self.rng.seed(), players = self.player_count(), "game started");
                Ok(())
            }
            Err(error) => {
                (self.deck, self.players, self.rng) = snapshot;
                tracing::warn!(%error, "start failed, table restored");
                Err(error)
            }
        }
    }

    fn start_worlds_per_seat(&self) -> usize {
        if self.config.start_world_choice {
            2
        } else {
            1
        }
    }

    fn deal_opening(&mut self) -> Result<(), GameError> {
        self.deck.shuffle(&mut self.rng);

        for (who, player) in self.players.iter() {
            self.provider.init(who, &player.name)?;
        }

        let per_seat = self.start_worlds_per_seat();
        let pile: Vec<CardId> = self.deck.draw_order().iter().copied().collect();
        let mut start_worlds = self.deck.with_flag(&pile, CardFlag::Start);
        self.rng.shuffle(&mut start_worlds);

        for (seat, offered) in start_worlds.chunks(per_seat).take(self.player_count()).enumerate() {
            let who = PlayerId::new(seat as u8);
            self.deck.pick(offered, Location::Aside, Some(who))?;
            let chosen = if offered.len() == 1 {
                offered[0]
            } else {
                let choice = Choice::Start {
                    cards: card_refs(&self.deck, offered),
                };
                let answer = ask(self.provider.as_mut(), &mut self.players[who], who, &choice)?;
                first_card(&answer)?
            };
            let returned: Vec<CardId> = offered.iter().copied().filter(|&id| id != chosen).collect();
            self.deck.set_location(&returned, Location::Deck)?;
            let order = self.players[who].next_order();
            self.deck.place_on_table(chosen, who, order)?;
            self.players[who].start = Some(chosen);
            tracing::debug!(%who, card = %chosen, "start world placed");
        }
        self.deck.shuffle(&mut self.rng);

        for who in PlayerId::all(self.player_count()) {
            let hand = self.draw_to(who, OPENING_HAND, Location::Hand)?;
            let count = OPENING_DISCARD.min(hand.len());
            if count > 0 {
                let choice = Choice::Discard {
                    cards: card_refs(&self.deck, &hand),
                    count,
                };
                let answer = ask(self.provider.as_mut(), &mut self.players[who], who, &choice)?;
                self.deck.discard(answer.cards().unwrap_or_default())?;
            }
        }
        Ok(())
    }

    /// Draw for a seat, reshuffling the discard pile into the deck if the
    /// pile is short. Draws fewer cards only if both piles together are.
    ///
    /// Only draws into the hand count towards the seat's cards drawn this
    /// round.
    pub(crate) fn draw_to(&mut self, who: PlayerId, count: usize, location: Location) -> Result<Vec<CardId>, GameError> {
        let drawn = self.deck.draw(count, location, Some(who))?;
        if drawn.len() == count {
            self.count_drawn(who, location, drawn.len());
            return Ok(drawn);
        }

        let returned = self.deck.reshuffle_from_discard();
        self.deck.shuffle(&mut self.rng);
        tracing::warn!(%who, count, returned, "deck short, discard pile reshuffled");

        let available = count.min(self.deck.remaining());
        if available < count {
            tracing::warn!(%who, count, available, "short draw");
        }
        let drawn = self.deck.draw(available, location, Some(who))?;
        self.count_drawn(who, location, drawn.len());
        Ok(drawn)
    }

    pub(crate) fn count_drawn(&mut self, who: PlayerId, location: Location, count: usize) {
        if location == Location::Hand {
            self.players[who].drawn_round += count as u32;
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn player(&self, who: PlayerId) -> &Player {
        &self.players[who]
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// The session seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Where the session RNG stands; equal states mean equal futures.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Rounds played.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Phases resolved.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Victory point chips left in the pool.
    #[must_use]
    pub fn vp_pool(&self) -> u32 {
        self.vp_pool
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// A seat's hand.
    #[must_use]
    pub fn hand(&self, who: PlayerId) -> Vec<CardId> {
        self.deck.at(Location::Hand, who)
    }

    /// A seat's tableau in placement order.
    #[must_use]
    pub fn tableau(&self, who: PlayerId) -> Vec<CardId> {
        self.deck.by_table_order(&self.deck.at(Location::Active, who))
    }

    /// Seed and every answer given so far, for replay.
    #[must_use]
    pub fn session_log(&self) -> SessionLog {
        let mut log = SessionLog::new(self.rng.seed(), self.player_count());
        for (who, player) in self.players.iter() {
            for record in player.choice_log() {
                log.record(who, record.clone());
            }
        }
        log
    }
}

/// Resolve ids to candidate references. Ids not in the deck are skipped.
pub(crate) fn card_refs<'a>(deck: &'a Deck, ids: &[CardId]) -> Vec<CardRef<'a>> {
    ids.iter()
        .filter_map(|&id| {
            Some(CardRef {
                id,
                card: deck.card(id)?,
                design: deck.design(id)?,
            })
        })
        .collect()
}

/// Resolve one id to a candidate reference.
pub(crate) fn card_ref(deck: &Deck, id: CardId) -> Result<CardRef<'_>, DeckError> {
    Ok(CardRef {
        id,
        card: deck.require(id)?,
        design: deck.design(id).ok_or(DeckError::UnknownCard(id))?,
    })
}

/// The power at `index` on a card's design.
pub(crate) fn power_ref(deck: &Deck, id: CardId, index: usize) -> Option<PowerRef<'_>> {
    let source = card_ref(deck, id).ok()?;
    Some(PowerRef {
        source,
        power: source.design.powers.get(index)?,
    })
}

/// Ask a seat for a choice.
///
/// A logged answer waiting at the seat's replay cursor is used first.
/// Otherwise the provider is asked and must answer validly within a few
/// attempts; the accepted answer is appended to the seat's log.
pub(crate) fn ask(
    provider: &mut dyn DecisionProvider,
    player: &mut Player,
    who: PlayerId,
    choice: &Choice<'_>,
) -> Result<Answer, GameError> {
    let kind = choice.kind();
    if let Some(record) = player.peek_replay() {
        if record.kind != kind {
            return Err(ProtocolError::KindMismatch {
                expected: kind,
                found: record.kind,
            }
            .into());
        }
        choice.validate(&record.answer)?;
        let answer = record.answer.clone();
        player.advance_replay();
        tracing::debug!(%who, %kind, "answer replayed from log");
        return Ok(answer);
    }

    let mut attempt = 1;
    loop {
        provider.make_choice(who, choice)?;
        let answer = provider.wait_answer(who)?;
        match choice.validate(&answer) {
            Ok(()) => {
                player.record(ChoiceRecord {
                    kind,
                    answer: answer.clone(),
                });
                return Ok(answer);
            }
            Err(error) if attempt < MAX_PROMPTS => {
                tracing::warn!(%who, %kind, %error, "invalid answer, asking again");
                attempt += 1;
            }
            Err(error) => return Err(error.into()),
        }
    }
}

/// The single card of a one-card answer.
pub(crate) fn first_card(answer: &Answer) -> Result<CardId, GameError> {
    answer
        .cards()
        .and_then(|cards| cards.first().copied())
        .ok_or_else(|| ProtocolError::Input("expected a card".to_string()).into())
}

//! The closed set of choices the game asks providers to make.
//!
//! A `Choice` carries only the fields its kind needs, with candidates
//! already resolved to cards and designs, so a provider never needs the
//! catalog to answer. The answer comes back as an `Answer`, which
//! `Choice::validate` checks against the candidates and bounds.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::ProtocolError;
use crate::cards::{Card, CardId, Design, Power};
use crate::core::{GameAction, Phase};

/// Kind of a choice, without its arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChoiceKind {
    Action,
    Start,
    Discard,
    Place,
    Payment,
    Settle,
    Trade,
    Consume,
    ConsumeHand,
    Good,
    Lucky,
    Windfall,
    Produce,
}

impl ChoiceKind {
    pub const ALL: [ChoiceKind; 13] = [
        ChoiceKind::Action,
        ChoiceKind::Start,
        ChoiceKind::Discard,
        ChoiceKind::Place,
        ChoiceKind::Payment,
        ChoiceKind::Settle,
        ChoiceKind::Trade,
        ChoiceKind::Consume,
        ChoiceKind::ConsumeHand,
        ChoiceKind::Good,
        ChoiceKind::Lucky,
        ChoiceKind::Windfall,
        ChoiceKind::Produce,
    ];

    /// Upper-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ChoiceKind::Action => "ACTION",
            ChoiceKind::Start => "START",
            ChoiceKind::Discard => "DISCARD",
            ChoiceKind::Place => "PLACE",
            ChoiceKind::Payment => "PAYMENT",
            ChoiceKind::Settle => "SETTLE",
            ChoiceKind::Trade => "TRADE",
            ChoiceKind::Consume => "CONSUME",
            ChoiceKind::ConsumeHand => "CONSUME_HAND",
            ChoiceKind::Good => "GOOD",
            ChoiceKind::Lucky => "LUCKY",
            ChoiceKind::Windfall => "WINDFALL",
            ChoiceKind::Produce => "PRODUCE",
        }
    }
}

impl std::fmt::Display for ChoiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A card offered as a candidate.
#[derive(Clone, Copy, Debug)]
pub struct CardRef<'a> {
    pub id: CardId,
    pub card: &'a Card,
    pub design: &'a Design,
}

/// A card power offered as a candidate.
#[derive(Clone, Copy, Debug)]
pub struct PowerRef<'a> {
    /// Card the power is printed on.
    pub source: CardRef<'a>,
    pub power: &'a Power,
}

/// A decision asked of one player.
#[derive(Clone, Debug)]
pub enum Choice<'a> {
    /// Select `count` distinct actions for the round.
    Action {
        actions: &'a [GameAction],
        count: usize,
    },
    /// Pick one start world.
    Start { cards: Vec<CardRef<'a>> },
    /// Discard exactly `count` of `cards`.
    Discard { cards: Vec<CardRef<'a>>, count: usize },
    /// Place at most one card in `phase`; an empty answer passes.
    Place { cards: Vec<CardRef<'a>>, phase: Phase },
    /// Pay `cost` for `placing` by discarding exactly that many of `cards`.
    Payment {
        placing: CardRef<'a>,
        cards: Vec<CardRef<'a>>,
        cost: usize,
    },
    /// Pick a settle power, or none.
    Settle { powers: Vec<PowerRef<'a>> },
    /// Trade the good on at most one of `cards`.
    Trade { cards: Vec<CardRef<'a>> },
    /// Pick a consume power; `None` is only allowed when `optional`.
    Consume {
        powers: Vec<PowerRef<'a>>,
        optional: bool,
    },
    /// Discard up to `max` hand cards for a consume power.
    ConsumeHand {
        power: PowerRef<'a>,
        cards: Vec<CardRef<'a>>,
        max: usize,
    },
    /// Choose between `min` and `max` worlds whose goods a power consumes.
    Good {
        power: PowerRef<'a>,
        cards: Vec<CardRef<'a>>,
        min: usize,
        max: usize,
    },
    /// Call a number from 1 to 7.
    Lucky,
    /// Produce on at most one windfall world.
    Windfall { cards: Vec<CardRef<'a>> },
    /// Pick a produce power, or none.
    Produce { powers: Vec<PowerRef<'a>> },
}

/// A provider's answer.
///
/// Card answers name card ids; power answers are an index into the
/// offered powers.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Answer {
    Actions(SmallVec<[GameAction; 2]>),
    Cards(Vec<CardId>),
    Power(Option<usize>),
    Number(u8),
}

impl Answer {
    /// A card answer that passes.
    #[must_use]
    pub fn pass() -> Self {
        Answer::Cards(Vec::new())
    }

    /// Chosen cards, if this is a card answer.
    #[must_use]
    pub fn cards(&self) -> Option<&[CardId]> {
        match self {
            Answer::Cards(cards) => Some(cards),
            _ => None,
        }
    }
}

/// One logged answer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChoiceRecord {
    pub kind: ChoiceKind,
    pub answer: Answer,
}

impl<'a> Choice<'a> {
    /// Kind of this choice.
    #[must_use]
    pub fn kind(&self) -> ChoiceKind {
        match self {
            Choice::Action { .. } => ChoiceKind::Action,
            Choice::Start { .. } => ChoiceKind::Start,
            Choice::Discard { .. } => ChoiceKind::Discard,
            Choice::Place { .. } => ChoiceKind::Place,
            Choice::Payment { .. } => ChoiceKind::Payment,
            Choice::Settle { .. } => ChoiceKind::Settle,
            Choice::Trade { .. } => ChoiceKind::Trade,
            Choice::Consume { .. } => ChoiceKind::Consume,
            Choice::ConsumeHand { .. } => ChoiceKind::ConsumeHand,
            Choice::Good { .. } => ChoiceKind::Good,
            Choice::Lucky => ChoiceKind::Lucky,
            Choice::Windfall { .. } => ChoiceKind::Windfall,
            Choice::Produce { .. } => ChoiceKind::Produce,
        }
    }

    /// Offered cards, for card kinds.
    #[must_use]
    pub fn cards(&self) -> &[CardRef<'a>] {
        match self {
            Choice::Start { cards }
            | Choice::Discard { cards, .. }
            | Choice::Place { cards, .. }
            | Choice::Payment { cards, .. }
            | Choice::Trade { cards }
            | Choice::ConsumeHand { cards, .. }
            | Choice::Good { cards, .. }
            | Choice::Windfall { cards } => cards,
            _ => &[],
        }
    }

    /// Offered powers, for power kinds.
    #[must_use]
    pub fn powers(&self) -> &[PowerRef<'a>] {
        match self {
            Choice::Settle { powers } | Choice::Consume { powers, .. } | Choice::Produce { powers } => powers,
            _ => &[],
        }
    }

    /// Inclusive bounds on the number of cards a card answer may hold.
    #[must_use]
    pub fn selection_bounds(&self) -> Option<(usize, usize)> {
        match self {
            Choice::Start { .. } => Some((1, 1)),
            Choice::Discard { count, .. } => Some((*count, *count)),
            Choice::Payment { cost, .. } => Some((*cost, *cost)),
            Choice::Place { .. } | Choice::Trade { .. } | Choice::Windfall { .. } => Some((0, 1)),
            Choice::ConsumeHand { max, .. } => Some((0, *max)),
            Choice::Good { min, max, .. } => Some((*min, *max)),
            _ => None,
        }
    }

    /// Check that `answer` is a legal answer to this choice.
    ///
    /// # Errors
    ///
    /// Returns the first rule the answer breaks.
    pub fn validate(&self, answer: &Answer) -> Result<(), ProtocolError> {
        let kind = self.kind();
        match (self, answer) {
            (Choice::Action { actions, count }, Answer::Actions(chosen)) => {
                check_size(kind, *count, *count, chosen.len())?;
                for (position, action) in chosen.iter().enumerate() {
                    if !actions.contains(action) {
                        return Err(ProtocolError::ActionNotOffered(*action));
                    }
                    if chosen[..position].contains(action) {
                        return Err(ProtocolError::DuplicateAction(*action));
                    }
                }
                Ok(())
            }
            (Choice::Lucky, Answer::Number(number)) => {
                if (1..=7).contains(number) {
                    Ok(())
                } else {
                    Err(ProtocolError::AnswerShape(kind))
                }
            }
            (Choice::Settle { powers } | Choice::Produce { powers }, Answer::Power(index)) => {
                check_power(kind, powers.len(), *index, true)
            }
            (Choice::Consume { powers, optional }, Answer::Power(index)) => {
                check_power(kind, powers.len(), *index, *optional)
            }
            (_, Answer::Cards(chosen)) => {
                let (min, max) = self.selection_bounds().ok_or(ProtocolError::AnswerShape(kind))?;
                check_size(kind, min, max, chosen.len())?;
                let offered = self.cards();
                for (position, id) in chosen.iter().enumerate() {
                    if !offered.iter().any(|candidate| candidate.id == *id) {
                        return Err(ProtocolError::NotACandidate(*id));
                    }
                    if chosen[..position].contains(id) {
                        return Err(ProtocolError::Duplicate(*id));
                    }
                }
                Ok(())
            }
            _ => Err(ProtocolError::AnswerShape(kind)),
        }
    }
}

fn check_size(kind: ChoiceKind, min: usize, max: usize, got: usize) -> Result<(), ProtocolError> {
    if got < min || got > max {
        return Err(ProtocolError::SelectionSize { kind, min, max, got });
    }
    Ok(())
}

fn check_power(kind: ChoiceKind, offered: usize, index: Option<usize>, optional: bool) -> Result<(), ProtocolError> {
    match index {
        Some(index) if index < offered => Ok(()),
        Some(index) => Err(ProtocolError::SelectionSize {
            kind,
            min: 0,
            max: offered.saturating_sub(1),
            got: index,
        }),
        None if optional => Ok(()),
        None => Err(ProtocolError::SelectionSize {
            kind,
            min: 1,
            max: 1,
            got: 0,
        }),
    }
}

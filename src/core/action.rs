//! Action cards a player selects at the start of each round.
//!
//! Each action triggers one phase for everyone and grants the selecting
//! player a bonus in that phase. `Develop2` and `Settle2` only exist in the
//! advanced two-player variant, where each player selects two actions.

use serde::{Deserialize, Serialize};

use super::phase::Phase;

/// A selectable round action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GameAction {
    Search,
    Explore5_0,
    Explore1_1,
    Develop,
    Develop2,
    Settle,
    Settle2,
    ConsumeTrade,
    ConsumeX2,
    Produce,
}

impl GameAction {
    /// Actions on the base action card set, in card order.
    pub const BASE: [GameAction; 7] = [
        GameAction::Explore5_0,
        GameAction::Explore1_1,
        GameAction::Develop,
        GameAction::Settle,
        GameAction::ConsumeTrade,
        GameAction::ConsumeX2,
        GameAction::Produce,
    ];

    /// Actions available in the advanced two-player variant.
    pub const ADVANCED: [GameAction; 9] = [
        GameAction::Explore5_0,
        GameAction::Explore1_1,
        GameAction::Develop,
        GameAction::Develop2,
        GameAction::Settle,
        GameAction::Settle2,
        GameAction::ConsumeTrade,
        GameAction::ConsumeX2,
        GameAction::Produce,
    ];

    /// Numeric code of the action card.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Phase this action triggers. `Search` is played during Explore.
    #[must_use]
    pub const fn phase(self) -> Phase {
        match self {
            GameAction::Search | GameAction::Explore5_0 | GameAction::Explore1_1 => Phase::Explore,
            GameAction::Develop | GameAction::Develop2 => Phase::Develop,
            GameAction::Settle | GameAction::Settle2 => Phase::Settle,
            GameAction::ConsumeTrade | GameAction::ConsumeX2 => Phase::Consume,
            GameAction::Produce => Phase::Produce,
        }
    }

    /// Upper-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            GameAction::Search => "SEARCH",
            GameAction::Explore5_0 => "EXPLORE_5_0",
            GameAction::Explore1_1 => "EXPLORE_1_1",
            GameAction::Develop => "DEVELOP",
            GameAction::Develop2 => "DEVELOP2",
            GameAction::Settle => "SETTLE",
            GameAction::Settle2 => "SETTLE2",
            GameAction::ConsumeTrade => "CONSUME_TRADE",
            GameAction::ConsumeX2 => "CONSUME_X2",
            GameAction::Produce => "PRODUCE",
        }
    }
}

impl std::fmt::Display for GameAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

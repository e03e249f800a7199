//! Session configuration.
//!
//! A `GameConfig` fixes everything about a session that is decided before
//! the first card is dealt: seats, expansion level, seed, and the few rule
//! variants the orchestrator supports. Configs are plain serde data and
//! can be loaded from JSON.
//!
//! ```
//! use rust_tableau::core::GameConfig;
//!
//! let config = GameConfig::from_json(r#"{
//!     "seats": [{"name": "Ada"}, {"name": "Bot", "ai": true}],
//!     "seed": 99
//! }"#).unwrap();
//!
//! assert_eq!(config.seats.len(), 2);
//! assert_eq!(config.vp_per_player, 12);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Most seats a session supports.
pub const MAX_PLAYERS: usize = 6;

/// Highest expansion level the catalog format knows about.
pub const MAX_EXPANSION: u8 = 3;

/// One seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatConfig {
    /// Display name.
    pub name: String,

    /// Whether the seat is played by an automated provider.
    #[serde(default)]
    pub ai: bool,
}

impl SeatConfig {
    /// A human seat.
    #[must_use]
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ai: false,
        }
    }

    /// An automated seat.
    #[must_use]
    pub fn ai(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ai: true,
        }
    }
}

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seats in play order.
    pub seats: Vec<SeatConfig>,

    /// Expansion level; designs with a higher expansion index are left out.
    #[serde(default)]
    pub expansion: u8,

    /// Session seed. `None` draws a fresh one at game construction.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Include the promotional start worlds in the deck.
    #[serde(default)]
    pub promo: bool,

    /// Offer two start worlds to choose from instead of dealing one.
    #[serde(default)]
    pub start_world_choice: bool,

    /// Each player selects two actions per round (advanced two-player game).
    #[serde(default)]
    pub two_actions: bool,

    /// Victory point chips in the pool per seat.
    #[serde(default = "default_vp_per_player")]
    pub vp_per_player: u32,

    /// Cards a player may keep in hand at the end of a round.
    #[serde(default = "default_hand_limit")]
    pub hand_limit: usize,

    /// Tableau size that ends the game.
    #[serde(default = "default_tableau_limit")]
    pub tableau_limit: usize,
}

fn default_vp_per_player() -> u32 {
    12
}

fn default_hand_limit() -> usize {
    10
}

fn default_tableau_limit() -> usize {
    12
}

impl GameConfig {
    /// Create a configuration for the given seats with default rules.
    #[must_use]
    pub fn new(seats: Vec<SeatConfig>) -> Self {
        Self {
            seats,
            expansion: 0,
            seed: None,
            promo: false,
            start_world_choice: false,
            two_actions: false,
            vp_per_player: default_vp_per_player(),
            hand_limit: default_hand_limit(),
            tableau_limit: default_tableau_limit(),
        }
    }

    /// Load a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a configuration.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Fix the session seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the expansion level.
    #[must_use]
    pub fn with_expansion(mut self, expansion: u8) -> Self {
        self.expansion = expansion;
        self
    }

    /// Offer a choice of two start worlds.
    #[must_use]
    pub fn with_start_world_choice(mut self, enabled: bool) -> Self {
        self.start_world_choice = enabled;
        self
    }

    /// Use the two-actions-per-round variant.
    #[must_use]
    pub fn with_two_actions(mut self, enabled: bool) -> Self {
        self.two_actions = enabled;
        self
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    /// Actions each player selects per round.
    #[must_use]
    pub fn actions_per_round(&self) -> usize {
        if self.two_actions {
            2
        } else {
            1
        }
    }

    /// Check the configuration against the supported bounds.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when any field is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let count = self.seats.len();
        if count == 0 || count > MAX_PLAYERS {
            return Err(ConfigError::PlayerCount {
                count,
                max: MAX_PLAYERS,
            });
        }
        if self.two_actions && count != 2 {
            return Err(ConfigError::TwoActionsNeedsTwoPlayers { count });
        }
        if self.expansion > MAX_EXPANSION {
            return Err(ConfigError::Expansion {
                level: self.expansion,
                max: MAX_EXPANSION,
            });
        }
        if self.vp_per_player == 0 {
            return Err(ConfigError::ZeroLimit("vp_per_player"));
        }
        if self.hand_limit == 0 {
            return Err(ConfigError::ZeroLimit("hand_limit"));
        }
        if self.tableau_limit == 0 {
            return Err(ConfigError::ZeroLimit("tableau_limit"));
        }
        Ok(())
    }
}

/// Errors raised when a configuration is out of range.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("player count {count} must be between 1 and {max}")]
    PlayerCount { count: usize, max: usize },
    #[error("two actions per round needs exactly 2 players (got {count})")]
    TwoActionsNeedsTwoPlayers { count: usize },
    #[error("expansion level {level} exceeds maximum {max}")]
    Expansion { level: u8, max: u8 },
    #[error("{0} must be at least 1")]
    ZeroLimit(&'static str),
}

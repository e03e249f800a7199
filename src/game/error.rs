//! Game errors.

use thiserror::Error;

use crate::core::ConfigError;
use crate::decision::ProtocolError;
use crate::zones::DeckError;

/// Errors raised by the game orchestrator.
///
/// Deck and protocol failures leave the deck consistent, so the caller may
/// retry the step.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error("the game has already started")]
    AlreadyStarted,
    #[error("the game has not started")]
    NotStarted,
    #[error("the game is over")]
    GameOver,
    #[error("need {needed} start worlds, deck has {available}")]
    NotEnoughStartWorlds { needed: usize, available: usize },
}

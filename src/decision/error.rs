//! Decision protocol errors.

use thiserror::Error;

use super::choice::ChoiceKind;
use crate::cards::CardId;
use crate::core::{GameAction, PlayerId};

/// A provider could not answer, or answered something the choice does not
/// allow.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("no handler for {0} choices")]
    Unhandled(ChoiceKind),
    #[error("expected a {expected} answer, log has {found}")]
    KindMismatch { expected: ChoiceKind, found: ChoiceKind },
    #[error("answer does not fit a {0} choice")]
    AnswerShape(ChoiceKind),
    #[error("{0} was not offered")]
    NotACandidate(CardId),
    #[error("{0} chosen more than once")]
    Duplicate(CardId),
    #[error("action {0} was not offered")]
    ActionNotOffered(GameAction),
    #[error("action {0} chosen more than once")]
    DuplicateAction(GameAction),
    #[error("{kind} choice takes {min}..={max} selections, got {got}")]
    SelectionSize {
        kind: ChoiceKind,
        min: usize,
        max: usize,
        got: usize,
    },
    #[error("no answer pending for {0}")]
    NoPendingAnswer(PlayerId),
    #[error("replay log for {0} is exhausted")]
    ReplayExhausted(PlayerId),
    #[error("bad input: {0}")]
    Input(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

//! Decision protocol between the game and whoever makes the choices.
//!
//! ## Key Types
//!
//! - `Choice`: closed union of everything the game can ask, one variant per kind
//! - `Answer`: what a provider returns; checked with `Choice::validate`
//! - `DecisionProvider`: the capability set a provider implements
//! - `ChoiceHandler` / `HandlerDecision`: per-kind handlers behind a provider
//! - `InteractiveDecision`: prompts on a writer and reads indices from a reader
//! - `ReplayDecision` / `SessionLog`: answers taken from a recorded session
//!
//! The game poses one choice at a time and blocks until it has the answer.
//! There is no timeout here; wrap a provider if one is needed.

pub mod choice;
pub mod error;
pub mod interactive;
pub mod provider;
pub mod replay;

pub use choice::{Answer, CardRef, Choice, ChoiceKind, ChoiceRecord, PowerRef};
pub use error::ProtocolError;
pub use interactive::InteractiveDecision;
pub use provider::{dispatch, ChoiceHandler, DecisionProvider, HandlerDecision};
pub use replay::{ReplayDecision, SessionLog};

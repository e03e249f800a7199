//! Provider traits.
//!
//! `DecisionProvider` is what the game talks to. A provider is posed a
//! choice with `make_choice` and the game then blocks in `wait_answer`
//! until it has an answer. Lifecycle notifications default to no-ops.
//!
//! `ChoiceHandler` is the convenient way to write a provider that answers
//! synchronously: implement the `choose_*` methods for the kinds you
//! handle and wrap the handler in `HandlerDecision`.

use rustc_hash::FxHashMap;

use super::choice::{Answer, CardRef, Choice, ChoiceKind, PowerRef};
use super::error::ProtocolError;
use crate::core::{GameAction, Phase, PlayerId};

/// The capability set every decision provider implements.
pub trait DecisionProvider {
    /// A seat joined the game.
    fn init(&mut self, _who: PlayerId, _name: &str) -> Result<(), ProtocolError> {
        Ok(())
    }

    /// Seats were rotated; `who` is the seat's new index.
    fn notify_rotation(&mut self, _who: PlayerId) -> Result<(), ProtocolError> {
        Ok(())
    }

    /// A phase is about to be resolved.
    fn prepare_phase(&mut self, _who: PlayerId, _phase: Phase) -> Result<(), ProtocolError> {
        Ok(())
    }

    /// Pose a choice. The answer is collected by `wait_answer`.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Unhandled` for kinds the provider does not
    /// support.
    fn make_choice(&mut self, who: PlayerId, choice: &Choice<'_>) -> Result<(), ProtocolError>;

    /// Block until the answer to the last posed choice is ready.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::NoPendingAnswer` when nothing was posed.
    fn wait_answer(&mut self, who: PlayerId) -> Result<Answer, ProtocolError>;

    /// Explore sampling: `draw` cards were drawn, `keep` kept, `discard`
    /// discarded.
    fn explore_sample(
        &mut self,
        _who: PlayerId,
        _draw: usize,
        _keep: usize,
        _discard: usize,
    ) -> Result<(), ProtocolError> {
        Ok(())
    }

    fn game_over(&mut self, _who: PlayerId) -> Result<(), ProtocolError> {
        Ok(())
    }

    fn shutdown(&mut self, _who: PlayerId) -> Result<(), ProtocolError> {
        Ok(())
    }

    /// A message only `who` should see.
    fn private_message(&mut self, _who: PlayerId, _message: &str) -> Result<(), ProtocolError> {
        Ok(())
    }
}

/// Per-kind answer functions. Every kind defaults to `Unhandled`.
#[allow(unused_variables)]
pub trait ChoiceHandler {
    fn choose_action(&mut self, who: PlayerId, actions: &[GameAction], count: usize) -> Result<Answer, ProtocolError> {
        Err(ProtocolError::Unhandled(ChoiceKind::Action))
    }

    fn choose_start(&mut self, who: PlayerId, cards: &[CardRef<'_>]) -> Result<Answer, ProtocolError> {
        Err(ProtocolError::Unhandled(ChoiceKind::Start))
    }

    fn choose_discard(&mut self, who: PlayerId, cards: &[CardRef<'_>], count: usize) -> Result<Answer, ProtocolError> {
        Err(ProtocolError::Unhandled(ChoiceKind::Discard))
    }

    fn choose_place(&mut self, who: PlayerId, cards: &[CardRef<'_>], phase: Phase) -> Result<Answer, ProtocolError> {
        Err(ProtocolError::Unhandled(ChoiceKind::Place))
    }

    fn choose_payment(
        &mut self,
        who: PlayerId,
        placing: &CardRef<'_>,
        cards: &[CardRef<'_>],
        cost: usize,
    ) -> Result<Answer, ProtocolError> {
        Err(ProtocolError::Unhandled(ChoiceKind::Payment))
    }

    fn choose_settle(&mut self, who: PlayerId, powers: &[PowerRef<'_>]) -> Result<Answer, ProtocolError> {
        Err(ProtocolError::Unhandled(ChoiceKind::Settle))
    }

    fn choose_trade(&mut self, who: PlayerId, cards: &[CardRef<'_>]) -> Result<Answer, ProtocolError> {
        Err(ProtocolError::Unhandled(ChoiceKind::Trade))
    }

    fn choose_consume(&mut self, who: PlayerId, powers: &[PowerRef<'_>], optional: bool) -> Result<Answer, ProtocolError> {
        Err(ProtocolError::Unhandled(ChoiceKind::Consume))
    }

    fn choose_consume_hand(
        &mut self,
        who: PlayerId,
        power: &PowerRef<'_>,
        cards: &[CardRef<'_>],
        max: usize,
    ) -> Result<Answer, ProtocolError> {
        Err(ProtocolError::Unhandled(ChoiceKind::ConsumeHand))
    }

    fn choose_good(
        &mut self,
        who: PlayerId,
        power: &PowerRef<'_>,
        cards: &[CardRef<'_>],
        min: usize,
        max: usize,
    ) -> Result<Answer, ProtocolError> {
        Err(ProtocolError::Unhandled(ChoiceKind::Good))
    }

    fn choose_lucky(&mut self, who: PlayerId) -> Result<Answer, ProtocolError> {
        Err(ProtocolError::Unhandled(ChoiceKind::Lucky))
    }

    fn choose_windfall(&mut self, who: PlayerId, cards: &[CardRef<'_>]) -> Result<Answer, ProtocolError> {
        Err(ProtocolError::Unhandled(ChoiceKind::Windfall))
    }

    fn choose_produce(&mut self, who: PlayerId, powers: &[PowerRef<'_>]) -> Result<Answer, ProtocolError> {
        Err(ProtocolError::Unhandled(ChoiceKind::Produce))
    }
}

/// Route a choice to the handler method for its kind.
///
/// # Errors
///
/// Whatever the handler returns, including `Unhandled` for kinds it does
/// not implement.
pub fn dispatch<H: ChoiceHandler + ?Sized>(
    handler: &mut H,
    who: PlayerId,
    choice: &Choice<'_>,
) -> Result<Answer, ProtocolError> {
    match choice {
        Choice::Action { actions, count } => handler.choose_action(who, actions, *count),
        Choice::Start { cards } => handler.choose_start(who, cards),
        Choice::Discard { cards, count } => handler.choose_discard(who, cards, *count),
        Choice::Place { cards, phase } => handler.choose_place(who, cards, *phase),
        Choice::Payment { placing, cards, cost } => handler.choose_payment(who, placing, cards, *cost),
        Choice::Settle { powers } => handler.choose_settle(who, powers),
        Choice::Trade { cards } => handler.choose_trade(who, cards),
        Choice::Consume { powers, optional } => handler.choose_consume(who, powers, *optional),
        Choice::ConsumeHand { power, cards, max } => handler.choose_consume_hand(who, power, cards, *max),
        Choice::Good { power, cards, min, max } => handler.choose_good(who, power, cards, *min, *max),
        Choice::Lucky => handler.choose_lucky(who),
        Choice::Windfall { cards } => handler.choose_windfall(who, cards),
        Choice::Produce { powers } => handler.choose_produce(who, powers),
    }
}

/// Provider that answers each choice immediately through a `ChoiceHandler`.
#[derive(Debug, Default)]
pub struct HandlerDecision<H> {
    handler: H,
    pending: FxHashMap<PlayerId, Answer>,
}

impl<H: ChoiceHandler> HandlerDecision<H> {
    #[must_use]
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            pending: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }
}

impl<H: ChoiceHandler> DecisionProvider for HandlerDecision<H> {
    fn make_choice(&mut self, who: PlayerId, choice: &Choice<'_>) -> Result<(), ProtocolError> {
        let answer = dispatch(&mut self.handler, who, choice)?;
        self.pending.insert(who, answer);
        Ok(())
    }

    fn wait_answer(&mut self, who: PlayerId) -> Result<Answer, ProtocolError> {
        self.pending.remove(&who).ok_or(ProtocolError::NoPendingAnswer(who))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct LuckySeven;

    impl ChoiceHandler for LuckySeven {
        fn choose_lucky(&mut self, _who: PlayerId) -> Result<Answer, ProtocolError> {
            Ok(Answer::Number(7))
        }
    }

    #[test]
    fn test_dispatch_routes_by_kind() {
        let mut handler = LuckySeven;
        let answer = dispatch(&mut handler, PlayerId::new(0), &Choice::Lucky).unwrap();
        assert_eq!(answer, Answer::Number(7));
    }

    #[test]
    fn test_unhandled_kind_is_an_error() {
        let mut handler = LuckySeven;
        let choice = Choice::Action {
            actions: &GameAction::BASE,
            count: 1,
        };
        assert!(matches!(
            dispatch(&mut handler, PlayerId::new(0), &choice),
            Err(ProtocolError::Unhandled(ChoiceKind::Action))
        ));
    }

    #[test]
    fn test_handler_decision_pending_answers() {
        let mut provider = HandlerDecision::new(LuckySeven);
        let who = PlayerId::new(1);

        assert!(matches!(provider.wait_answer(who), Err(ProtocolError::NoPendingAnswer(_))));

        provider.make_choice(who, &Choice::Lucky).unwrap();
        assert!(matches!(provider.wait_answer(PlayerId::new(0)), Err(ProtocolError::NoPendingAnswer(_))));
        assert_eq!(provider.wait_answer(who).unwrap(), Answer::Number(7));
        assert!(provider.wait_answer(who).is_err());
    }

    #[test]
    fn test_defaults_are_no_ops() {
        let mut provider: Box<dyn DecisionProvider> = Box::new(HandlerDecision::new(LuckySeven));
        let who = PlayerId::new(0);

        provider.init(who, "Ada").unwrap();
        provider.prepare_phase(who, Phase::Explore).unwrap();
        provider.explore_sample(who, 2, 1, 1).unwrap();
        provider.private_message(who, "hello").unwrap();
        provider.game_over(who).unwrap();
        provider.shutdown(who).unwrap();
    }
}

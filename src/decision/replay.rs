//! Session logs and the replay provider.
//!
//! A `SessionLog` is the seed plus every answer each seat gave, in order.
//! Together they determine the whole session: a game started from the
//! same seed and fed the same answers reaches the same state.

use serde::{Deserialize, Serialize};

use super::choice::{Answer, Choice, ChoiceRecord};
use super::error::ProtocolError;
use super::provider::DecisionProvider;
use crate::core::PlayerId;

/// Recorded answers of one session.
///
/// ```
/// use rust_tableau::decision::{Answer, ChoiceKind, ChoiceRecord, SessionLog};
/// use rust_tableau::core::PlayerId;
///
/// let mut log = SessionLog::new(42, 2);
/// log.record(PlayerId::new(1), ChoiceRecord { kind: ChoiceKind::Lucky, answer: Answer::Number(3) });
///
/// let json = log.to_json().unwrap();
/// assert_eq!(SessionLog::from_json(&json).unwrap(), log);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLog {
    pub seed: u64,
    /// Answers per seat, in seat order.
    pub players: Vec<Vec<ChoiceRecord>>,
}

impl SessionLog {
    /// An empty log for `player_count` seats.
    #[must_use]
    pub fn new(seed: u64, player_count: usize) -> Self {
        Self {
            seed,
            players: vec![Vec::new(); player_count],
        }
    }

    /// Append an answer for a seat, growing the seat list if needed.
    pub fn record(&mut self, who: PlayerId, record: ChoiceRecord) {
        if self.players.len() <= who.index() {
            self.players.resize_with(who.index() + 1, Vec::new);
        }
        self.players[who.index()].push(record);
    }

    /// Answers of one seat.
    #[must_use]
    pub fn for_player(&self, who: PlayerId) -> &[ChoiceRecord] {
        self.players.get(who.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of recorded answers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// # Errors
    ///
    /// Returns an error if the text is not a session log.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Compact binary encoding.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// # Errors
    ///
    /// Returns an error if the bytes are not a session log.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

/// Provider that answers from a recorded session.
///
/// Each seat's answers are consumed in order. A kind mismatch or running
/// out of answers is an error, never a guess.
#[derive(Clone, Debug)]
pub struct ReplayDecision {
    log: SessionLog,
    cursors: Vec<usize>,
    pending: Vec<Option<Answer>>,
}

impl ReplayDecision {
    #[must_use]
    pub fn new(log: SessionLog) -> Self {
        let seats = log.players.len();
        Self {
            log,
            cursors: vec![0; seats],
            pending: vec![None; seats],
        }
    }

    /// Answers not yet replayed for a seat.
    #[must_use]
    pub fn remaining(&self, who: PlayerId) -> usize {
        let cursor = self.cursors.get(who.index()).copied().unwrap_or(0);
        self.log.for_player(who).len().saturating_sub(cursor)
    }

    #[must_use]
    pub fn log(&self) -> &SessionLog {
        &self.log
    }
}

impl DecisionProvider for ReplayDecision {
    fn make_choice(&mut self, who: PlayerId, choice: &Choice<'_>) -> Result<(), ProtocolError> {
        let seat = who.index();
        let cursor = self.cursors.get(seat).copied().unwrap_or(0);
        let record = self
            .log
            .for_player(who)
            .get(cursor)
            .ok_or(ProtocolError::ReplayExhausted(who))?;
        if record.kind != choice.kind() {
            return Err(ProtocolError::KindMismatch {
                expected: choice.kind(),
                found: record.kind,
            });
        }
        let answer = record.answer.clone();
        self.cursors[seat] = cursor + 1;
        self.pending[seat] = Some(answer);
        Ok(())
    }

    fn wait_answer(&mut self, who: PlayerId) -> Result<Answer, ProtocolError> {
        self.pending
            .get_mut(who.index())
            .and_then(Option::take)
            .ok_or(ProtocolError::NoPendingAnswer(who))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::ChoiceKind;

    fn lucky(number: u8) -> ChoiceRecord {
        ChoiceRecord {
            kind: ChoiceKind::Lucky,
            answer: Answer::Number(number),
        }
    }

    #[test]
    fn test_replays_in_order_per_seat() {
        let mut log = SessionLog::new(1, 2);
        log.record(PlayerId::new(0), lucky(2));
        log.record(PlayerId::new(0), lucky(5));
        log.record(PlayerId::new(1), lucky(7));
        let mut replay = ReplayDecision::new(log);

        replay.make_choice(PlayerId::new(1), &Choice::Lucky).unwrap();
        assert_eq!(replay.wait_answer(PlayerId::new(1)).unwrap(), Answer::Number(7));
        replay.make_choice(PlayerId::new(0), &Choice::Lucky).unwrap();
        assert_eq!(replay.wait_answer(PlayerId::new(0)).unwrap(), Answer::Number(2));
        assert_eq!(replay.remaining(PlayerId::new(0)), 1);
    }

    #[test]
    fn test_exhausted_log_is_an_error() {
        let mut replay = ReplayDecision::new(SessionLog::new(1, 1));
        assert!(matches!(
            replay.make_choice(PlayerId::new(0), &Choice::Lucky),
            Err(ProtocolError::ReplayExhausted(_))
        ));
        assert!(matches!(
            replay.make_choice(PlayerId::new(3), &Choice::Lucky),
            Err(ProtocolError::ReplayExhausted(_))
        ));
    }

    #[test]
    fn test_kind_mismatch_does_not_advance() {
        let mut log = SessionLog::new(1, 1);
        log.record(
            PlayerId::new(0),
            ChoiceRecord {
                kind: ChoiceKind::Discard,
                answer: Answer::pass(),
            },
        );
        let mut replay = ReplayDecision::new(log);

        assert!(matches!(
            replay.make_choice(PlayerId::new(0), &Choice::Lucky),
            Err(ProtocolError::KindMismatch {
                expected: ChoiceKind::Lucky,
                found: ChoiceKind::Discard
            })
        ));
        assert_eq!(replay.remaining(PlayerId::new(0)), 1);
        assert!(replay.wait_answer(PlayerId::new(0)).is_err());
    }

    #[test]
    fn test_bincode_roundtrip() {
        let mut log = SessionLog::new(99, 2);
        log.record(PlayerId::new(0), lucky(4));
        log.record(
            PlayerId::new(1),
            ChoiceRecord {
                kind: ChoiceKind::Produce,
                answer: Answer::Power(None),
            },
        );

        let bytes = log.to_bytes().unwrap();
        assert_eq!(SessionLog::from_bytes(&bytes).unwrap(), log);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_record_grows_seats() {
        let mut log = SessionLog::default();
        log.record(PlayerId::new(2), lucky(1));

        assert_eq!(log.players.len(), 3);
        assert!(log.for_player(PlayerId::new(0)).is_empty());
        assert!(log.for_player(PlayerId::new(9)).is_empty());
    }
}

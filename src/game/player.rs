//! Per-seat state.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardId;
use crate::core::{GameAction, Phase, SeatConfig};
use crate::decision::ChoiceRecord;

/// One seat at the table.
///
/// Cards are not stored here; the deck knows who owns what.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,

    /// Played by an automated provider.
    pub ai: bool,

    // === Actions ===
    /// Actions selected this round.
    pub actions: SmallVec<[GameAction; 2]>,

    /// Actions selected the round before.
    pub prev_actions: SmallVec<[GameAction; 2]>,

    // === Score ===
    /// Victory point chips.
    pub vp: u32,

    /// Total score if the game ended now; set by scoring.
    pub end_vp: i32,

    pub winner: bool,

    // === Table ===
    pub start: Option<CardId>,

    /// Placement counter for tableau order.
    pub table_order: u32,

    // === Phase scratch ===
    pub bonus_military: i32,
    pub bonus_reduce: i32,
    /// Cards earned during the current phase.
    pub phase_cards: u32,
    /// VP earned during the current phase.
    pub phase_vp: u32,
    /// Cards drawn this round.
    pub drawn_round: u32,

    // === Decisions ===
    choice_log: Vector<ChoiceRecord>,
    replay_cursor: usize,
}

impl Player {
    #[must_use]
    pub fn new(seat: &SeatConfig) -> Self {
        Self {
            name: seat.name.clone(),
            ai: seat.ai,
            actions: SmallVec::new(),
            prev_actions: SmallVec::new(),
            vp: 0,
            end_vp: 0,
            winner: false,
            start: None,
            table_order: 0,
            bonus_military: 0,
            bonus_reduce: 0,
            phase_cards: 0,
            phase_vp: 0,
            drawn_round: 0,
            choice_log: Vector::new(),
            replay_cursor: 0,
        }
    }

    /// Whether the player selected `action` this round.
    #[must_use]
    pub fn selected(&self, action: GameAction) -> bool {
        self.actions.contains(&action)
    }

    /// Whether the player selected any action for `phase` this round.
    #[must_use]
    pub fn selected_phase(&self, phase: Phase) -> bool {
        self.actions.iter().any(|action| action.phase() == phase)
    }

    /// Clear the per-phase counters.
    pub fn reset_phase(&mut self) {
        self.bonus_military = 0;
        self.bonus_reduce = 0;
        self.phase_cards = 0;
        self.phase_vp = 0;
    }

    /// Next placement order number.
    pub fn next_order(&mut self) -> u32 {
        self.table_order += 1;
        self.table_order
    }

    /// Every answer this seat gave, in order.
    #[must_use]
    pub fn choice_log(&self) -> &Vector<ChoiceRecord> {
        &self.choice_log
    }

    /// Whether logged answers are still waiting to be replayed.
    #[must_use]
    pub fn is_replaying(&self) -> bool {
        self.replay_cursor < self.choice_log.len()
    }

    pub(crate) fn load_log(&mut self, records: &[ChoiceRecord]) {
        self.choice_log = records.iter().cloned().collect();
        self.replay_cursor = 0;
    }

    pub(crate) fn peek_replay(&self) -> Option<&ChoiceRecord> {
        self.choice_log.get(self.replay_cursor)
    }

    pub(crate) fn advance_replay(&mut self) {
        self.replay_cursor += 1;
    }

    pub(crate) fn record(&mut self, record: ChoiceRecord) {
        self.choice_log.push_back(record);
        self.replay_cursor = self.choice_log.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::{Answer, ChoiceKind};

    fn record(number: u8) -> ChoiceRecord {
        ChoiceRecord {
            kind: ChoiceKind::Lucky,
            answer: Answer::Number(number),
        }
    }

    #[test]
    fn test_new_player() {
        let player = Player::new(&SeatConfig::ai("Bot"));
        assert_eq!(player.name, "Bot");
        assert!(player.ai);
        assert_eq!(player.vp, 0);
        assert!(!player.is_replaying());
    }

    #[test]
    fn test_selected_actions() {
        let mut player = Player::new(&SeatConfig::human("Ada"));
        player.actions.push(GameAction::Explore1_1);

        assert!(player.selected(GameAction::Explore1_1));
        assert!(!player.selected(GameAction::Explore5_0));
        assert!(player.selected_phase(Phase::Explore));
        assert!(!player.selected_phase(Phase::Settle));
    }

    #[test]
    fn test_replay_cursor() {
        let mut player = Player::new(&SeatConfig::human("Ada"));
        player.load_log(&[record(1), record(2)]);

        assert!(player.is_replaying());
        assert_eq!(player.peek_replay(), Some(&record(1)));
        player.advance_replay();
        player.advance_replay();
        assert!(!player.is_replaying());

        player.record(record(3));
        assert_eq!(player.choice_log().len(), 3);
        assert!(player.peek_replay().is_none());
    }

    #[test]
    fn test_order_and_phase_reset() {
        let mut player = Player::new(&SeatConfig::human("Ada"));
        assert_eq!(player.next_order(), 1);
        assert_eq!(player.next_order(), 2);

        player.phase_vp = 4;
        player.bonus_military = 2;
        player.reset_phase();
        assert_eq!((player.phase_vp, player.bonus_military), (0, 0));
    }
}

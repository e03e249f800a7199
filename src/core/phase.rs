//! Game phases.

use serde::{Deserialize, Serialize};

/// Phase of a round.
///
/// `Action` is action selection, `Discard` is the end-of-round hand limit
/// check. The five in between are the phases powers are scoped to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Action,
    Explore,
    Develop,
    Settle,
    Consume,
    Produce,
    Discard,
}

impl Phase {
    /// Phases that powers can be scoped to, in resolution order.
    pub const POWER_PHASES: [Phase; 5] = [
        Phase::Explore,
        Phase::Develop,
        Phase::Settle,
        Phase::Consume,
        Phase::Produce,
    ];

    /// Numeric phase (Action = 0 .. Discard = 6).
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Phase for a number, if in range.
    #[must_use]
    pub fn from_number(number: u8) -> Option<Phase> {
        match number {
            0 => Some(Phase::Action),
            1 => Some(Phase::Explore),
            2 => Some(Phase::Develop),
            3 => Some(Phase::Settle),
            4 => Some(Phase::Consume),
            5 => Some(Phase::Produce),
            6 => Some(Phase::Discard),
            _ => None,
        }
    }

    /// Whether card powers can be scoped to this phase (1..=5).
    #[must_use]
    pub const fn has_powers(self) -> bool {
        matches!(self.number(), 1..=5)
    }

    /// Upper-case name, as used in prompts.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Phase::Action => "ACTION",
            Phase::Explore => "EXPLORE",
            Phase::Develop => "DEVELOP",
            Phase::Settle => "SETTLE",
            Phase::Consume => "CONSUME",
            Phase::Produce => "PRODUCE",
            Phase::Discard => "DISCARD",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_numbers_roundtrip() {
        for n in 0..=6 {
            let phase = Phase::from_number(n).unwrap();
            assert_eq!(phase.number(), n);
        }
        assert_eq!(Phase::from_number(7), None);
    }

    #[test]
    fn test_power_phases() {
        assert!(!Phase::Action.has_powers());
        assert!(Phase::Explore.has_powers());
        assert!(Phase::Produce.has_powers());
        assert!(!Phase::Discard.has_powers());
        assert!(Phase::POWER_PHASES.iter().all(|p| p.has_powers()));
    }
}

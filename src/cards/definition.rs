//! Designs - the immutable blueprints cards are instantiated from.
//!
//! A `Design` holds everything printed on a card: type, cost, victory
//! points, flags, the good it produces, its powers and its end-game
//! bonuses. Per-game state (location, owner, goods) lives on `Card`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::attributes::{CardFlag, CardType, GoodType, VpCategory};
use super::power::PowerCode;
use crate::core::{GameAction, Phase};

/// Position of a design in its catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DesignId(pub u32);

impl DesignId {
    /// Create a new design ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The ID as a catalog index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for DesignId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Design({})", self.0)
    }
}

/// Expansion membership: which expansion introduced the design and how
/// many physical copies it has.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardExpansion {
    pub index: u8,
    pub count: u32,
}

/// One triggerable power.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Power {
    pub code: PowerCode,
    /// Primary parameter (cards drawn, cost reduction, VP gained, ...).
    pub value: i32,
    /// Repeat count.
    pub times: i32,
}

impl Power {
    /// A power with no parameters.
    #[must_use]
    pub const fn new(code: PowerCode) -> Self {
        Self {
            code,
            value: 0,
            times: 0,
        }
    }

    /// Set the value parameter.
    #[must_use]
    pub const fn with_value(mut self, value: i32) -> Self {
        self.value = value;
        self
    }

    /// Set the repeat count.
    #[must_use]
    pub const fn with_times(mut self, times: i32) -> Self {
        self.times = times;
        self
    }

    /// Phase this power triggers in. Always the phase of its code.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.code.phase()
    }
}

/// End-game victory point bonus.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bonus {
    pub point: i32,
    pub category: VpCategory,
    /// Qualifier the category refers to (a card name for `NAME`); may be empty.
    pub name: String,
}

/// Immutable card blueprint.
///
/// ## Example
///
/// ```
/// use rust_tableau::cards::{parse_designs, CardType, GoodType};
///
/// let designs = parse_designs("N:Gene Mill\nT:2:3:1\nE:base@0:2\nG:GENE\n").unwrap();
/// let mill = &designs[0];
///
/// assert_eq!(mill.name, "Gene Mill");
/// assert_eq!(mill.card_type, CardType::Development);
/// assert_eq!((mill.cost, mill.vp), (3, 1));
/// assert_eq!(mill.good, GoodType::Gene);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Design {
    /// Position in the catalog.
    pub id: DesignId,

    pub name: String,

    pub card_type: CardType,

    /// Cost to place (for military worlds, the defense).
    pub cost: u32,

    /// Printed victory points.
    pub vp: i32,

    pub expansion: CardExpansion,

    pub good: GoodType,

    pub flags: SmallVec<[CardFlag; 4]>,

    pub powers: Vec<Power>,

    pub bonuses: Vec<Bonus>,

    /// Record lines the design was built from.
    pub source: Vec<String>,
}

impl Design {
    /// Check a flag.
    #[must_use]
    pub fn has_flag(&self, flag: CardFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Whether this is a world.
    #[must_use]
    pub fn is_world(&self) -> bool {
        self.card_type == CardType::World
    }

    /// Whether this is a development.
    #[must_use]
    pub fn is_development(&self) -> bool {
        self.card_type == CardType::Development
    }

    /// Whether this design produces (or receives as windfall) goods.
    #[must_use]
    pub fn produces(&self) -> bool {
        self.good != GoodType::None
    }

    /// Powers that trigger in a phase, in printed order.
    pub fn powers_in(&self, phase: Phase) -> impl Iterator<Item = &Power> {
        self.powers.iter().filter(move |p| p.phase() == phase)
    }

    /// Whether the design is part of the game at an expansion level.
    #[must_use]
    pub fn in_expansion(&self, level: u8) -> bool {
        self.expansion.index <= level
    }
}

/// Blueprint of an action card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDesign {
    pub name: String,
    pub action: GameAction,
    /// Position in the action list.
    pub index: usize,
}

impl ActionDesign {
    /// Artwork stem for this action card.
    #[must_use]
    pub fn image_name(&self) -> String {
        format!("action{:02}", self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{ConsumePower, SettlePower};

    fn sample() -> Design {
        Design {
            id: DesignId::new(4),
            name: "Spice World".to_string(),
            card_type: CardType::World,
            cost: 2,
            vp: 2,
            expansion: CardExpansion { index: 0, count: 2 },
            good: GoodType::Novelty,
            flags: SmallVec::from_slice(&[CardFlag::Windfall]),
            powers: vec![
                Power::new(PowerCode::Consume(ConsumePower::ConsumeAny)).with_value(1),
                Power::new(PowerCode::Settle(SettlePower::Reduce)).with_value(1),
            ],
            bonuses: Vec::new(),
            source: Vec::new(),
        }
    }

    #[test]
    fn test_design_queries() {
        let design = sample();

        assert!(design.is_world());
        assert!(!design.is_development());
        assert!(design.has_flag(CardFlag::Windfall));
        assert!(!design.has_flag(CardFlag::Military));
        assert!(design.produces());
        assert!(design.in_expansion(0));
    }

    #[test]
    fn test_powers_in_phase() {
        let design = sample();

        let consume: Vec<_> = design.powers_in(Phase::Consume).collect();
        assert_eq!(consume.len(), 1);
        assert_eq!(consume[0].value, 1);
        assert_eq!(design.powers_in(Phase::Explore).count(), 0);
    }

    #[test]
    fn test_action_image_name() {
        let design = ActionDesign {
            name: "Produce".to_string(),
            action: GameAction::Produce,
            index: 6,
        };
        assert_eq!(design.image_name(), "action06");
        assert_eq!(DesignId::new(7).to_string(), "Design(7)");
    }
}

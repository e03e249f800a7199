//! Phase-qualified power codes.
//!
//! Each phase has its own code table, and `PowerCode` carries the phase in
//! its variant, so a power can never claim a code from a different phase.
//! In the card format a power is written `P:<phase>:<NAME>...`; the pair is
//! resolved through the qualified name `P<phase>_<NAME>`.

use serde::{Deserialize, Serialize};

use crate::core::Phase;

named_enum! {
    /// Explore phase powers.
    pub enum ExplorePower {
        Draw => "DRAW",
        Keep => "KEEP",
        DiscardAny => "DISCARD_ANY",
        DiscardPrestige => "DISCARD_PRESTIGE",
        OrbMovement => "ORB_MOVEMENT",
        PerRebelMilitary => "PER_REBEL_MILITARY",
    }
}

named_enum! {
    /// Develop phase powers.
    pub enum DevelopPower {
        Draw => "DRAW",
        Reduce => "REDUCE",
        DrawAfter => "DRAW_AFTER",
        Explore => "EXPLORE",
        DiscardReduce => "DISCARD_REDUCE",
        SaveCost => "SAVE_COST",
        Prestige => "PRESTIGE",
        PrestigeRebel => "PRESTIGE_REBEL",
        PrestigeSix => "PRESTIGE_SIX",
        ConsumeRare => "CONSUME_RARE",
    }
}

named_enum! {
    /// Settle phase powers.
    pub enum SettlePower {
        Reduce => "REDUCE",
        Novelty => "NOVELTY",
        Rare => "RARE",
        Gene => "GENE",
        Alien => "ALIEN",
        Discard => "DISCARD",
        ReduceZero => "REDUCE_ZERO",
        MilitaryHand => "MILITARY_HAND",
        ExtraMilitary => "EXTRA_MILITARY",
        AgainstRebel => "AGAINST_REBEL",
        AgainstChromo => "AGAINST_CHROMO",
        PerMilitary => "PER_MILITARY",
        PerChromo => "PER_CHROMO",
        IfImperium => "IF_IMPERIUM",
        PayMilitary => "PAY_MILITARY",
        PayDiscount => "PAY_DISCOUNT",
        PayPrestige => "PAY_PRESTIGE",
        ConquerSettle => "CONQUER_SETTLE",
        NoTakeover => "NO_TAKEOVER",
        DrawAfter => "DRAW_AFTER",
        ExploreAfter => "EXPLORE_AFTER",
        Prestige => "PRESTIGE",
        PrestigeRebel => "PRESTIGE_REBEL",
        SaveCost => "SAVE_COST",
        PlaceTwo => "PLACE_TWO",
        PlaceMilitary => "PLACE_MILITARY",
        PlaceLeftover => "PLACE_LEFTOVER",
        PlaceZero => "PLACE_ZERO",
        ConsumeRare => "CONSUME_RARE",
        ConsumeGene => "CONSUME_GENE",
        ConsumeAlien => "CONSUME_ALIEN",
        ConsumePrestige => "CONSUME_PRESTIGE",
        AutoProduce => "AUTO_PRODUCE",
        ProducePrestige => "PRODUCE_PRESTIGE",
        TakeoverRebel => "TAKEOVER_REBEL",
        TakeoverImperium => "TAKEOVER_IMPERIUM",
        TakeoverMilitary => "TAKEOVER_MILITARY",
        TakeoverPrestige => "TAKEOVER_PRESTIGE",
        Destroy => "DESTROY",
        TakeoverDefense => "TAKEOVER_DEFENSE",
        PreventTakeover => "PREVENT_TAKEOVER",
        UpgradeWorld => "UPGRADE_WORLD",
        FlipZero => "FLIP_ZERO",
        Xeno => "XENO",
        XenoDefense => "XENO_DEFENSE",
        DiscardHand => "DISCARD_HAND",
        PerImperium => "PER_IMPERIUM",
        PerRebelMilitary => "PER_REBEL_MILITARY",
        PerPeaceful => "PER_PEACEFUL",
        ConsumeNovelty => "CONSUME_NOVELTY",
        ConsumeAny => "CONSUME_ANY",
    }
}

named_enum! {
    /// Consume phase powers (trade and consume).
    pub enum ConsumePower {
        TradeAny => "TRADE_ANY",
        TradeNovelty => "TRADE_NOVELTY",
        TradeRare => "TRADE_RARE",
        TradeGene => "TRADE_GENE",
        TradeAlien => "TRADE_ALIEN",
        TradeThis => "TRADE_THIS",
        TradeBonusChromo => "TRADE_BONUS_CHROMO",
        NoTrade => "NO_TRADE",
        TradeAction => "TRADE_ACTION",
        TradeNoBonus => "TRADE_NO_BONUS",
        ConsumeAny => "CONSUME_ANY",
        ConsumeNovelty => "CONSUME_NOVELTY",
        ConsumeRare => "CONSUME_RARE",
        ConsumeGene => "CONSUME_GENE",
        ConsumeAlien => "CONSUME_ALIEN",
        ConsumeThis => "CONSUME_THIS",
        ConsumeTwo => "CONSUME_TWO",
        Consume3Diff => "CONSUME_3_DIFF",
        ConsumeNDiff => "CONSUME_N_DIFF",
        ConsumeAll => "CONSUME_ALL",
        ConsumePrestige => "CONSUME_PRESTIGE",
        GetCard => "GET_CARD",
        Get2Card => "GET_2_CARD",
        Get3Card => "GET_3_CARD",
        GetVp => "GET_VP",
        GetPrestige => "GET_PRESTIGE",
        Draw => "DRAW",
        DrawLucky => "DRAW_LUCKY",
        DiscardHand => "DISCARD_HAND",
        AnteCard => "ANTE_CARD",
        Vp => "VP",
    }
}

impl ConsumePower {
    /// Good kind a consume power accepts, for the single-good consume powers.
    #[must_use]
    pub const fn consumes(self) -> Option<crate::cards::GoodType> {
        use crate::cards::GoodType;
        match self {
            ConsumePower::ConsumeAny => Some(GoodType::Any),
            ConsumePower::ConsumeNovelty => Some(GoodType::Novelty),
            ConsumePower::ConsumeRare => Some(GoodType::Rare),
            ConsumePower::ConsumeGene => Some(GoodType::Gene),
            ConsumePower::ConsumeAlien => Some(GoodType::Alien),
            _ => None,
        }
    }
}

named_enum! {
    /// Produce phase powers.
    pub enum ProducePower {
        Produce => "PRODUCE",
        WindfallAny => "WINDFALL_ANY",
        WindfallNovelty => "WINDFALL_NOVELTY",
        WindfallRare => "WINDFALL_RARE",
        WindfallGene => "WINDFALL_GENE",
        WindfallAlien => "WINDFALL_ALIEN",
        NotThis => "NOT_THIS",
        Discard => "DISCARD",
        Draw => "DRAW",
        DrawIf => "DRAW_IF",
        PrestigeIf => "PRESTIGE_IF",
        DrawEachNovelty => "DRAW_EACH_NOVELTY",
        DrawEachRare => "DRAW_EACH_RARE",
        DrawEachGene => "DRAW_EACH_GENE",
        DrawEachAlien => "DRAW_EACH_ALIEN",
        DrawWorldGene => "DRAW_WORLD_GENE",
        DrawMostProduced => "DRAW_MOST_PRODUCED",
        DrawDifferent => "DRAW_DIFFERENT",
        DrawMostNovelty => "DRAW_MOST_NOVELTY",
        DrawMostRare => "DRAW_MOST_RARE",
        DrawMostGene => "DRAW_MOST_GENE",
        PrestigeMostChromo => "PRESTIGE_MOST_CHROMO",
        DrawMilitary => "DRAW_MILITARY",
        DrawRebel => "DRAW_REBEL",
        DrawRebelMilitary => "DRAW_REBEL_MILITARY",
        DrawImperium => "DRAW_IMPERIUM",
        DrawChromo => "DRAW_CHROMO",
        Draw5Dev => "DRAW_5_DEV",
        TakeSaved => "TAKE_SAVED",
        ShiftRare => "SHIFT_RARE",
        Repair => "REPAIR",
        DrawEveryTwo => "DRAW_EVERY_TWO",
        DrawWorldRare => "DRAW_WORLD_RARE",
        DrawXenoMilitary => "DRAW_XENO_MILITARY",
        DrawTwoMilitary => "DRAW_TWO_MILITARY",
    }
}

/// A power code, qualified by the phase it triggers in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerCode {
    Explore(ExplorePower),
    Develop(DevelopPower),
    Settle(SettlePower),
    Consume(ConsumePower),
    Produce(ProducePower),
}

impl PowerCode {
    /// Resolve an unqualified power name within a phase number (1..=5).
    ///
    /// Returns `None` when the phase is out of range or the name is not in
    /// that phase's table.
    ///
    /// ```
    /// use rust_tableau::cards::{PowerCode, SettlePower};
    ///
    /// assert_eq!(PowerCode::resolve(3, "REDUCE"), Some(PowerCode::Settle(SettlePower::Reduce)));
    /// assert_eq!(PowerCode::resolve(1, "REDUCE"), None);
    /// ```
    #[must_use]
    pub fn resolve(phase: u8, name: &str) -> Option<Self> {
        match phase {
            1 => ExplorePower::from_name(name).map(PowerCode::Explore),
            2 => DevelopPower::from_name(name).map(PowerCode::Develop),
            3 => SettlePower::from_name(name).map(PowerCode::Settle),
            4 => ConsumePower::from_name(name).map(PowerCode::Consume),
            5 => ProducePower::from_name(name).map(PowerCode::Produce),
            _ => None,
        }
    }

    /// Resolve a qualified name such as `P4_CONSUME_ANY`.
    #[must_use]
    pub fn from_qualified_name(qualified: &str) -> Option<Self> {
        let rest = qualified.strip_prefix('P')?;
        let (phase, name) = rest.split_once('_')?;
        Self::resolve(phase.parse().ok()?, name)
    }

    /// Phase the power triggers in.
    #[must_use]
    pub const fn phase(self) -> Phase {
        match self {
            PowerCode::Explore(_) => Phase::Explore,
            PowerCode::Develop(_) => Phase::Develop,
            PowerCode::Settle(_) => Phase::Settle,
            PowerCode::Consume(_) => Phase::Consume,
            PowerCode::Produce(_) => Phase::Produce,
        }
    }

    /// Code within its phase's table.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            PowerCode::Explore(p) => p.code(),
            PowerCode::Develop(p) => p.code(),
            PowerCode::Settle(p) => p.code(),
            PowerCode::Consume(p) => p.code(),
            PowerCode::Produce(p) => p.code(),
        }
    }

    /// Unqualified name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PowerCode::Explore(p) => p.as_str(),
            PowerCode::Develop(p) => p.as_str(),
            PowerCode::Settle(p) => p.as_str(),
            PowerCode::Consume(p) => p.as_str(),
            PowerCode::Produce(p) => p.as_str(),
        }
    }
}

impl std::fmt::Display for PowerCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}_{}", self.phase().number(), self.name())
    }
}

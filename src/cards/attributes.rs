//! Design attributes: card type, good type, flags, VP bonus categories.
//!
//! The text names are the symbols used by the card format (`F:`, `G:`,
//! `V:` records), so parsing a record is a `from_name` lookup.

/// Card type. The card format writes it as a number (`T:<type>:...`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum CardType {
    World,
    Development,
}

impl CardType {
    /// Type for its numeric code (1 = world, 2 = development).
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(CardType::World),
            2 => Some(CardType::Development),
            _ => None,
        }
    }

    /// Numeric code as written in the card format.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            CardType::World => 1,
            CardType::Development => 2,
        }
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardType::World => f.write_str("WORLD"),
            CardType::Development => f.write_str("DEVELOPMENT"),
        }
    }
}

named_enum! {
    /// Kind of good a world produces. `None` for worlds that produce nothing
    /// and for developments.
    pub enum GoodType {
        None => "NONE",
        Any => "ANY",
        Novelty => "NOVELTY",
        Rare => "RARE",
        Gene => "GENE",
        Alien => "ALIEN",
    }
}

impl Default for GoodType {
    fn default() -> Self {
        GoodType::None
    }
}

impl GoodType {
    /// Cards received when trading one good of this kind.
    #[must_use]
    pub const fn trade_value(self) -> usize {
        match self {
            GoodType::Novelty => 2,
            GoodType::Rare => 3,
            GoodType::Gene => 4,
            GoodType::Alien => 5,
            GoodType::None | GoodType::Any => 0,
        }
    }
}

named_enum! {
    /// Design flags.
    pub enum CardFlag {
        Military => "MILITARY",
        Windfall => "WINDFALL",
        Start => "START",
        StartRed => "START_RED",
        StartBlue => "START_BLUE",
        Promo => "PROMO",
        Rebel => "REBEL",
        Uplift => "UPLIFT",
        Alien => "ALIEN",
        Terraforming => "TERRAFORMING",
        Imperium => "IMPERIUM",
        Chromo => "CHROMO",
        Prestige => "PRESTIGE",
        StartHand3 => "STARTHAND_3",
        StartSave => "START_SAVE",
        DiscardTo12 => "DISCARD_TO_12",
        GameEnd14 => "GAME_END_14",
        TakeDiscards => "TAKE_DISCARDS",
        SelectLast => "SELECT_LAST",
        ExtraSurvey => "EXTRA_SURVEY",
        NoProduce => "NO_PRODUCE",
        DiscardProduce => "DISCARD_PRODUCE",
        Xeno => "XENO",
        AntiXeno => "ANTI_XENO",
        Peaceful => "PEACEFUL",
    }
}

named_enum! {
    /// End-game VP bonus category.
    pub enum VpCategory {
        NoveltyProduction => "NOVELTY_PRODUCTION",
        RareProduction => "RARE_PRODUCTION",
        GeneProduction => "GENE_PRODUCTION",
        AlienProduction => "ALIEN_PRODUCTION",
        NoveltyWindfall => "NOVELTY_WINDFALL",
        RareWindfall => "RARE_WINDFALL",
        GeneWindfall => "GENE_WINDFALL",
        AlienWindfall => "ALIEN_WINDFALL",
        DevelExplore => "DEVEL_EXPLORE",
        WorldExplore => "WORLD_EXPLORE",
        DevelTrade => "DEVEL_TRADE",
        WorldTrade => "WORLD_TRADE",
        DevelConsume => "DEVEL_CONSUME",
        WorldConsume => "WORLD_CONSUME",
        SixDevel => "SIX_DEVEL",
        Devel => "DEVEL",
        World => "WORLD",
        NonmilitaryWorld => "NONMILITARY_WORLD",
        NonmilitaryTrade => "NONMILITARY_TRADE",
        RebelFlag => "REBEL_FLAG",
        AlienFlag => "ALIEN_FLAG",
        TerraformingFlag => "TERRAFORMING_FLAG",
        UpliftFlag => "UPLIFT_FLAG",
        ImperiumFlag => "IMPERIUM_FLAG",
        ChromoFlag => "CHROMO_FLAG",
        Military => "MILITARY",
        TotalMilitary => "TOTAL_MILITARY",
        NegativeMilitary => "NEGATIVE_MILITARY",
        RebelMilitary => "REBEL_MILITARY",
        ThreeVp => "THREE_VP",
        KindGood => "KIND_GOOD",
        Prestige => "PRESTIGE",
        AlienHistory => "ALIEN_HISTORY",
        AlienScience => "ALIEN_SCIENCE",
        AlienUplift => "ALIEN_UPLIFT",
        Name => "NAME",
        AntiXenoFlag => "ANTI_XENO_FLAG",
        AntiXenoWorld => "ANTI_XENO_WORLD",
        AntiXenoDevel => "ANTI_XENO_DEVEL",
        XenoMilitary => "XENO_MILITARY",
        AlienTechnology => "ALIEN_TECHNOLOGY",
    }
}

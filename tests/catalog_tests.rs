//! Catalog loading tests against the bundled sample catalog.
//!
//! These exercise the parser through the public API: file loading, name
//! lookup, power resolution and the error reported for corrupt input.

use rust_tableau::cards::{
    CardFlag, CardType, Catalog, CatalogError, ConsumePower, DesignId, GoodType, ParseErrorKind, PowerCode,
    SettlePower, VpCategory,
};
use rust_tableau::core::{GameAction, Phase};
use rust_tableau::zones::PROMO_START_WORLDS;

fn sample() -> Catalog {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/cards.txt");
    Catalog::load(path).unwrap()
}

#[test]
fn test_sample_catalog_loads() {
    let catalog = sample();
    assert_eq!(catalog.len(), 47);

    // Promotional start worlds come first.
    for index in PROMO_START_WORLDS {
        let design = catalog.get(DesignId::new(index)).unwrap();
        assert!(design.has_flag(CardFlag::Start), "{} is not a start world", design.name);
        assert!(design.has_flag(CardFlag::Promo));
    }

    let start_worlds = catalog
        .iter()
        .filter(|design| design.has_flag(CardFlag::Start) && !design.has_flag(CardFlag::Promo))
        .count();
    assert_eq!(start_worlds, 8);
}

#[test]
fn test_sample_designs_by_name() {
    let catalog = sample();

    let mill = catalog.by_name("gene mill").unwrap();
    assert_eq!(mill.card_type, CardType::Development);
    assert_eq!((mill.cost, mill.vp), (3, 1));
    assert_eq!(mill.good, GoodType::Gene);
    assert_eq!(
        mill.powers_in(Phase::Consume).map(|power| power.code).collect::<Vec<_>>(),
        vec![PowerCode::Consume(ConsumePower::ConsumeGene)]
    );

    let bastion = catalog.by_name("IMPERIAL BASTION").unwrap();
    assert!(bastion.is_world());
    assert!(bastion.has_flag(CardFlag::Military));
    assert_eq!(bastion.powers[0].code, PowerCode::Settle(SettlePower::ExtraMilitary));
    assert_eq!(bastion.powers[0].value, 2);

    let federation = catalog.by_name("Galactic Federation").unwrap();
    assert_eq!(federation.bonuses.len(), 2);
    assert_eq!(federation.bonuses[0].category, VpCategory::SixDevel);
    assert_eq!(federation.bonuses[0].point, 2);
}

#[test]
fn test_multi_clause_power_record() {
    let catalog = sample();
    let smuggler = catalog.by_name("Smuggler Den").unwrap();

    let consume: Vec<_> = smuggler.powers_in(Phase::Consume).collect();
    assert_eq!(consume.len(), 2);
    assert_eq!(consume[0].code, PowerCode::Consume(ConsumePower::ConsumeNovelty));
    assert_eq!((consume[0].value, consume[0].times), (1, 2));
    assert_eq!(consume[1].code, PowerCode::Consume(ConsumePower::Draw));
    assert_eq!(smuggler.powers_in(Phase::Produce).count(), 1);
}

#[test]
fn test_sources_keep_records_but_not_comments() {
    let catalog = sample();
    let beacon = catalog.get(DesignId::new(0)).unwrap();

    assert_eq!(beacon.name, "Ancient Beacon");
    assert_eq!(beacon.source.first().map(String::as_str), Some("N:Ancient Beacon"));
    assert!(beacon.source.iter().all(|line| !line.starts_with('#')));
    assert!(beacon.source.contains(&"E:promo@0:1".to_string()));
}

#[test]
fn test_expansion_membership() {
    let catalog = sample();
    let cathedral = catalog.by_name("Alien Cathedral").unwrap();
    assert_eq!(cathedral.expansion.index, 1);
    assert!(!cathedral.in_expansion(0));
    assert!(cathedral.in_expansion(1));
}

#[test]
fn test_action_designs_are_fixed() {
    let catalog = sample();
    assert_eq!(catalog.actions().len(), GameAction::BASE.len());
    assert_eq!(catalog.action_design(GameAction::Produce).unwrap().image_name(), "action06");
    assert!(catalog.action_design(GameAction::Search).is_none());
    assert_eq!(catalog.image_name(DesignId::new(12)).as_deref(), Some("card012"));
}

#[test]
fn test_corrupt_catalog_reports_line_and_code() {
    let text = "N:Good\nT:1:1:1\nE:base@0:1\nN:Bad\nT:1:1:1\nP:4:CONSUME_EVERYTHING\n";
    match Catalog::parse(text) {
        Err(CatalogError::Parse { line, code, kind, .. }) => {
            assert_eq!(line, 6);
            assert_eq!(code, 'P');
            assert!(matches!(kind, ParseErrorKind::UnknownPower { phase: 4, .. }));
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_record_before_any_design_is_fatal() {
    let error = Catalog::parse("# header\nT:1:2:3\nN:Late\n").unwrap_err();
    assert_eq!(error.parse_kind(), Some(&ParseErrorKind::NoCurrentDesign));
    assert_eq!(error.line(), Some(2));
}

#[test]
fn test_lookup_misses() {
    let catalog = sample();
    assert!(catalog.by_name("No Such World").is_none());
    assert!(matches!(catalog.require_name("No Such World"), Err(CatalogError::UnknownName(_))));
    assert!(matches!(catalog.require(DesignId::new(999)), Err(CatalogError::UnknownDesign(999))));
}

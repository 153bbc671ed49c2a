//! Reference cache loading, enum listings and enum extension.

mod common;

use common::*;
use ygo_catalog::cache::{add_enum_value_if_absent, EnumKind, ReferenceCache};
use ygo_catalog::models::NewCard;
use ygo_catalog::{CardFilters, ListCardsParams};

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[test]
fn enums_are_loaded_in_ascending_order() {
    let catalog = setup_catalog();
    let cache = catalog.cache();
    assert_eq!(
        cache.enum_values(EnumKind::Archetype),
        &["Blue-Eyes", "Code Talker", "Dark Magician"]
    );
    assert_eq!(cache.enum_values(EnumKind::Attribute), &["DARK", "LIGHT"]);
    assert_eq!(
        cache.enum_values(EnumKind::Frametype),
        &["effect", "link", "normal", "spell"]
    );
    assert_eq!(
        cache.enum_values(EnumKind::Type),
        &["Effect Monster", "Link Monster", "Normal Monster", "Spell Card"]
    );
    assert!(cache.enum_contains(EnumKind::Race, "Cyberse"));
    assert!(!cache.enum_contains(EnumKind::Race, "cyberse"));
}

#[test]
fn snapshot_is_ordered_and_hydrated() {
    let catalog = setup_catalog();
    let cards = catalog.cache().all_cards();
    assert_eq!(cards.len(), 6);
    assert!(cards.windows(2).all(|w| w[0].card_id < w[1].card_id));
    assert_eq!(cards[0].card_sets.len(), 2);
    assert_eq!(cards[5].linkmarkers.len(), 3);
}

#[test]
fn empty_store_loads_an_empty_cache() {
    let catalog = empty_catalog();
    for kind in EnumKind::ALL {
        assert!(catalog.cache().enum_values(kind).is_empty());
    }
    assert!(catalog.cache().all_cards().is_empty());
    assert_eq!(catalog.cards().all().total, 0);
}

#[test]
fn from_parts_fills_missing_kinds() {
    let cache =
        ReferenceCache::from_parts([(EnumKind::Race, vec!["Dragon".to_string()])], Vec::new());
    assert!(cache.enum_values(EnumKind::Archetype).is_empty());
    assert!(cache.enum_contains(EnumKind::Race, "Dragon"));
}

// ---------------------------------------------------------------------------
// EnumKind and EnumQuery
// ---------------------------------------------------------------------------

#[test]
fn enum_kind_names_and_parse() {
    assert_eq!(EnumKind::parse("TYPE"), Some(EnumKind::Type));
    assert_eq!(EnumKind::parse(" frametype "), Some(EnumKind::Frametype));
    assert_eq!(EnumKind::parse("rarity"), None);
    assert_eq!(EnumKind::Type.column(), "\"type\"");
    assert_eq!(EnumKind::Race.to_string(), "race");
    assert_eq!(EnumKind::Attribute.canonicalize("light"), "LIGHT");
    assert_eq!(EnumKind::Race.canonicalize("dragon"), "dragon");
}

#[test]
fn enum_listing_comes_from_the_cache() {
    let catalog = setup_catalog();
    let races = catalog.enums().list(EnumKind::Race);
    assert_eq!(races.total, 4);
    assert_eq!(races.results, vec!["Cyberse", "Dragon", "Normal", "Spellcaster"]);

    let all = catalog.enums().all();
    let kinds: Vec<EnumKind> = all.iter().map(|(k, _)| *k).collect();
    assert_eq!(kinds, EnumKind::ALL.to_vec());
    assert!(catalog.enums().contains(EnumKind::Attribute, "light"));
}

// ---------------------------------------------------------------------------
// Enum extension and staleness
// ---------------------------------------------------------------------------

#[test]
fn add_enum_value_if_absent_adds_once() {
    let catalog = setup_catalog();
    let conn = catalog.database().connect().unwrap();

    assert!(add_enum_value_if_absent(&conn, EnumKind::Archetype, "Red-Eyes"));
    assert!(!add_enum_value_if_absent(&conn, EnumKind::Archetype, "Red-Eyes"));
    assert!(!add_enum_value_if_absent(&conn, EnumKind::Archetype, "Blue-Eyes"));
    assert!(add_enum_value_if_absent(&conn, EnumKind::Attribute, "wind"));

    let reloaded = ReferenceCache::load(&conn).unwrap();
    assert!(reloaded.enum_contains(EnumKind::Archetype, "Red-Eyes"));
    assert!(reloaded.enum_contains(EnumKind::Attribute, "WIND"));
}

#[test]
fn running_catalog_does_not_see_later_enum_values() {
    let catalog = setup_catalog();
    let conn = catalog.database().connect().unwrap();
    assert!(add_enum_value_if_absent(&conn, EnumKind::Archetype, "Red-Eyes"));

    assert!(!catalog.cache().enum_contains(EnumKind::Archetype, "Red-Eyes"));
    let params = ListCardsParams {
        filters: CardFilters {
            archetype: Some("Red-Eyes".into()),
            ..Default::default()
        },
        ..Default::default()
    };
    assert!(catalog.cards().list(&params).is_err());
}

#[test]
fn snapshot_is_not_refreshed_by_writes() {
    let catalog = setup_catalog();
    catalog
        .admin()
        .create_card(NewCard {
            card_id: 50,
            name: "Blue-Eyes Toon Dragon".into(),
            descr: "Cannot attack the turn it is Special Summoned.".into(),
            pend_descr: None,
            monster_descr: None,
            attack: Some(3000),
            defence: Some(2500),
            level: Some(8),
            archetype: Some("Blue-Eyes".into()),
            attribute: Some("LIGHT".into()),
            frametype: Some("effect".into()),
            race: Some("Dragon".into()),
            card_type: Some("Effect Monster".into()),
        })
        .unwrap();

    assert_eq!(catalog.cards().all().total, 6);
    assert_eq!(catalog.cards().list(&ListCardsParams::default()).unwrap().total, 7);
}

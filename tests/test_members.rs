//! Cards-of-a-set listing.

mod common;

use common::*;
use ygo_catalog::models::SetMember;
use ygo_catalog::{CatalogError, ListSetMembersParams, SetSelector};

fn member_ids(members: &[SetMember]) -> Vec<i64> {
    ids(members, |m| m.card_id)
}

fn select(
    card_set_id: Option<i64>,
    set_code: Option<&str>,
    set_name: Option<&str>,
) -> ListSetMembersParams {
    ListSetMembersParams {
        set: SetSelector {
            card_set_id,
            set_code: set_code.map(String::from),
            set_name: set_name.map(String::from),
        },
        ..Default::default()
    }
}

#[test]
fn a_selector_is_required() {
    let catalog = setup_catalog();
    let err = catalog
        .set_members()
        .list(&select(None, Some(""), None))
        .unwrap_err();
    assert!(matches!(err, CatalogError::MissingParameter(_)));
    assert_eq!(err.status_code(), 400);
}

#[test]
fn members_by_id_sorted_by_name() {
    let catalog = setup_catalog();
    let page = catalog.set_members().list(&select(Some(LOB), None, None)).unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(member_ids(&page.results), vec![BLUE_EYES_WHITE_DRAGON, DARK_MAGICIAN]);

    let bewd = &page.results[0];
    assert_eq!(bewd.set_code, "LOB");
    assert_eq!(bewd.num_of_prints, 2);
    assert_eq!(bewd.tcgplayer_price, Some(150));
    assert_eq!(bewd.card_type.as_deref(), Some("Normal Monster"));
}

#[test]
fn members_by_code_and_by_name() {
    let catalog = setup_catalog();

    let by_code = catalog.set_members().list(&select(None, Some("SDK"), None)).unwrap();
    assert_eq!(member_ids(&by_code.results), vec![BLUE_EYES_WHITE_DRAGON]);

    let by_name = catalog
        .set_members()
        .list(&select(None, None, Some("blue eyes")))
        .unwrap();
    assert_eq!(member_ids(&by_name.results), vec![BLUE_EYES_WHITE_DRAGON, DARK_MAGICIAN]);
}

#[test]
fn id_takes_precedence_over_code_and_name() {
    let catalog = setup_catalog();
    let page = catalog
        .set_members()
        .list(&select(Some(SDK), Some("LOB"), Some("Legend")))
        .unwrap();
    assert_eq!(member_ids(&page.results), vec![BLUE_EYES_WHITE_DRAGON]);
}

#[test]
fn members_use_the_card_sort_whitelist() {
    let catalog = setup_catalog();
    let mut p = select(Some(LOB), None, None);
    p.sort_by = Some("attack".into());
    p.sort_order = Some("asc".into());

    let page = catalog.set_members().list(&p).unwrap();
    assert_eq!(member_ids(&page.results), vec![DARK_MAGICIAN, BLUE_EYES_WHITE_DRAGON]);
}

#[test]
fn empty_set_gives_empty_envelope() {
    let catalog = setup_catalog();
    let page = catalog.set_members().list(&select(Some(MRD), None, None)).unwrap();
    assert_eq!((page.total, page.pages), (0, 0));
}

//! Pagination envelope arithmetic, page request bounds and list SQL.

use ygo_catalog::filters::Predicate;
use ygo_catalog::list::{Collection, ListRequest};
use ygo_catalog::normalize::{CardSortColumn, SetSortColumn, SortKey, SortOrder};
use ygo_catalog::sql_builder::SqlParam;
use ygo_catalog::{CatalogError, Page, PageRequest};

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

#[test]
fn page_number_and_count_follow_offset_and_total() {
    for (total, limit, offset, page, pages) in [
        (3, 2, 0, 1, 2),
        (3, 2, 2, 2, 2),
        (10, 5, 5, 2, 2),
        (11, 5, 5, 2, 3),
        (1, 999, 0, 1, 1),
        (100, 1, 42, 43, 100),
        (5, 2, 3, 2, 3),
    ] {
        let p: Page<i64> = Page::new(total, limit, offset, Vec::new());
        assert_eq!(p.page, page, "total={total} limit={limit} offset={offset}");
        assert_eq!(p.pages, pages, "total={total} limit={limit} offset={offset}");
    }
}

#[test]
fn empty_result_has_zero_pages() {
    let p: Page<i64> = Page::new(0, 64, 0, Vec::new());
    assert_eq!(p.pages, 0);
    assert_eq!(p.page, 1);
    assert!(p.results.is_empty());
}

#[test]
fn single_envelope_for_point_lookups() {
    let found = Page::single(Some("x"));
    assert_eq!((found.total, found.pages, found.results.len()), (1, 1, 1));

    let missing: Page<&str> = Page::single(None);
    assert_eq!((missing.total, missing.pages, missing.page), (0, 0, 1));
}

#[test]
fn unpaginated_envelope_uses_collection_size() {
    let p = Page::unpaginated(vec![1, 2, 3]);
    assert_eq!((p.total, p.limit, p.offset, p.page, p.pages), (3, 3, 0, 1, 1));
}

#[test]
fn envelope_serializes_all_fields() {
    let p = Page::new(3, 2, 0, vec![10, 11]);
    let json = serde_json::to_value(&p).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "total": 3,
            "limit": 2,
            "offset": 0,
            "page": 1,
            "pages": 2,
            "results": [10, 11]
        })
    );
}

// ---------------------------------------------------------------------------
// PageRequest
// ---------------------------------------------------------------------------

#[test]
fn page_request_bounds() {
    assert!(PageRequest::new(1, 0).is_ok());
    assert!(PageRequest::new(999, 10_000).is_ok());
    assert!(matches!(PageRequest::new(0, 0), Err(CatalogError::InvalidArgument(_))));
    assert!(matches!(PageRequest::new(1000, 0), Err(CatalogError::InvalidArgument(_))));
}

#[test]
fn page_request_default() {
    let p = PageRequest::default();
    assert_eq!((p.limit(), p.offset()), (64, 0));
}

// ---------------------------------------------------------------------------
// ListRequest SQL
// ---------------------------------------------------------------------------

#[test]
fn count_and_fetch_share_the_predicate() {
    let request = ListRequest::new(
        Collection::Cards,
        SortKey::Column(CardSortColumn::Attack),
        Some(SortOrder::Desc),
        false,
        Predicate::search("name", Some("dragon")),
        PageRequest::new(2, 4).unwrap(),
    );

    let (count_sql, count_params) = request.count_sql();
    assert_eq!(count_sql, "SELECT COUNT(*) AS total\nFROM cards\nWHERE name ILIKE ?");

    let (sql, params) = request.fetch_sql();
    assert_eq!(
        sql,
        "SELECT *\nFROM cards\nWHERE name ILIKE ?\nORDER BY attack DESC NULLS LAST, card_id ASC\nLIMIT 2\nOFFSET 4"
    );
    assert_eq!(params, count_params);
    assert_eq!(params, vec![SqlParam::Text("%dragon%".into())]);
}

#[test]
fn random_fetch_has_no_direction_or_tie_break() {
    let request = ListRequest::new(
        Collection::Trivia,
        SortKey::<CardSortColumn>::Random,
        None,
        false,
        Predicate::empty(),
        PageRequest::default(),
    );
    let (sql, _) = request.fetch_sql();
    assert!(sql.contains("ORDER BY RANDOM()\n"));
    assert!(!sql.contains("ASC"));
    assert!(!sql.contains("DESC"));
}

#[test]
fn collections_read_from_their_views() {
    let request = ListRequest::new(
        Collection::CardSets,
        SortKey::Column(SetSortColumn::SetName),
        Some(SortOrder::Asc),
        false,
        Predicate::empty(),
        PageRequest::default(),
    );
    let (sql, _) = request.fetch_sql();
    assert!(sql.contains("FROM card_sets_v"));
    assert!(sql.contains("ORDER BY set_name ASC NULLS LAST, card_set_id ASC"));

    assert_eq!(Collection::SetMembers.source(), "card_set_members_v");
    assert_eq!(Collection::SetMembers.tie_break(), &["card_set_id", "card_id"]);
}

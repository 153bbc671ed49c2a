//! Unit tests for the SqlBuilder query construction.

use ygo_catalog::filters::Predicate;
use ygo_catalog::sql_builder::SqlParam;
use ygo_catalog::SqlBuilder;

// ---------------------------------------------------------------------------
// Basic construction
// ---------------------------------------------------------------------------

#[test]
fn new_creates_select_star_from_table() {
    let (sql, params) = SqlBuilder::new("cards").build();
    assert_eq!(sql, "SELECT *\nFROM cards");
    assert!(params.is_empty());
}

#[test]
fn select_replaces_default_star() {
    let (sql, _) = SqlBuilder::new("cards")
        .select(&["card_id", "name"])
        .build();
    assert!(sql.starts_with("SELECT card_id, name\n"));
}

// ---------------------------------------------------------------------------
// WHERE conditions
// ---------------------------------------------------------------------------

#[test]
fn where_eq_adds_equality_with_param() {
    let (sql, params) = SqlBuilder::new("cards")
        .where_eq("archetype", "Blue-Eyes")
        .build();
    assert!(sql.contains("WHERE archetype = ?"));
    assert_eq!(params, vec![SqlParam::Text("Blue-Eyes".into())]);
}

#[test]
fn where_eq_binds_integers_as_integers() {
    let (_, params) = SqlBuilder::new("cards").where_eq("card_id", 10i64).build();
    assert_eq!(params, vec![SqlParam::Int(10)]);
}

#[test]
fn where_ilike_binds_the_pattern() {
    let (sql, params) = SqlBuilder::new("cards")
        .where_ilike("name", "%dragon%")
        .build();
    assert!(sql.contains("name ILIKE ?"));
    assert_eq!(params, vec![SqlParam::Text("%dragon%".into())]);
}

#[test]
fn where_in_adds_in_clause() {
    let ids = [SqlParam::Int(1), SqlParam::Int(2), SqlParam::Int(3)];
    let (sql, params) = SqlBuilder::new("cards").where_in("card_id", &ids).build();
    assert!(sql.contains("card_id IN (?, ?, ?)"));
    assert_eq!(params, ids.to_vec());
}

#[test]
fn where_in_empty_produces_false() {
    let (sql, params) = SqlBuilder::new("cards").where_in("card_id", &[]).build();
    assert!(sql.contains("WHERE FALSE"));
    assert!(params.is_empty());
}

#[test]
fn where_clause_appends_params_in_order() {
    let (sql, params) = SqlBuilder::new("cards")
        .where_eq("race", "Dragon")
        .where_clause("attack >= ?", vec![SqlParam::Int(2500)])
        .build();
    assert!(sql.contains("race = ?"));
    assert!(sql.contains("attack >= ?"));
    assert_eq!(
        params,
        vec![SqlParam::Text("Dragon".into()), SqlParam::Int(2500)]
    );
}

#[test]
fn where_predicate_keeps_predicate_order() {
    let predicate = Predicate::search("set_name", Some("blue"));
    let (sql, params) = SqlBuilder::new("card_sets_v")
        .where_eq("set_code", "LOB")
        .where_predicate(&predicate)
        .build();
    assert!(sql.contains("WHERE set_code = ? AND set_name ILIKE ?"));
    assert_eq!(params[1], SqlParam::Text("%blue%".into()));
}

#[test]
fn empty_predicate_adds_no_where() {
    let (sql, params) = SqlBuilder::new("cards")
        .where_predicate(&Predicate::empty())
        .build();
    assert!(!sql.contains("WHERE"));
    assert!(params.is_empty());
}

// ---------------------------------------------------------------------------
// ORDER BY / LIMIT / OFFSET
// ---------------------------------------------------------------------------

#[test]
fn order_by_adds_clause() {
    let (sql, _) = SqlBuilder::new("cards")
        .order_by(&["attack DESC NULLS LAST", "card_id ASC"])
        .build();
    assert!(sql.contains("ORDER BY attack DESC NULLS LAST, card_id ASC"));
}

#[test]
fn limit_and_offset_together() {
    let (sql, params) = SqlBuilder::new("cards").limit(10).offset(20).build();
    assert!(sql.ends_with("LIMIT 10\nOFFSET 20"));
    assert!(params.is_empty());
}

// ---------------------------------------------------------------------------
// COUNT
// ---------------------------------------------------------------------------

#[test]
fn build_count_ignores_selection_ordering_and_paging() {
    let mut qb = SqlBuilder::new("cards");
    qb.select(&["name"])
        .where_eq("archetype", "Blue-Eyes")
        .order_by(&["name ASC"])
        .limit(5)
        .offset(5);
    let (sql, params) = qb.build_count();
    assert_eq!(sql, "SELECT COUNT(*) AS total\nFROM cards\nWHERE archetype = ?");
    assert_eq!(params, vec![SqlParam::Text("Blue-Eyes".into())]);
}

// ---------------------------------------------------------------------------
// Combined / chained
// ---------------------------------------------------------------------------

#[test]
fn combined_builder_chains_correctly() {
    let (sql, params) = SqlBuilder::new("cards")
        .where_eq("archetype", "Blue-Eyes")
        .where_ilike("name", "%dragon%")
        .order_by(&["name ASC"])
        .limit(10)
        .offset(0)
        .build();

    assert_eq!(
        sql,
        "SELECT *\nFROM cards\nWHERE archetype = ? AND name ILIKE ?\nORDER BY name ASC\nLIMIT 10\nOFFSET 0"
    );
    assert_eq!(params.len(), 2);
}

#[test]
fn optional_values_bind_null() {
    let (_, params) = SqlBuilder::new("cards")
        .where_eq("archetype", Option::<String>::None)
        .build();
    assert_eq!(params, vec![SqlParam::Null]);
}

//! Card set queries.

use crate::connection::Database;
use crate::error::{CatalogError, Result};
use crate::filters::Predicate;
use crate::list::{Collection, ListRequest};
use crate::models::{CardSet, Page, PageRequest};
use crate::normalize::{normalize_card_sets_sort_by, normalize_sort_order, SortKey};
use crate::sql_builder::{SqlBuilder, SqlParam};

// ---------------------------------------------------------------------------
// ListSetsParams
// ---------------------------------------------------------------------------

/// Parameters of the set list.
///
/// `card_set_id` wins, then `set_code`; both return a single-result envelope.
/// Otherwise `search` matches set names case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct ListSetsParams {
    pub card_set_id: Option<i64>,
    pub set_code: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: PageRequest,
}

// ---------------------------------------------------------------------------
// SetQuery
// ---------------------------------------------------------------------------

/// Query interface for card sets backed by the `card_sets_v` view.
pub struct SetQuery<'a> {
    db: &'a Database,
}

impl<'a> SetQuery<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn find_one(&self, column: &str, value: SqlParam) -> Result<Option<CardSet>> {
        let conn = self.db.connect()?;
        let (sql, params) = SqlBuilder::new("card_sets_v")
            .where_eq(column, value)
            .order_by(&["card_set_id ASC"])
            .limit(1)
            .build();
        let mut rows: Vec<CardSet> = conn.execute_into(&sql, &params)?;
        Ok(rows.pop())
    }

    /// Get a set by id.
    pub fn get_by_id(&self, card_set_id: i64) -> Result<CardSet> {
        self.find_one("card_set_id", SqlParam::Int(card_set_id))?
            .ok_or_else(|| CatalogError::NotFound(format!("card set {}", card_set_id)))
    }

    /// Get a set by its exact code. Several sets may share a code; the one
    /// with the lowest id is returned.
    pub fn get_by_code(&self, set_code: &str) -> Result<CardSet> {
        self.find_one("set_code", SqlParam::from(set_code))?
            .ok_or_else(|| CatalogError::NotFound(format!("card set {}", set_code)))
    }

    /// All sets whose name contains `name` (case-insensitive), by name.
    pub fn find_by_name(&self, name: &str) -> Result<Vec<CardSet>> {
        if name.trim().is_empty() {
            return Err(CatalogError::MissingParameter("set_name".to_string()));
        }
        let conn = self.db.connect()?;
        let (sql, params) = SqlBuilder::new("card_sets_v")
            .where_ilike("set_name", &format!("%{}%", name))
            .order_by(&["set_name ASC", "card_set_id ASC"])
            .build();
        let rows: Vec<CardSet> = conn.execute_into(&sql, &params)?;
        if rows.is_empty() {
            return Err(CatalogError::NotFound(format!("card set matching {}", name)));
        }
        Ok(rows)
    }

    /// List sets as a pagination envelope.
    ///
    /// Id and code lookups that match nothing return an empty envelope.
    pub fn list(&self, params: &ListSetsParams) -> Result<Page<CardSet>> {
        if let Some(id) = params.card_set_id {
            return Ok(Page::single(
                self.find_one("card_set_id", SqlParam::Int(id))?,
            ));
        }

        if let Some(code) = params.set_code.as_deref() {
            return Ok(Page::single(
                self.find_one("set_code", SqlParam::from(code))?,
            ));
        }

        let column = normalize_card_sets_sort_by(params.sort_by.as_deref());
        let order = normalize_sort_order(params.sort_order.as_deref(), false);
        let request = ListRequest::new(
            Collection::CardSets,
            SortKey::Column(column),
            order,
            false,
            Predicate::search("set_name", params.search.as_deref()),
            params.page,
        );

        let conn = self.db.connect()?;
        request.execute(&conn)
    }

    /// Count all sets.
    pub fn count(&self) -> Result<usize> {
        let conn = self.db.connect()?;
        let (sql, params) = SqlBuilder::new("card_sets").build_count();
        conn.count(&sql, &params)
    }
}

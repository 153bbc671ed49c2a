//! Count-then-fetch execution for every paginated collection.

use serde::de::DeserializeOwned;

use crate::connection::Connection;
use crate::error::Result;
use crate::filters::Predicate;
use crate::models::{Page, PageRequest};
use crate::normalize::{Ordering, SortColumn, SortKey, SortOrder};
use crate::sql_builder::{SqlBuilder, SqlParam};

/// A paginated collection and the columns that make its rows unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Cards,
    CardSets,
    SetMembers,
    Trivia,
}

impl Collection {
    /// Table or view rows are read from.
    pub fn source(&self) -> &'static str {
        match self {
            Collection::Cards => "cards",
            Collection::CardSets => "card_sets_v",
            Collection::SetMembers => "card_set_members_v",
            Collection::Trivia => "trivias",
        }
    }

    /// Unique-identifier columns appended (ascending) after the requested sort.
    pub fn tie_break(&self) -> &'static [&'static str] {
        match self {
            Collection::Cards => &["card_id"],
            Collection::CardSets => &["card_set_id"],
            Collection::SetMembers => &["card_set_id", "card_id"],
            Collection::Trivia => &["trivia_id"],
        }
    }
}

/// Everything needed to fetch one page of a collection.
#[derive(Debug, Clone)]
pub struct ListRequest {
    pub collection: Collection,
    pub ordering: Ordering,
    pub predicate: Predicate,
    pub page: PageRequest,
}

impl ListRequest {
    pub fn new<C: SortColumn>(
        collection: Collection,
        key: SortKey<C>,
        order: Option<SortOrder>,
        nulls_first: bool,
        predicate: Predicate,
        page: PageRequest,
    ) -> Self {
        let ordering = Ordering::new(key, order, nulls_first, collection.tie_break());
        Self {
            collection,
            ordering,
            predicate,
            page,
        }
    }

    fn builder(&self) -> SqlBuilder {
        let mut qb = SqlBuilder::new(self.collection.source());
        qb.where_predicate(&self.predicate);
        qb
    }

    /// The count query: same predicate, no ordering or pagination.
    pub fn count_sql(&self) -> (String, Vec<SqlParam>) {
        self.builder().build_count()
    }

    /// The page query: predicate, ordering with tie-break, LIMIT/OFFSET.
    pub fn fetch_sql(&self) -> (String, Vec<SqlParam>) {
        let mut qb = self.builder();
        qb.order_by(&self.ordering.terms())
            .limit(self.page.limit())
            .offset(self.page.offset());
        qb.build()
    }

    /// Run the count, then the fetch, and wrap the rows in a [`Page`].
    ///
    /// The two statements are not in a shared snapshot, so under concurrent
    /// writes `total` may briefly disagree with the page contents.
    pub fn execute<T: DeserializeOwned>(&self, conn: &Connection) -> Result<Page<T>> {
        let (count_sql, count_params) = self.count_sql();
        let total = conn.count(&count_sql, &count_params)?;

        let (sql, params) = self.fetch_sql();
        let rows: Vec<T> = conn.execute_into(&sql, &params)?;

        tracing::debug!(
            collection = self.collection.source(),
            total,
            returned = rows.len(),
            "list query"
        );
        Ok(Page::new(
            total,
            self.page.limit(),
            self.page.offset(),
            rows,
        ))
    }
}

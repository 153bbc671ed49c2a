//! Card queries: filtered/sorted pages, point lookups and the snapshot path.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::cache::ReferenceCache;
use crate::connection::{Connection, Database};
use crate::error::{CatalogError, Result};
use crate::filters::{build_card_predicate, CardFilters};
use crate::list::{Collection, ListRequest};
use crate::models::{Banlist, Card, CardImage, CardPrice, CardSetPrint, Page, PageRequest, Rank};
use crate::normalize::{normalize_card_sort_by, normalize_sort_order};
use crate::sql_builder::{SqlBuilder, SqlParam};

// ---------------------------------------------------------------------------
// ListCardsParams
// ---------------------------------------------------------------------------

/// Parameters of the card list.
///
/// `all_cards` wins over everything else, then `card_id`; otherwise the
/// filters, search, sort and page apply.
#[derive(Debug, Clone, Default)]
pub struct ListCardsParams {
    pub page: PageRequest,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub null_first: bool,
    pub all_cards: bool,
    pub card_id: Option<i64>,
    pub search: Option<String>,
    pub filters: CardFilters,
}

// ---------------------------------------------------------------------------
// CardQuery
// ---------------------------------------------------------------------------

/// Query interface for cards.
pub struct CardQuery<'a> {
    db: &'a Database,
    cache: &'a ReferenceCache,
}

impl<'a> CardQuery<'a> {
    pub fn new(db: &'a Database, cache: &'a ReferenceCache) -> Self {
        Self { db, cache }
    }

    // -- Single card lookup ------------------------------------------------

    /// Retrieve a card by id, or `None`.
    pub fn find(&self, card_id: i64) -> Result<Option<Card>> {
        let conn = self.db.connect()?;
        find_card(&conn, card_id)
    }

    /// Retrieve a card by id; a missing card is [`CatalogError::NotFound`].
    pub fn get(&self, card_id: i64) -> Result<Card> {
        self.find(card_id)?
            .ok_or_else(|| CatalogError::NotFound(format!("card {}", card_id)))
    }

    // -- Listing -----------------------------------------------------------

    /// List cards as a pagination envelope.
    pub fn list(&self, params: &ListCardsParams) -> Result<Page<Card>> {
        if params.all_cards {
            return Ok(self.all());
        }

        if let Some(card_id) = params.card_id {
            return Ok(Page::single(self.find(card_id)?));
        }

        let predicate =
            build_card_predicate(&params.filters, params.search.as_deref(), self.cache)?;
        let key = normalize_card_sort_by(params.sort_by.as_deref());
        let order = normalize_sort_order(params.sort_order.as_deref(), key.is_random());
        let request = ListRequest::new(
            Collection::Cards,
            key,
            order,
            params.null_first,
            predicate,
            params.page,
        );

        let conn = self.db.connect()?;
        let mut page: Page<Card> = request.execute(&conn)?;
        hydrate_cards(&conn, &mut page.results)?;
        Ok(page)
    }

    /// The whole card collection, unpaginated, served from the startup snapshot.
    pub fn all(&self) -> Page<Card> {
        Page::unpaginated(self.cache.all_cards().to_vec())
    }

    // -- Aggregates --------------------------------------------------------

    /// Archetypes ranked by number of cards, most popular first.
    pub fn archetype_rank(&self) -> Result<Vec<Rank>> {
        let conn = self.db.connect()?;
        let sql = r#"
            SELECT
                archetype AS name,
                COUNT(*) AS total,
                ROW_NUMBER() OVER (ORDER BY COUNT(*) DESC, archetype ASC) - 1 AS position
            FROM cards
            WHERE archetype IS NOT NULL
            GROUP BY archetype
            ORDER BY total DESC, name ASC
        "#;
        conn.execute_into(sql, &[])
    }
}

pub(crate) fn find_card(conn: &Connection, card_id: i64) -> Result<Option<Card>> {
    let (sql, params) = SqlBuilder::new("cards")
        .where_eq("card_id", card_id)
        .limit(1)
        .build();
    let mut cards: Vec<Card> = conn.execute_into(&sql, &params)?;
    hydrate_cards(conn, &mut cards)?;
    Ok(cards.pop())
}

// ---------------------------------------------------------------------------
// Hydration
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct LinkmarkerRow {
    card_id: i64,
    position: String,
}

/// Fill in the associated collections of `cards`.
///
/// Each child table is read once with an `IN` over the card ids, or in full
/// when every card is being hydrated.
pub(crate) fn hydrate_cards(conn: &Connection, cards: &mut [Card]) -> Result<()> {
    if cards.is_empty() {
        return Ok(());
    }
    let ids: Vec<SqlParam> = cards.iter().map(|c| SqlParam::Int(c.card_id)).collect();
    let total: usize = conn.count("SELECT COUNT(*) AS total FROM cards", &[])?;
    let scope = if ids.len() >= total { None } else { Some(ids.as_slice()) };

    let mut sets = group_by_card(
        child_rows::<CardSetPrint>(
            conn,
            "card_set_members_v",
            &["card_id", "card_set_id", "set_name", "set_code", "num_of_prints AS num_of_cards"],
            &["set_name ASC", "card_set_id ASC"],
            scope,
        )?,
        |r| r.card_id,
    );
    let mut linkmarkers = group_by_card(
        child_rows::<LinkmarkerRow>(
            conn,
            "linkmarkers",
            &["card_id", "\"position\" AS position"],
            &["\"position\" ASC"],
            scope,
        )?,
        |r| r.card_id,
    );
    let mut banlists = group_by_card(
        child_rows::<Banlist>(
            conn,
            "banlist",
            &["card_id", "ban_org", "ban_type"],
            &["ban_org ASC", "ban_type ASC"],
            scope,
        )?,
        |r| r.card_id,
    );
    let mut images = group_by_card(
        child_rows::<CardImage>(conn, "card_images", &["*"], &[], scope)?,
        |r| r.card_id,
    );
    let mut prices = group_by_card(
        child_rows::<CardPrice>(conn, "card_prices", &["*"], &[], scope)?,
        |r| r.card_id,
    );

    for card in cards.iter_mut() {
        card.card_sets = sets.remove(&card.card_id).unwrap_or_default();
        card.linkmarkers = linkmarkers
            .remove(&card.card_id)
            .unwrap_or_default()
            .into_iter()
            .map(|l| l.position)
            .collect();
        card.banlists = banlists.remove(&card.card_id).unwrap_or_default();
        card.images = images.remove(&card.card_id).unwrap_or_default();
        card.card_prices = prices.remove(&card.card_id).unwrap_or_default();
    }
    Ok(())
}

fn child_rows<T: DeserializeOwned>(
    conn: &Connection,
    table: &str,
    select: &[&str],
    order: &[&str],
    scope: Option<&[SqlParam]>,
) -> Result<Vec<T>> {
    let mut qb = SqlBuilder::new(table);
    qb.select(select).order_by(order);
    if let Some(ids) = scope {
        qb.where_in("card_id", ids);
    }
    let (sql, params) = qb.build();
    conn.execute_into(&sql, &params)
}

fn group_by_card<T>(rows: Vec<T>, key: impl Fn(&T) -> i64) -> HashMap<i64, Vec<T>> {
    let mut grouped: HashMap<i64, Vec<T>> = HashMap::new();
    for row in rows {
        grouped.entry(key(&row)).or_default().push(row);
    }
    grouped
}

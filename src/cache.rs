//! Process-wide reference data: the enum catalog and the full card snapshot.
//!
//! Loaded once, in one blocking pass, when a [`Catalog`](crate::Catalog) is
//! opened, and immutable afterwards. Values added to the store later are not
//! visible until the next open.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::connection::Connection;
use crate::error::Result;
use crate::models::Card;
use crate::queries::cards::hydrate_cards;
use crate::sql_builder::SqlBuilder;

// ---------------------------------------------------------------------------
// EnumKind
// ---------------------------------------------------------------------------

/// The five categorical card attributes with a closed value set.
///
/// [`EnumKind::ALL`] is also the order filters are validated and bound in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumKind {
    Archetype,
    Attribute,
    Frametype,
    Race,
    Type,
}

impl EnumKind {
    pub const ALL: [EnumKind; 5] = [
        EnumKind::Archetype,
        EnumKind::Attribute,
        EnumKind::Frametype,
        EnumKind::Race,
        EnumKind::Type,
    ];

    /// Field name as exposed to clients and stored in `enum_values.enum_name`.
    pub fn name(&self) -> &'static str {
        match self {
            EnumKind::Archetype => "archetype",
            EnumKind::Attribute => "attribute",
            EnumKind::Frametype => "frametype",
            EnumKind::Race => "race",
            EnumKind::Type => "type",
        }
    }

    /// Column holding this attribute in the `cards` table.
    pub fn column(&self) -> &'static str {
        match self {
            EnumKind::Type => "\"type\"",
            other => other.name(),
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        EnumKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Canonical stored form of a value; attributes are stored upper-case.
    pub fn canonicalize(&self, value: &str) -> String {
        match self {
            EnumKind::Attribute => value.to_uppercase(),
            _ => value.to_string(),
        }
    }
}

impl fmt::Display for EnumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Default)]
struct EnumValues {
    list: Vec<String>,
    set: HashSet<String>,
}

impl EnumValues {
    fn new(list: Vec<String>) -> Self {
        let set = list.iter().cloned().collect();
        Self { list, set }
    }
}

// ---------------------------------------------------------------------------
// ReferenceCache
// ---------------------------------------------------------------------------

/// Immutable snapshot of reference data shared by every request.
#[derive(Debug)]
pub struct ReferenceCache {
    enums: HashMap<EnumKind, EnumValues>,
    cards: Vec<Card>,
}

impl ReferenceCache {
    /// Load every enum value set and the hydrated card snapshot.
    pub fn load(conn: &Connection) -> Result<Self> {
        let mut enums = HashMap::new();
        for kind in EnumKind::ALL {
            let values = load_enum_list(conn, kind)?;
            tracing::debug!(kind = kind.name(), count = values.len(), "loaded enum values");
            enums.insert(kind, EnumValues::new(values));
        }

        let (sql, params) = SqlBuilder::new("cards").order_by(&["card_id ASC"]).build();
        let mut cards: Vec<Card> = conn.execute_into(&sql, &params)?;
        hydrate_cards(conn, &mut cards)?;

        tracing::info!(cards = cards.len(), "reference cache loaded");
        Ok(Self { enums, cards })
    }

    /// Build a cache from already-known values, without touching a store.
    pub fn from_parts(
        enums: impl IntoIterator<Item = (EnumKind, Vec<String>)>,
        cards: Vec<Card>,
    ) -> Self {
        let mut map: HashMap<EnumKind, EnumValues> = enums
            .into_iter()
            .map(|(kind, values)| (kind, EnumValues::new(values)))
            .collect();
        for kind in EnumKind::ALL {
            map.entry(kind).or_default();
        }
        Self { enums: map, cards }
    }

    /// Ordered labels of one enum.
    pub fn enum_values(&self, kind: EnumKind) -> &[String] {
        self.enums
            .get(&kind)
            .map(|v| v.list.as_slice())
            .unwrap_or(&[])
    }

    pub fn enum_contains(&self, kind: EnumKind, value: &str) -> bool {
        self.enums
            .get(&kind)
            .is_some_and(|v| v.set.contains(value))
    }

    /// The card snapshot, ordered by `card_id`.
    pub fn all_cards(&self) -> &[Card] {
        &self.cards
    }
}

fn load_enum_list(conn: &Connection, kind: EnumKind) -> Result<Vec<String>> {
    let (sql, params) = SqlBuilder::new("enum_values")
        .select(&["value"])
        .where_eq("enum_name", kind.name())
        .order_by(&["value ASC"])
        .build();
    let rows = conn.execute(&sql, &params)?;
    Ok(rows
        .into_iter()
        .filter_map(|mut r| match r.remove("value") {
            Some(serde_json::Value::String(s)) => Some(s),
            _ => None,
        })
        .collect())
}

/// Extend an enum's value set in the store if `value` is not already part of it.
///
/// Used only by the offline population process. Returns `true` when a value was
/// added. Failures are rolled back and logged; they never propagate.
pub fn add_enum_value_if_absent(conn: &Connection, kind: EnumKind, value: &str) -> bool {
    let value = kind.canonicalize(value);
    let (sql, params) = SqlBuilder::new("enum_values")
        .select(&["value"])
        .where_eq("enum_name", kind.name())
        .where_eq("value", value.as_str())
        .limit(1)
        .build();

    match conn.execute(&sql, &params) {
        Ok(rows) if !rows.is_empty() => return false,
        Ok(_) => {}
        Err(e) => {
            tracing::warn!(kind = kind.name(), value = %value, error = %e, "enum lookup failed");
            return false;
        }
    }

    tracing::debug!(kind = kind.name(), value = %value, "adding enum value");
    let inserted = conn.transaction(|tx| {
        tx.execute_statement(
            "INSERT INTO enum_values (enum_name, value) VALUES (?, ?)",
            &[kind.name().into(), value.as_str().into()],
        )
    });

    match inserted {
        Ok(_) => {
            tracing::info!(kind = kind.name(), value = %value, "new enum value added");
            true
        }
        Err(e) => {
            tracing::warn!(kind = kind.name(), value = %value, error = %e, "enum value not added");
            false
        }
    }
}

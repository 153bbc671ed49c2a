//! Typed filter values and the predicate builder.
//!
//! This is the single place where client-supplied filter values become SQL:
//! each value is validated against the [`ReferenceCache`] and then travels as
//! a bound parameter. Only fixed column names reach the query text.

use crate::cache::{EnumKind, ReferenceCache};
use crate::error::{CatalogError, Result};
use crate::sql_builder::SqlParam;

// ---------------------------------------------------------------------------
// CardFilters
// ---------------------------------------------------------------------------

/// One optional value per filterable card attribute.
///
/// Empty or whitespace-only strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFilters {
    pub archetype: Option<String>,
    pub attribute: Option<String>,
    pub frametype: Option<String>,
    pub race: Option<String>,
    pub card_type: Option<String>,
}

impl CardFilters {
    pub fn get(&self, kind: EnumKind) -> Option<&str> {
        let value = match kind {
            EnumKind::Archetype => &self.archetype,
            EnumKind::Attribute => &self.attribute,
            EnumKind::Frametype => &self.frametype,
            EnumKind::Race => &self.race,
            EnumKind::Type => &self.card_type,
        };
        value.as_deref().filter(|v| !v.trim().is_empty())
    }

    pub fn is_empty(&self) -> bool {
        EnumKind::ALL.iter().all(|k| self.get(*k).is_none())
    }

    /// Validate every present value, in [`EnumKind::ALL`] order, stopping at
    /// the first one that is not in its enum's value set.
    ///
    /// Returns the canonical `(kind, value)` pairs in that same order.
    pub fn validate(&self, cache: &ReferenceCache) -> Result<Vec<(EnumKind, String)>> {
        let mut validated = Vec::new();
        for kind in EnumKind::ALL {
            if let Some(value) = validate_enum_value(cache, kind, self.get(kind))? {
                validated.push((kind, value));
            }
        }
        Ok(validated)
    }
}

/// Check one optional enum-valued field; `None` passes through.
pub fn validate_enum_value(
    cache: &ReferenceCache,
    kind: EnumKind,
    value: Option<&str>,
) -> Result<Option<String>> {
    let Some(raw) = value.filter(|v| !v.trim().is_empty()) else {
        return Ok(None);
    };
    let canonical = kind.canonicalize(raw);
    if !cache.enum_contains(kind, &canonical) {
        return Err(CatalogError::validation(kind.name(), raw));
    }
    Ok(Some(canonical))
}

// ---------------------------------------------------------------------------
// Predicate
// ---------------------------------------------------------------------------

/// A parameterized boolean condition: conditions are ANDed, and `params`
/// lines up positionally with their `?` placeholders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    conditions: Vec<String>,
    params: Vec<SqlParam>,
}

impl Predicate {
    pub fn empty() -> Self {
        Self::default()
    }

    /// `{column} = ?`
    pub(crate) fn push_eq(&mut self, column: &str, value: impl Into<SqlParam>) {
        self.conditions.push(format!("{} = ?", column));
        self.params.push(value.into());
    }

    /// `{column} ILIKE ?` bound to `%term%`.
    pub(crate) fn push_search(&mut self, column: &str, term: &str) {
        self.conditions.push(format!("{} ILIKE ?", column));
        self.params.push(SqlParam::from(format!("%{}%", term)));
    }

    /// Case-insensitive substring predicate on a single column; an absent or
    /// empty term yields the empty predicate.
    pub fn search(column: &str, term: Option<&str>) -> Self {
        let mut predicate = Self::empty();
        if let Some(term) = term.filter(|t| !t.is_empty()) {
            predicate.push_search(column, term);
        }
        predicate
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }

    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }

    /// The combined fragment (without the `WHERE` keyword), if any.
    pub fn fragment(&self) -> Option<String> {
        if self.conditions.is_empty() {
            None
        } else {
            Some(self.conditions.join(" AND "))
        }
    }
}

/// Build the card-list predicate: one equality per validated filter, then a
/// name search if `search` is present.
///
/// Fails with [`CatalogError::Validation`] on the first invalid filter; no
/// predicate is produced in that case.
pub fn build_card_predicate(
    filters: &CardFilters,
    search: Option<&str>,
    cache: &ReferenceCache,
) -> Result<Predicate> {
    let mut predicate = Predicate::empty();
    for (kind, value) in filters.validate(cache)? {
        predicate.push_eq(kind.column(), value);
    }
    if let Some(term) = search.filter(|t| !t.is_empty()) {
        predicate.push_search("name", term);
    }
    Ok(predicate)
}

//! Administrative card primitives.
//!
//! Callers are expected to have checked the admin token already; nothing here
//! looks at credentials.

use crate::cache::{EnumKind, ReferenceCache};
use crate::connection::Database;
use crate::error::{CatalogError, Result};
use crate::filters::validate_enum_value;
use crate::models::NewCard;
use crate::queries::cards::find_card;
use crate::sql_builder::SqlParam;

const INSERT_CARD: &str = r#"
INSERT INTO cards (
    card_id, name, descr, pend_descr, monster_descr, attack, defence, level,
    archetype, attribute, frametype, race, "type"
) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
ON CONFLICT DO NOTHING
"#;

/// Tables holding rows keyed by `card_id`, children first.
const CARD_TABLES: [&str; 6] = [
    "cards_in_sets",
    "card_prices",
    "linkmarkers",
    "banlist",
    "card_images",
    "cards",
];

pub struct CardAdmin<'a> {
    db: &'a Database,
    cache: &'a ReferenceCache,
}

impl<'a> CardAdmin<'a> {
    pub fn new(db: &'a Database, cache: &'a ReferenceCache) -> Self {
        Self { db, cache }
    }

    /// Insert a new card.
    ///
    /// Fails with [`CatalogError::Conflict`] if the id is taken and with
    /// [`CatalogError::Validation`] on the first enum field outside its value
    /// set. `attribute` is stored upper-case.
    pub fn create_card(&self, card: NewCard) -> Result<()> {
        let conn = self.db.connect()?;
        if find_card(&conn, card.card_id)?.is_some() {
            return Err(CatalogError::Conflict(format!(
                "card {} already exists",
                card.card_id
            )));
        }

        let archetype =
            validate_enum_value(self.cache, EnumKind::Archetype, card.archetype.as_deref())?;
        let attribute =
            validate_enum_value(self.cache, EnumKind::Attribute, card.attribute.as_deref())?;
        let frametype =
            validate_enum_value(self.cache, EnumKind::Frametype, card.frametype.as_deref())?;
        let race =
            validate_enum_value(self.cache, EnumKind::Race, card.race.as_deref())?;
        let card_type =
            validate_enum_value(self.cache, EnumKind::Type, card.card_type.as_deref())?;

        let params: Vec<SqlParam> = vec![
            card.card_id.into(),
            card.name.into(),
            card.descr.into(),
            card.pend_descr.into(),
            card.monster_descr.into(),
            card.attack.into(),
            card.defence.into(),
            card.level.into(),
            archetype.into(),
            attribute.into(),
            frametype.into(),
            race.into(),
            card_type.into(),
        ];
        let inserted = conn.execute_statement(INSERT_CARD, &params)?;
        tracing::info!(card_id = card.card_id, inserted, "card created");
        Ok(())
    }

    /// Delete a card and every row that references it. Deleting an id that
    /// does not exist is not an error; the return value says whether a card
    /// row was removed.
    pub fn delete_card(&self, card_id: i64) -> Result<bool> {
        let conn = self.db.connect()?;
        let removed = conn.transaction(|tx| {
            let mut removed = 0;
            for table in CARD_TABLES {
                removed = tx.execute_statement(
                    &format!("DELETE FROM {} WHERE card_id = ?", table),
                    &[SqlParam::Int(card_id)],
                )?;
            }
            Ok(removed)
        })?;
        tracing::info!(card_id, removed, "card deleted");
        Ok(removed > 0)
    }
}

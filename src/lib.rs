//! Read-mostly Yu-Gi-Oh! card catalog.
//!
//! Filterable, sortable, paginated queries over cards, card sets, set members
//! and trivia, stored in DuckDB. Enum values and a full card snapshot are loaded
//! once into a [`ReferenceCache`] when the catalog is opened.
//!
//! # Quick start
//!
//! ```no_run
//! use ygo_catalog::{Catalog, ListCardsParams, PageRequest};
//!
//! let catalog = Catalog::builder().build().unwrap();
//!
//! let mut params = ListCardsParams::default();
//! params.filters.archetype = Some("Blue-Eyes".into());
//! params.sort_by = Some("attack".into());
//! params.sort_order = Some("desc".into());
//! params.page = PageRequest::new(2, 0).unwrap();
//!
//! let page = catalog.cards().list(&params).unwrap();
//! println!("{} of {}", page.results.len(), page.total);
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod cache;
pub mod config;
pub mod connection;
pub mod error;
pub mod filters;
pub mod list;
pub mod models;
pub mod normalize;
pub mod populate;
pub mod queries;
pub mod schema;
pub mod sql_builder;

#[cfg(feature = "async")]
pub use async_client::AsyncCatalog;
pub use cache::{EnumKind, ReferenceCache};
pub use config::CatalogConfig;
pub use connection::{Connection, Database};
pub use error::{CatalogError, Result};
pub use filters::CardFilters;
pub use models::{Page, PageRequest, StringList};
pub use queries::{
    ListCardsParams, ListSetMembersParams, ListSetsParams, ListTriviaParams, SetSelector,
};
pub use sql_builder::SqlBuilder;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// CatalogBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and opening a [`Catalog`].
///
/// Use [`Catalog::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](CatalogBuilder::build).
pub struct CatalogBuilder {
    database_path: Option<PathBuf>,
    in_memory: bool,
    apply_schema: bool,
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self {
            database_path: None,
            in_memory: false,
            apply_schema: true,
        }
    }
}

impl CatalogBuilder {
    /// Use a specific DuckDB file.
    ///
    /// If not set, [`config::default_database_path`] is used.
    pub fn database_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.database_path = Some(path.as_ref().to_path_buf());
        self.in_memory = false;
        self
    }

    /// Use a private in-memory database instead of a file.
    pub fn in_memory(mut self) -> Self {
        self.in_memory = true;
        self
    }

    /// Take the database path from a loaded [`CatalogConfig`].
    pub fn config(self, config: &CatalogConfig) -> Self {
        self.database_path(&config.database_path)
    }

    /// Whether to create missing tables and views on open. Defaults to `true`.
    pub fn apply_schema(mut self, apply: bool) -> Self {
        self.apply_schema = apply;
        self
    }

    /// Open the database and load the reference cache.
    ///
    /// This is the single blocking initialization point; the returned catalog
    /// never reloads its cache.
    pub fn build(self) -> Result<Catalog> {
        let db = if self.in_memory {
            Database::open_in_memory()?
        } else {
            let path = self
                .database_path
                .unwrap_or_else(config::default_database_path);
            Database::open(path)?
        };

        if self.apply_schema {
            schema::apply(&db.connect()?)?;
        }
        Catalog::open(db)
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The main entry point of the catalog.
///
/// Owns the [`Database`] and the shared, immutable [`ReferenceCache`], and
/// exposes domain-specific query interfaces as lightweight borrowing wrappers.
/// `Catalog` is `Send + Sync`; each query call acquires its own connection.
pub struct Catalog {
    db: Database,
    cache: Arc<ReferenceCache>,
}

impl Catalog {
    /// Create a new builder for configuring the catalog.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Wrap an already-open database, loading the reference cache from it.
    pub fn open(db: Database) -> Result<Self> {
        let cache = {
            let conn = db.connect()?;
            ReferenceCache::load(&conn)?
        };
        Ok(Self {
            db,
            cache: Arc::new(cache),
        })
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the card query interface.
    pub fn cards(&self) -> queries::CardQuery<'_> {
        queries::CardQuery::new(&self.db, &self.cache)
    }

    /// Access the card set query interface.
    pub fn sets(&self) -> queries::SetQuery<'_> {
        queries::SetQuery::new(&self.db)
    }

    /// Access the cards-of-a-set query interface.
    pub fn set_members(&self) -> queries::SetMemberQuery<'_> {
        queries::SetMemberQuery::new(&self.db)
    }

    pub fn trivia(&self) -> queries::TriviaQuery<'_> {
        queries::TriviaQuery::new(&self.db)
    }

    /// Access the enum listings. These never touch the database.
    pub fn enums(&self) -> queries::EnumQuery<'_> {
        queries::EnumQuery::new(&self.cache)
    }

    /// Access the create/delete card primitives.
    ///
    /// Authorization is the caller's responsibility.
    pub fn admin(&self) -> queries::CardAdmin<'_> {
        queries::CardAdmin::new(&self.db, &self.cache)
    }

    // -- Accessors ---------------------------------------------------------

    /// The reference cache loaded at open time.
    pub fn cache(&self) -> &Arc<ReferenceCache> {
        &self.cache
    }

    /// Return the underlying [`Database`] for advanced usage.
    pub fn database(&self) -> &Database {
        &self.db
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let enums: Vec<String> = EnumKind::ALL
            .iter()
            .map(|k| format!("{}={}", k, self.cache.enum_values(*k).len()))
            .collect();
        write!(
            f,
            "Catalog(cards={}, enums=[{}])",
            self.cache.all_cards().len(),
            enums.join(", ")
        )
    }
}

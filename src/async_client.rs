//! Async wrapper around [`Catalog`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all catalog operations on the blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//!
//! # Example
//!
//! ```no_run
//! use ygo_catalog::{AsyncCatalog, ListCardsParams};
//!
//! #[tokio::main]
//! async fn main() {
//!     let catalog = AsyncCatalog::builder().in_memory().build().await.unwrap();
//!
//!     let page = catalog
//!         .run(|c| c.cards().list(&ListCardsParams::default()))
//!         .await
//!         .unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{CatalogError, Result};
use crate::models::{Card, Page};
use crate::queries::ListCardsParams;
use crate::Catalog;

fn join_failure(e: tokio::task::JoinError) -> CatalogError {
    tracing::error!(error = %e, "blocking catalog task failed");
    CatalogError::Internal
}

// ---------------------------------------------------------------------------
// AsyncCatalogBuilder
// ---------------------------------------------------------------------------

/// Builder for an [`AsyncCatalog`]; mirrors [`CatalogBuilder`](crate::CatalogBuilder).
#[derive(Default)]
pub struct AsyncCatalogBuilder {
    database_path: Option<PathBuf>,
    in_memory: bool,
}

impl AsyncCatalogBuilder {
    pub fn database_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.database_path = Some(path.as_ref().to_path_buf());
        self.in_memory = false;
        self
    }

    pub fn in_memory(mut self) -> Self {
        self.in_memory = true;
        self
    }

    /// Open the catalog on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncCatalog> {
        tokio::task::spawn_blocking(move || {
            let mut builder = Catalog::builder();
            if let Some(path) = self.database_path {
                builder = builder.database_path(path);
            }
            if self.in_memory {
                builder = builder.in_memory();
            }
            Ok(AsyncCatalog::from(builder.build()?))
        })
        .await
        .map_err(join_failure)?
    }
}

// ---------------------------------------------------------------------------
// AsyncCatalog
// ---------------------------------------------------------------------------

/// Async wrapper around [`Catalog`].
///
/// `Catalog` is `Sync`, so no lock is needed: every call gets a clone of the
/// `Arc` and its own database connection.
#[derive(Clone)]
pub struct AsyncCatalog {
    inner: Arc<Catalog>,
}

impl From<Catalog> for AsyncCatalog {
    fn from(catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(catalog),
        }
    }
}

impl AsyncCatalog {
    pub fn builder() -> AsyncCatalogBuilder {
        AsyncCatalogBuilder::default()
    }

    /// Run a sync catalog operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Catalog) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let catalog = self.inner.clone();
        tokio::task::spawn_blocking(move || f(&catalog))
            .await
            .map_err(join_failure)?
    }

    /// Convenience wrapper around [`CardQuery::list`](crate::queries::CardQuery::list).
    pub async fn list_cards(&self, params: ListCardsParams) -> Result<Page<Card>> {
        self.run(move |c| c.cards().list(&params)).await
    }

    /// Convenience wrapper around [`CardQuery::get`](crate::queries::CardQuery::get).
    pub async fn get_card(&self, card_id: i64) -> Result<Card> {
        self.run(move |c| c.cards().get(card_id)).await
    }

    /// The wrapped synchronous catalog.
    pub fn blocking(&self) -> &Catalog {
        &self.inner
    }
}

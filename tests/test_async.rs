//! Async wrapper dispatching to the blocking pool.

#![cfg(feature = "async")]

mod common;

use ygo_catalog::{AsyncCatalog, CatalogError, ListCardsParams};

#[tokio::test]
async fn list_and_get_run_off_the_event_loop() {
    let catalog = AsyncCatalog::from(common::setup_catalog());

    let page = catalog.list_cards(ListCardsParams::default()).await.unwrap();
    assert_eq!(page.total, 6);

    let card = catalog.get_card(common::DARK_MAGICIAN).await.unwrap();
    assert_eq!(card.name, "Dark Magician");

    let err = catalog.get_card(999).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
}

#[tokio::test]
async fn run_accepts_any_catalog_closure() {
    let catalog = AsyncCatalog::from(common::setup_catalog());
    let clone = catalog.clone();
    let ranks = clone.run(|c| c.cards().archetype_rank()).await.unwrap();
    assert_eq!(ranks[0].name, "Blue-Eyes");
    assert_eq!(catalog.blocking().sets().count().unwrap(), 3);
}

#[tokio::test]
async fn builder_opens_an_in_memory_catalog() {
    let catalog = AsyncCatalog::builder().in_memory().build().await.unwrap();
    let total = catalog.run(|c| Ok(c.cards().all().total)).await.unwrap();
    assert_eq!(total, 0);
}

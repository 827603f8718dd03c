//! Shared test utilities for the catalog store.
//!
//! Provides an isolated in-memory store per test and a random product
//! factory built on `proptest` strategies.

use crate::{
    core::ProductStore,
    entities::Category,
    errors::Result,
    models::Product,
};
use proptest::prelude::*;
use proptest::strategy::ValueTree;
use proptest::test_runner::TestRunner;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

static PRODUCT_NAMES: [&str; 11] = [
    "Hat", "Pants", "Shirt", "Apple", "Banana", "Pots", "Towels", "Ford", "Chevy", "Hammer",
    "Wrench",
];

/// Routes tracing output through the test harness, once per process.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with the product table.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Store over a fresh database, emptied before it is handed out.
pub async fn setup_test_store() -> Result<ProductStore> {
    init_test_tracing();
    let store = ProductStore::from_connection(setup_test_db().await?).await?;
    store.remove_all().await?;
    Ok(store)
}

/// Strategy producing unsaved products with two-decimal prices.
pub fn product_strategy() -> impl Strategy<Value = Product> {
    (
        prop::sample::select(PRODUCT_NAMES.to_vec()),
        "[a-z]{3,10}( [a-z]{3,10}){0,5}",
        1i64..=100_000,
        any::<bool>(),
        prop::sample::select(Category::ALL.to_vec()),
    )
        .prop_map(|(name, description, cents, available, category)| {
            Product::new(name, description, Decimal::new(cents, 2), available, category)
        })
}

/// One random, unsaved product.
pub fn product_factory() -> Product {
    product_batch(1).remove(0)
}

/// `count` random, unsaved products.
#[allow(clippy::unwrap_used)]
pub fn product_batch(count: usize) -> Vec<Product> {
    let mut runner = TestRunner::default();
    let strategy = product_strategy();
    (0..count)
        .map(|_| strategy.new_tree(&mut runner).unwrap().current())
        .collect()
}

/// Inserts `count` random products and returns them with their ids set.
pub async fn create_products(store: &ProductStore, count: usize) -> Result<Vec<Product>> {
    let mut products = product_batch(count);
    for product in &mut products {
        store.create(product).await?;
    }
    Ok(products)
}

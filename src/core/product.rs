//! Product store - persistence and lookup for catalog products.
//!
//! [`ProductStore`] wraps the database connection handed over by the
//! application. Every call is a single round-trip; nothing is cached between
//! calls. Filtered lookups return a [`ProductQuery`] that does not touch the
//! database until it is consumed.

use crate::{
    config::{AppConfig, database},
    entities::{Category, ProductColumn, ProductEntity, column_price, product::ActiveModel},
    errors::{Error, Result},
    models::{Price, Product, check_price},
};
use futures::{Stream, StreamExt};
use sea_orm::{
    ActiveValue::{NotSet, Set, Unchanged},
    PaginatorTrait, Select, TransactionTrait,
    prelude::*,
};
use tracing::{debug, info, instrument};

/// Handle to the product table
#[derive(Debug)]
pub struct ProductStore {
    db: DatabaseConnection,
}

/// A filtered product lookup that has not run yet.
///
/// Consume it with [`ProductQuery::all`], [`ProductQuery::count`] or
/// [`ProductQuery::stream`].
#[derive(Debug)]
#[must_use = "a query does nothing until it is consumed"]
pub struct ProductQuery<'db> {
    db: &'db DatabaseConnection,
    select: Select<ProductEntity>,
}

impl<'db> ProductQuery<'db> {
    const fn new(db: &'db DatabaseConnection, select: Select<ProductEntity>) -> Self {
        Self { db, select }
    }

    /// Runs the query and collects every matching product.
    pub async fn all(self) -> Result<Vec<Product>> {
        let rows = self.select.all(self.db).await?;
        debug!("Query matched {} products", rows.len());
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Counts matching products without loading them.
    pub async fn count(self) -> Result<u64> {
        self.select.count(self.db).await.map_err(Into::into)
    }

    /// Runs the query and yields matching products one row at a time.
    pub async fn stream(self) -> Result<impl Stream<Item = Result<Product>> + Send + 'db> {
        let rows = self.select.stream(self.db).await?;
        Ok(rows.map(|row| row.map(Product::from).map_err(Error::from)))
    }
}

impl ProductStore {
    /// Connects to the configured database and ensures the product table
    /// exists. Safe to call repeatedly against the same database.
    ///
    /// # Errors
    /// Returns an error if the connection or the schema setup fails.
    #[instrument(skip(config))]
    pub async fn init_db(config: &AppConfig) -> Result<Self> {
        info!("Initializing product store");
        let db = database::create_connection(&config.database.url).await?;
        Self::from_connection(db).await
    }

    /// Wraps an already-open connection, ensuring the product table exists.
    ///
    /// # Errors
    /// Returns an error if the schema setup fails.
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        database::create_tables(&db).await?;
        Ok(Self { db })
    }

    /// The underlying connection
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Inserts `product` as a new row and assigns the generated id to it.
    ///
    /// The insert runs in its own transaction; if it fails the transaction is
    /// rolled back before the error is returned. No field other than `id` is
    /// modified on the caller's value.
    ///
    /// # Errors
    /// Returns [`Error::DataValidation`] if the product already has an id, its
    /// name is empty or its price does not fit the price column, and a
    /// database error if the insert fails.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn create(&self, product: &mut Product) -> Result<()> {
        if let Some(id) = product.id {
            return Err(Error::validation(format!(
                "Create called on a product that already has id {id}"
            )));
        }
        if product.name.trim().is_empty() {
            return Err(Error::validation("Invalid product: name must not be empty"));
        }

        let model = to_active_model(product)?;

        // dropping an uncommitted transaction rolls it back
        let txn = self.db.begin().await?;
        let row = model.insert(&txn).await?;
        txn.commit().await?;

        product.id = Some(row.id);
        info!(id = row.id, "Created product");
        Ok(())
    }

    /// Overwrites the stored row with the product's current values.
    ///
    /// # Errors
    /// Returns [`Error::DataValidation`] without touching the database if the
    /// product has no id or its price does not fit the price column, and a
    /// database error if the row cannot be updated.
    #[instrument(skip(self, product), fields(id = ?product.id))]
    pub async fn update(&self, product: &Product) -> Result<()> {
        let Some(id) = product.id else {
            return Err(Error::validation("Update called with empty ID field"));
        };

        ActiveModel {
            id: Unchanged(id),
            ..to_active_model(product)?
        }
        .update(&self.db)
        .await?;
        info!(id, "Updated product");
        Ok(())
    }

    /// Removes the stored row for `product`.
    ///
    /// # Errors
    /// Returns [`Error::DataValidation`] without touching the database if the
    /// product has no id, and a database error if the delete fails.
    #[instrument(skip(self, product), fields(id = ?product.id))]
    pub async fn delete(&self, product: &Product) -> Result<()> {
        let Some(id) = product.id else {
            return Err(Error::validation("Delete called with empty ID field"));
        };

        let result = ProductEntity::delete_by_id(id).exec(&self.db).await?;
        info!(id, rows = result.rows_affected, "Deleted product");
        Ok(())
    }

    /// Every stored product.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    #[instrument(skip(self))]
    pub async fn all(&self) -> Result<Vec<Product>> {
        ProductQuery::new(&self.db, ProductEntity::find()).all().await
    }

    /// The product with the given id, or `None` if there is none.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    #[instrument(skip(self))]
    pub async fn find(&self, id: i64) -> Result<Option<Product>> {
        let found = ProductEntity::find_by_id(id).one(&self.db).await?;
        debug!(found = found.is_some(), "Looked up product by id");
        Ok(found.map(Product::from))
    }

    /// Products whose name is exactly `name`.
    #[instrument(skip(self))]
    pub fn find_by_name(&self, name: &str) -> ProductQuery<'_> {
        debug!(name, "Querying products by name");
        ProductQuery::new(
            &self.db,
            ProductEntity::find().filter(ProductColumn::Name.eq(name)),
        )
    }

    /// Products with the given availability.
    #[instrument(skip(self))]
    pub fn find_by_availability(&self, available: bool) -> ProductQuery<'_> {
        debug!(available, "Querying products by availability");
        ProductQuery::new(
            &self.db,
            ProductEntity::find().filter(ProductColumn::Available.eq(available)),
        )
    }

    /// Products in the given category.
    #[instrument(skip(self))]
    pub fn find_by_category(&self, category: Category) -> ProductQuery<'_> {
        debug!(%category, "Querying products by category");
        ProductQuery::new(
            &self.db,
            ProductEntity::find().filter(ProductColumn::Category.eq(category)),
        )
    }

    /// Products whose stored price equals `price`.
    ///
    /// Numbers and numeric strings (optionally wrapped in spaces or double
    /// quotes) normalise to the same decimal, so `12.50` and `"12.50"` find
    /// the same rows.
    ///
    /// # Errors
    /// Returns [`Error::DataValidation`] if `price` is not a number; no query
    /// is built in that case.
    pub fn find_by_price(&self, price: impl Into<Price>) -> Result<ProductQuery<'_>> {
        let price = price.into().to_decimal()?;
        debug!(%price, "Querying products by price");
        Ok(ProductQuery::new(
            &self.db,
            ProductEntity::find().filter(ProductColumn::Price.eq(price)),
        ))
    }

    /// Number of stored products.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn count(&self) -> Result<u64> {
        ProductQuery::new(&self.db, ProductEntity::find()).count().await
    }

    /// Deletes every stored product, returning how many rows were removed.
    ///
    /// # Errors
    /// Returns an error if the delete fails.
    #[instrument(skip(self))]
    pub async fn remove_all(&self) -> Result<u64> {
        let result = ProductEntity::delete_many().exec(&self.db).await?;
        info!(rows = result.rows_affected, "Removed all products");
        Ok(result.rows_affected)
    }
}

fn to_active_model(product: &Product) -> Result<ActiveModel> {
    let price = check_price(product.price)?;
    Ok(ActiveModel {
        id: NotSet,
        name: Set(product.name.clone()),
        description: Set(product.description.clone()),
        price: Set(column_price(price)),
        available: Set(product.available),
        category: Set(product.category),
    })
}

//! Entity module - SeaORM entity definitions for the catalog database.
//! The product table is the only table; its category column is backed by
//! the [`Category`] active enum.

pub mod category;
pub mod product;

pub use category::Category;
pub use product::{
    Column as ProductColumn, Entity as ProductEntity, Model as ProductModel, PRICE_PRECISION,
    PRICE_SCALE, column_price, fits_price_column,
};

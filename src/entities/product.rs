//! Product entity - one row per catalog product.
//!
//! The price column is a fixed-scale decimal; values are rounded to
//! [`PRICE_SCALE`] places before they are written and must fit in
//! [`PRICE_PRECISION`] digits.

use super::category::Category;
use rust_decimal::RoundingStrategy;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Total number of digits the price column holds
pub const PRICE_PRECISION: u32 = 14;

/// Number of decimal places kept for prices
pub const PRICE_SCALE: u32 = 2;

/// `price` rounded half away from zero to the column scale.
#[must_use]
pub fn column_price(price: Decimal) -> Decimal {
    price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Whether `price` fits the column once rounded to its scale.
#[must_use]
pub fn fits_price_column(price: Decimal) -> bool {
    let limit = Decimal::from(10_i64.pow(PRICE_PRECISION - PRICE_SCALE));
    column_price(price).abs() < limit
}

/// Product database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Generated by the database on insert
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Fedora")
    pub name: String,
    /// Free text, may be empty
    pub description: String,
    /// Unit price
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub price: Decimal,
    /// Whether the product can currently be ordered
    pub available: bool,
    /// Catalog category, stored by name
    pub category: Category,
}

/// The product table has no relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

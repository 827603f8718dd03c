//! Domain types for the product catalog.
//!
//! [`Product`] is the in-memory entity handed to and returned from the store.
//! Its id stays `None` until the store has inserted it. [`ProductInput`] is the
//! typed shape accepted from callers (request bodies) and [`ProductPayload`] is
//! the shape handed back out.

use crate::entities::{Category, PRICE_PRECISION, PRICE_SCALE, ProductModel, fits_price_column};
use crate::errors::{Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A catalog product
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Product {
    /// Assigned by the store on create, `None` before that
    pub id: Option<i64>,
    /// Display name, must not be empty
    pub name: String,
    /// Free text, may be empty
    pub description: String,
    /// Unit price
    pub price: Decimal,
    /// Whether the product can currently be ordered
    pub available: bool,
    /// Catalog category
    pub category: Category,
}

impl Product {
    /// Builds a product that has not been persisted yet.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
        available: bool,
        category: Category,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            price,
            available,
            category,
        }
    }

    /// Builds an unsaved product from caller input.
    ///
    /// # Errors
    /// Same conditions as [`Product::deserialize`].
    pub fn from_input(input: ProductInput) -> Result<Self> {
        let mut product = Self::default();
        product.deserialize(input)?;
        Ok(product)
    }

    /// Renders the product in its caller-facing shape.
    #[must_use]
    pub fn serialize(&self) -> ProductPayload {
        ProductPayload {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            available: self.available,
            category: self.category,
        }
    }

    /// Replaces every field except `id` with the values from `input`.
    ///
    /// All conversions are checked before anything is assigned, so a rejected
    /// input leaves the product untouched.
    ///
    /// # Errors
    /// Returns [`Error::DataValidation`] if the name is empty, the price does
    /// not parse as a number, or the category is not a known member.
    pub fn deserialize(&mut self, input: ProductInput) -> Result<&mut Self> {
        if input.name.trim().is_empty() {
            return Err(Error::validation("Invalid product: name must not be empty"));
        }
        let price = input.price.to_decimal()?;
        let category = input.category.parse::<Category>()?;

        self.name = input.name;
        self.description = input.description;
        self.price = price;
        self.available = input.available;
        self.category = category;
        Ok(self)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "<Product {} id=[{id}]>", self.name),
            None => write!(f, "<Product {} id=[None]>", self.name),
        }
    }
}

impl From<ProductModel> for Product {
    fn from(model: ProductModel) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
            description: model.description,
            price: model.price,
            available: model.available,
            category: model.category,
        }
    }
}

/// A price as supplied by a caller: either an exact number or text that
/// should parse as one.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Price {
    /// Already numeric
    Exact(Decimal),
    /// Numeric text, possibly wrapped in spaces or double quotes
    Text(String),
}

impl Price {
    /// Normalises the price to a decimal.
    ///
    /// # Errors
    /// Returns [`Error::DataValidation`] when the text is not a number or the
    /// value does not fit the price column.
    pub fn to_decimal(&self) -> Result<Decimal> {
        let value = match self {
            Self::Exact(value) => *value,
            Self::Text(raw) => {
                let text = raw.trim_matches(|c: char| c == ' ' || c == '"');
                text.parse::<Decimal>()
                    .or_else(|_| Decimal::from_scientific(text))
                    .map_err(|_| Error::validation(format!("Invalid price: '{raw}' is not a number")))?
            }
        };
        check_price(value)
    }
}

/// Rejects prices the `DECIMAL(14, 2)` column cannot hold exactly.
///
/// # Errors
/// Returns [`Error::DataValidation`] naming the price when it is out of range.
pub(crate) fn check_price(price: Decimal) -> Result<Decimal> {
    if fits_price_column(price) {
        Ok(price)
    } else {
        Err(Error::validation(format!(
            "Invalid price: {price} does not fit in {PRICE_PRECISION} digits with {PRICE_SCALE} decimals"
        )))
    }
}

impl From<Decimal> for Price {
    fn from(value: Decimal) -> Self {
        Self::Exact(value)
    }
}

impl From<f64> for Price {
    fn from(value: f64) -> Self {
        // NaN and infinities keep their text form and fail in `to_decimal`
        Decimal::try_from(value).map_or_else(|_| Self::Text(value.to_string()), Self::Exact)
    }
}

impl From<i64> for Price {
    fn from(value: i64) -> Self {
        Self::Exact(Decimal::from(value))
    }
}

impl From<&str> for Price {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Price {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Caller input used to populate a [`Product`].
///
/// Every field is required. `price` may be given as a JSON number or a
/// numeric string; `category` is the upper-case category name.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ProductInput {
    /// Display name
    pub name: String,
    /// Free text
    pub description: String,
    /// Unit price
    pub price: Price,
    /// Availability flag, must be a real boolean
    pub available: bool,
    /// Category name, e.g. `"CLOTHS"`
    pub category: String,
}

impl ProductInput {
    /// Decodes an untyped JSON value.
    ///
    /// # Errors
    /// Returns [`Error::DataValidation`] naming the missing key or the field
    /// with the wrong type.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| Error::validation(format!("Invalid product: {e}")))
    }

    /// Decodes a JSON request body.
    ///
    /// # Errors
    /// Returns [`Error::DataValidation`] for malformed JSON, a missing key or
    /// a field with the wrong type.
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| Error::validation(format!("Invalid product: {e}")))
    }
}

impl From<ProductPayload> for ProductInput {
    fn from(payload: ProductPayload) -> Self {
        Self {
            name: payload.name,
            description: payload.description,
            price: Price::Exact(payload.price),
            available: payload.available,
            category: payload.category.to_string(),
        }
    }
}

/// Caller-facing rendering of a [`Product`].
///
/// The price serializes as a decimal string (`"12.50"`) and the category as
/// its name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPayload {
    /// `None` for products that were never saved
    pub id: Option<i64>,
    /// Display name
    pub name: String,
    /// Free text
    pub description: String,
    /// Unit price
    pub price: Decimal,
    /// Availability flag
    pub available: bool,
    /// Catalog category
    pub category: Category,
}

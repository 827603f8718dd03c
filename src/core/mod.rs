//! Core catalog logic - framework-agnostic product persistence.

/// Product store: CRUD and filtered lookups
pub mod product;

pub use product::{ProductQuery, ProductStore};

//! Product category - closed set of catalog categories.
//!
//! Stored in the `category` column as the upper-case member name, which is
//! also the form used in serialized payloads.

use crate::errors::{Error, Result};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Category a product is filed under
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    /// Not yet categorised
    #[default]
    #[sea_orm(string_value = "UNKNOWN")]
    Unknown,
    /// Clothing and accessories
    #[sea_orm(string_value = "CLOTHS")]
    Cloths,
    /// Groceries
    #[sea_orm(string_value = "FOOD")]
    Food,
    /// Kitchen and household goods
    #[sea_orm(string_value = "HOUSEWARES")]
    Housewares,
    /// Vehicles and parts
    #[sea_orm(string_value = "AUTOMOTIVE")]
    Automotive,
    /// Hand and power tools
    #[sea_orm(string_value = "TOOLS")]
    Tools,
}

impl Category {
    /// Every category, in declaration order
    pub const ALL: [Self; 6] = [
        Self::Unknown,
        Self::Cloths,
        Self::Food,
        Self::Housewares,
        Self::Automotive,
        Self::Tools,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_value())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        Self::try_from_value(&name.to_string())
            .map_err(|_| Error::validation(format!("Invalid attribute: unknown category '{name}'")))
    }
}

//! Unified error type for the catalog store.
//!
//! Validation failures raised by the store itself are reported as
//! [`Error::DataValidation`]; failures coming from the database are passed
//! through untouched as [`Error::Database`].

use thiserror::Error;

/// Errors produced by the product store and its configuration layer.
#[derive(Debug, Error)]
pub enum Error {
    /// Input or in-memory state rejected before reaching the database
    #[error("Data validation error: {message}")]
    DataValidation {
        /// Human-readable reason, including the offending field where known
        message: String,
    },

    /// Error reported by the backing store
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    /// Unreadable or malformed configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading the configuration
        message: String,
    },
}

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

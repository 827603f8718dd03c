//! Application configuration.
//!
//! Settings come from an optional `config.toml` and can be overridden from the
//! environment (`DATABASE_URI`, falling back to `DATABASE_URL`).

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Database configuration and connection management
pub mod database;

/// Default configuration file looked up by [`load_app_configuration`]
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Top-level configuration, mirroring the layout of `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Database settings (`[database]`)
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging settings (`[logging]`)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the product table lives
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfig {
    /// SeaORM connection string
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

/// Diagnostics settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_database_url() -> String {
    "sqlite://catalog.sqlite?mode=rwc".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Configuration pointing at the given database, everything else default.
    #[must_use]
    pub fn with_database_url(url: impl Into<String>) -> Self {
        Self {
            database: DatabaseConfig { url: url.into() },
            logging: LoggingConfig::default(),
        }
    }

    /// Applies environment overrides using `lookup` to read variables.
    #[must_use]
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URI").or_else(|| lookup("DATABASE_URL")) {
            debug!("Database URL overridden from environment");
            self.database.url = url;
        }
        self
    }
}

/// Loads configuration from a TOML file.
///
/// # Errors
/// Returns [`Error::Config`] if the file cannot be read or is not valid TOML.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.as_ref().display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path.as_ref().display()),
    })
}

/// Loads `config.toml` when present, otherwise defaults, then applies
/// environment overrides.
///
/// # Errors
/// Returns [`Error::Config`] if `config.toml` exists but cannot be parsed.
pub fn load_app_configuration() -> Result<AppConfig> {
    let config = if Path::new(DEFAULT_CONFIG_PATH).exists() {
        info!("Loading configuration from {DEFAULT_CONFIG_PATH}");
        load_config(DEFAULT_CONFIG_PATH)?
    } else {
        info!("No {DEFAULT_CONFIG_PATH} found, using defaults");
        AppConfig::default()
    };
    Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [database]
            url = "sqlite::memory:"

            [logging]
            level = "debug"
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.logging.level, "info");
        assert!(config.database.url.starts_with("sqlite://"));
    }

    #[test]
    fn test_env_override_prefers_database_uri() {
        let config = AppConfig::default().with_env_overrides(|key| match key {
            "DATABASE_URI" => Some("sqlite::memory:".to_string()),
            "DATABASE_URL" => Some("sqlite://other.sqlite".to_string()),
            _ => None,
        });
        assert_eq!(config.database.url, "sqlite::memory:");

        let fallback = AppConfig::default().with_env_overrides(|key| {
            (key == "DATABASE_URL").then(|| "sqlite://other.sqlite".to_string())
        });
        assert_eq!(fallback.database.url, "sqlite://other.sqlite");

        let untouched = AppConfig::default().with_env_overrides(|_| None);
        assert_eq!(untouched, AppConfig::default());
    }

    #[test]
    fn test_load_config_reports_missing_file() {
        let result = load_config("does/not/exist.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}

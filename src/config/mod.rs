//! Application configuration loaded from the environment and config.toml.

use crate::errors::{Error, Result};

/// Database configuration and connection management
pub mod database;

/// Menu seed configuration loading from config.toml
pub mod menu;

/// Runtime settings read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Connection URL for the backing database
    pub database_url: String,
    /// Page size used when a listing request names none
    pub default_page_size: u64,
}

impl AppConfig {
    /// Loads settings from the environment, falling back to defaults.
    ///
    /// `DATABASE_URL` defaults to a local `SQLite` file and
    /// `DEFAULT_PAGE_SIZE` to 2. A page size that is not a positive
    /// integer is a configuration error.
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://data/brigade.sqlite?mode=rwc".to_string());

        let default_page_size = match std::env::var("DEFAULT_PAGE_SIZE") {
            Ok(raw) => raw.parse::<u64>().map_err(|e| Error::Config {
                message: format!("Failed to parse DEFAULT_PAGE_SIZE '{raw}': {e}"),
            })?,
            Err(_) => 2,
        };
        if default_page_size == 0 {
            return Err(Error::Config {
                message: "DEFAULT_PAGE_SIZE must be at least 1".to_string(),
            });
        }

        Ok(Self {
            database_url,
            default_page_size,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_defaults_apply_without_env() {
        // Assumes the test environment leaves these vars unset
        if std::env::var("DATABASE_URL").is_err() && std::env::var("DEFAULT_PAGE_SIZE").is_err() {
            let config = AppConfig::from_env().unwrap();
            assert_eq!(config.default_page_size, 2);
            assert!(config.database_url.starts_with("sqlite://"));
        }
    }
}

//! # quire-config
//!
//! Layered configuration loading for Quire using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`QUIRE_*` prefix, `__` as separator)
//! 2. Project-level `.quire/config.toml`
//! 3. User-level `~/.config/quire/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `QUIRE_DATABASE__PATH` -> `database.path`,
//! `QUIRE_SEARCH__MAX_PAGE_SIZE` -> `search.max_page_size`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use quire_config::QuireConfig;
//!
//! let config = QuireConfig::load_with_dotenv().expect("config");
//! println!("database: {}", config.database.path.display());
//! ```

mod dashboard;
mod database;
mod error;
mod search;

pub use dashboard::DashboardConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use search::SearchConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "QUIRE_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct QuireConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

impl QuireConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source fails to parse, or
    /// [`ConfigError::InvalidValue`] when the merged values are inconsistent.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".quire/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Cross-field checks figment cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.database.validate()?;
        self.search.validate()?;
        self.dashboard.validate()
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("quire").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = QuireConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.search.default_page_size, 20);
        assert_eq!(config.dashboard.activity_days, 30);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config = QuireConfig::load().expect("should extract defaults");
            assert_eq!(config.database.path, PathBuf::from(".quire/quire.db"));
            assert_eq!(config.search.max_page_size, 100);
            Ok(())
        });
    }
}

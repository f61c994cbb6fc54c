//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CLAVISNOVA` prefix and nested values use double underscores as separators.
//!
//! The configuration is constructed once at process start and passed by
//! reference into each component's constructor. The only environment state
//! read at call time is the Gateway's routing flag, which is modeled as an
//! injected accessor in [`crate::ports::RoutingFlag`].
//!
//! # Example
//!
//! ```no_run
//! use clavisnova::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod remote;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use remote::RemoteStoreConfig;

use serde::Deserialize;

/// Root application configuration.
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Local store configuration (SQLite connection).
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Remote table-store configuration (Supabase REST).
    #[serde(default)]
    pub remote: RemoteStoreConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `CLAVISNOVA` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CLAVISNOVA__DATABASE__URL=sqlite://data/clavisnova.db`
    /// - `CLAVISNOVA__REMOTE__URL=https://xyz.supabase.co`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CLAVISNOVA")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.database.validate()?;
        self.remote.validate()?;
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            remote: RemoteStoreConfig::default(),
        }
    }
}

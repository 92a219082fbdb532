//! Application configuration module
//!
//! Configuration is loaded from environment variables with the
//! `ASSISTANT_ENGINE` prefix; nested values use double underscores. Every
//! value has a default, so an empty environment yields a runnable grocery
//! assistant reading `catalog.json` and writing `orders.json`.
//!
//! # Example
//!
//! ```no_run
//! use assistant_engine::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Serving the {} assistant", config.runtime.assistant);
//! ```

mod catalog;
mod error;
mod ledger;
mod runtime;

pub use catalog::CatalogConfig;
pub use error::{ConfigError, ValidationError};
pub use ledger::{LedgerConfig, MAX_WRITE_TIMEOUT_MS};
pub use runtime::{LogFormat, RuntimeConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Assistant variant and logging
    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Catalog source
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Order ledger storage
    #[serde(default)]
    pub ledger: LedgerConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `ASSISTANT_ENGINE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `ASSISTANT_ENGINE__RUNTIME__ASSISTANT=shop` -> `runtime.assistant = shop`
    /// - `ASSISTANT_ENGINE__LEDGER__PATH=/var/lib/orders.json` -> `ledger.path = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ASSISTANT_ENGINE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.runtime.validate()?;
        self.catalog.validate()?;
        self.ledger.validate()?;
        Ok(())
    }
}

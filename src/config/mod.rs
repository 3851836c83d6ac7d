//! Application configuration module.
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `PRICELENS`
//! prefix and nested keys use double underscores as separators:
//!
//! - `PRICELENS__ENGINE__INFERENCE_TIMEOUT_SECS=20`
//! - `PRICELENS__ENGINE__ELASTICITY_TABLE_PATH=/etc/pricelens/table.yaml`

mod elasticity;
mod engine;
mod error;

pub use elasticity::{load_elasticity_table, parse_table};
pub use engine::EngineConfig;
pub use error::{ConfigError, ValidationError};

use serde::Deserialize;
use std::sync::Arc;

use crate::domain::elasticity::ElasticityConfig;

/// Root application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Decision engine configuration.
    #[serde(default)]
    pub engine: EngineConfig,
}

impl AppConfig {
    /// Loads configuration from environment variables.
    ///
    /// Reads a `.env` file first when present (development convenience),
    /// then environment variables with the `PRICELENS` prefix.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PRICELENS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.engine.validate()
    }

    /// Loads the elasticity table this configuration points at.
    pub fn elasticity_table(&self) -> Result<Arc<ElasticityConfig>, ConfigError> {
        load_elasticity_table(self.engine.elasticity_table_path.as_deref())
    }
}

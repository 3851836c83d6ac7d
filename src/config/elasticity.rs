//! Elasticity table loading.

use std::path::Path;
use std::sync::Arc;

use crate::domain::elasticity::ElasticityConfig;

use super::error::ConfigError;

/// Loads the elasticity table, falling back to the embedded default.
///
/// A configured table that fails to read, parse, or validate is an operator
/// error; it never silently falls back.
pub fn load_elasticity_table(path: Option<&str>) -> Result<Arc<ElasticityConfig>, ConfigError> {
    match path {
        None => Ok(ElasticityConfig::shared_default()),
        Some(path) => {
            let table = parse_table(&std::fs::read_to_string(Path::new(path))?)?;
            Ok(Arc::new(table))
        }
    }
}

/// Parses and validates a YAML elasticity table.
pub fn parse_table(yaml: &str) -> Result<ElasticityConfig, ConfigError> {
    let table: ElasticityConfig = serde_yaml::from_str(yaml)?;
    table
        .validate()
        .map_err(|err| ConfigError::TableInvalid(err.message().to_string()))?;
    Ok(table)
}

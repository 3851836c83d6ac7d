//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Could not read elasticity table: {0}")]
    TableIo(#[from] std::io::Error),

    #[error("Could not parse elasticity table: {0}")]
    TableParse(#[from] serde_yaml::Error),

    #[error("Elasticity table rejected: {0}")]
    TableInvalid(String),
}

/// Errors that can occur during configuration validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Inference timeout must be positive")]
    InvalidInferenceTimeout,

    #[error("Elasticity table path is empty")]
    EmptyTablePath,
}

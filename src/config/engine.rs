//! Engine configuration.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

fn default_inference_timeout() -> u64 {
    30
}

/// Decision engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Upper bound for any single inference call, in seconds.
    #[serde(default = "default_inference_timeout")]
    pub inference_timeout_secs: u64,

    /// Optional path to a YAML elasticity table; the embedded default is
    /// used when absent.
    pub elasticity_table_path: Option<String>,
}

impl EngineConfig {
    /// Inference timeout as a Duration.
    pub fn inference_timeout(&self) -> Duration {
        Duration::from_secs(self.inference_timeout_secs)
    }

    /// Validates engine configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.inference_timeout_secs == 0 {
            return Err(ValidationError::InvalidInferenceTimeout);
        }
        if let Some(path) = &self.elasticity_table_path {
            if path.trim().is_empty() {
                return Err(ValidationError::EmptyTablePath);
            }
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            inference_timeout_secs: default_inference_timeout(),
            elasticity_table_path: None,
        }
    }
}

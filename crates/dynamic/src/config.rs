use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ConstructionError;

/// Names the stages of a pipeline, in order.
///
/// A config only describes a chain; pass it to
/// [`Registry::assemble`](crate::Registry::assemble) to build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    pub name: String,
    pub stages: Vec<String>,
}

/// Errors that can occur when reading a [`PipelineConfig`] or assembling the
/// pipeline it names.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid TOML pipeline config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON pipeline config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML pipeline config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

impl PipelineConfig {
    /// Parses a config from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if `text` is not a valid config.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Parses a config from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if `text` is not a valid config.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parses a config from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if `text` is not a valid config.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }
}

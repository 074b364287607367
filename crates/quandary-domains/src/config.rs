use std::{fs, path::Path};

use quandary_core::ModelError;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
/// Error type for loading and validating domain configuration.
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid domain config: {0}")]
    Invalid(String),

    #[error("failed to assemble domain: {0}")]
    Model(#[from] ModelError),
}

/// Shared YAML loading for the domain configs.
pub trait YamlConfig: DeserializeOwned {
    /// YAML text bundled with this crate.
    fn default_yaml() -> &'static str;

    fn validate(&self) -> Result<(), ConfigError>;

    /// Parse a config from YAML text.
    fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a config from a YAML file path.
    fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Parse the default YAML config included with this crate.
    fn from_default_yaml() -> Result<Self, ConfigError> {
        Self::from_yaml_str(Self::default_yaml())
    }
}

pub(crate) fn check_probability(name: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::Invalid(format!(
            "{name} must be a probability in [0, 1], got {value}"
        )));
    }
    Ok(())
}

pub(crate) fn check_finite(name: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::Invalid(format!(
            "{name} must be finite, got {value}"
        )));
    }
    Ok(())
}

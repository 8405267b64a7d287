//! Configuration management for the connector
//!
//! This module handles loading, validation, and management of the connector
//! configuration. Sources are layered: defaults, then a YAML file, then
//! environment variables, then command-line flags.

pub mod loader;
pub mod models;
pub mod validation;

pub use loader::ConfigOverrides;
pub use models::*;
pub use validation::Validate;

use crate::utils::error::{ConnectorError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the connector
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Connector configuration
    pub connector: ConnectorConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::parse_file(path).await?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Self::default();
        config.apply(ConfigOverrides::from_env()?);
        config.validate()?;
        Ok(config)
    }

    /// Layer an optional file, the environment and `overrides` (highest
    /// precedence) over the defaults, then validate the result
    pub async fn load(path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::parse_file(path).await?,
            None => Self::default(),
        };
        config.apply(ConfigOverrides::from_env()?.merge(overrides));
        config.validate()?;
        Ok(config)
    }

    async fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ConnectorError::Config(format!("Failed to read config file: {}", e)))?;

        let connector: ConnectorConfig = serde_yaml::from_str(&content)?;

        Ok(Self { connector })
    }

    /// Apply overrides; fields left unset keep their current value
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        overrides.apply_to(&mut self.connector);
    }

    /// Get connector configuration
    pub fn connector(&self) -> &ConnectorConfig {
        &self.connector
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        Validate::validate(&self.connector)
            .map_err(|e| ConnectorError::Config(format!("Connector config error: {}", e)))?;

        models::connector::warn_insecure_config(&self.connector);

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string. The password is never serialized.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.connector)?)
    }
}

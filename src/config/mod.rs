//! Configuration management
//!
//! Selects the authorization model, the global group used by Turbine, the
//! authenticator strategy and an optional seed graph. Loaded from YAML or
//! from `ACLGRAPH_*` environment variables.

pub mod security;
pub mod validation;

pub use security::SecurityConfig;
pub use validation::Validate;

use crate::utils::error::{Result, SecurityError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Root configuration document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Authorization engine settings
    #[serde(default)]
    pub security: SecurityConfig,
}

impl Config {
    /// Load configuration from a YAML file. A relative seed path is
    /// resolved against the file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = std::fs::read_to_string(path)
            .map_err(|e| SecurityError::config(format!("Failed to read config file: {}", e)))?;

        let mut config: Config = serde_yaml::from_str(&content)
            .map_err(|e| SecurityError::config(format!("Failed to parse config: {}", e)))?;

        if let (Some(seed), Some(dir)) = (config.security.seed.as_ref(), path.parent()) {
            if seed.is_relative() {
                config.security.seed = Some(dir.join(seed));
            }
        }

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            security: SecurityConfig::from_env()?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn security(&self) -> &SecurityConfig {
        &self.security
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.security
            .validate()
            .map_err(|e| SecurityError::config(format!("Security config error: {}", e)))?;

        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.security = self.security.merge(other.security);
        self
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SecurityError::config(format!("Failed to serialize config to JSON: {}", e)))
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| SecurityError::config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

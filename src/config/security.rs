//! Authorization engine configuration

use crate::auth::AuthenticatorKind;
use crate::core::models::ModelKind;
use crate::utils::error::{Result, SecurityError};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Engine settings. The model is fixed for the lifetime of a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Active authorization model
    #[serde(default)]
    pub model: ModelKind,
    /// Name of the Turbine global group
    #[serde(default = "default_global_group")]
    pub global_group: String,
    /// Credential checking strategy
    #[serde(default)]
    pub authenticator: AuthenticatorKind,
    /// Optional YAML graph loaded at startup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<PathBuf>,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            model: ModelKind::default(),
            global_group: default_global_group(),
            authenticator: AuthenticatorKind::default(),
            seed: None,
        }
    }
}

/// Default Turbine global group name
pub fn default_global_group() -> String {
    "global".to_string()
}

fn parse_env<T: std::str::FromStr<Err = String>>(key: &str) -> Result<Option<T>> {
    match env::var(key) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|e: String| SecurityError::config(format!("{}: {}", key, e))),
        Err(_) => Ok(None),
    }
}

impl SecurityConfig {
    /// Read `ACLGRAPH_MODEL`, `ACLGRAPH_GLOBAL_GROUP`,
    /// `ACLGRAPH_AUTHENTICATOR` and `ACLGRAPH_SEED`
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Some(model) = parse_env("ACLGRAPH_MODEL")? {
            config.model = model;
        }
        if let Ok(group) = env::var("ACLGRAPH_GLOBAL_GROUP") {
            config.global_group = group;
        }
        if let Some(authenticator) = parse_env("ACLGRAPH_AUTHENTICATOR")? {
            config.authenticator = authenticator;
        }
        if let Ok(seed) = env::var("ACLGRAPH_SEED") {
            config.seed = Some(PathBuf::from(seed));
        }
        Ok(config)
    }

    /// Merge security configurations, with other taking precedence
    pub fn merge(mut self, other: Self) -> Self {
        if other.model != ModelKind::default() {
            self.model = other.model;
        }
        if other.global_group != default_global_group() {
            self.global_group = other.global_group;
        }
        if other.authenticator != AuthenticatorKind::default() {
            self.authenticator = other.authenticator;
        }
        if other.seed.is_some() {
            self.seed = other.seed;
        }
        self
    }
}

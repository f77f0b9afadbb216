//! Tracing subscriber setup

use crate::utils::error::{Result, SecurityError};
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter
pub const LOG_ENV_VAR: &str = "ACLGRAPH_LOG";

/// Install the global subscriber. `ACLGRAPH_LOG` takes precedence over
/// `default_filter`.
pub fn init_tracing(default_filter: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|e| SecurityError::config(format!("Invalid log filter: {}", e)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| SecurityError::config(format!("Failed to install subscriber: {}", e)))
}

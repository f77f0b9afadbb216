//! Error types for the authorization engine

use thiserror::Error;

/// Result type alias for aclgraph
pub type Result<T> = std::result::Result<T, SecurityError>;

/// Main error type for aclgraph
#[derive(Error, Debug)]
pub enum SecurityError {
    /// An operation referenced an entity that does not exist in the store
    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    /// An add or create would violate case-insensitive name uniqueness
    #[error("Entity exists: {0}")]
    EntityExists(String),

    /// A query that is invalid for the active model or for the ACL state
    #[error("Access control error: {0}")]
    AccessControl(String),

    /// Storage collaborator failure
    #[error("Data backend error: {0}")]
    DataBackend(String),

    /// Credential check failed
    #[error("Password mismatch: {0}")]
    PasswordMismatch(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Crypto errors
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

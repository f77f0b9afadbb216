//! Authenticator strategies
//!
//! Credential checks run before an ACL is built. The authorization core
//! never looks at credentials itself.

mod authenticators;

pub use authenticators::{CryptoAuthenticator, NoOpAuthenticator, TextMatchAuthenticator};

use crate::core::models::User;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Verifies a user's credential and encodes new ones for storage
pub trait Authenticator: Send + Sync + fmt::Debug {
    fn kind(&self) -> AuthenticatorKind;

    /// Encode a clear-text password into its stored form
    fn encode_password(&self, password: &str) -> Result<String>;

    /// Check `password` against the user's stored credential
    fn authenticate(&self, user: &User, password: &str) -> Result<bool>;
}

/// Available authenticator strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthenticatorKind {
    /// Accepts every credential
    Noop,
    /// Compares the stored clear text with the presented one
    #[default]
    TextMatch,
    /// Stores Argon2 hashes and verifies against them
    Argon2,
}

impl fmt::Display for AuthenticatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthenticatorKind::Noop => write!(f, "noop"),
            AuthenticatorKind::TextMatch => write!(f, "text_match"),
            AuthenticatorKind::Argon2 => write!(f, "argon2"),
        }
    }
}

impl FromStr for AuthenticatorKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "noop" => Ok(AuthenticatorKind::Noop),
            "text_match" => Ok(AuthenticatorKind::TextMatch),
            "argon2" => Ok(AuthenticatorKind::Argon2),
            _ => Err(format!("Invalid authenticator: {}", s)),
        }
    }
}

/// Instantiate the configured strategy
pub fn create_authenticator(kind: AuthenticatorKind) -> Arc<dyn Authenticator> {
    match kind {
        AuthenticatorKind::Noop => Arc::new(NoOpAuthenticator),
        AuthenticatorKind::TextMatch => Arc::new(TextMatchAuthenticator),
        AuthenticatorKind::Argon2 => Arc::new(CryptoAuthenticator),
    }
}

//! Bundled authenticator implementations

use super::{Authenticator, AuthenticatorKind};
use crate::core::models::User;
use crate::utils::crypto::{hash_password, verify_password};
use crate::utils::error::Result;

/// Accepts any password. For development setups only.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpAuthenticator;

impl Authenticator for NoOpAuthenticator {
    fn kind(&self) -> AuthenticatorKind {
        AuthenticatorKind::Noop
    }

    fn encode_password(&self, password: &str) -> Result<String> {
        Ok(password.to_string())
    }

    fn authenticate(&self, _user: &User, _password: &str) -> Result<bool> {
        Ok(true)
    }
}

/// Compares trimmed clear text
#[derive(Debug, Clone, Copy, Default)]
pub struct TextMatchAuthenticator;

impl Authenticator for TextMatchAuthenticator {
    fn kind(&self) -> AuthenticatorKind {
        AuthenticatorKind::TextMatch
    }

    fn encode_password(&self, password: &str) -> Result<String> {
        Ok(password.trim().to_string())
    }

    fn authenticate(&self, user: &User, password: &str) -> Result<bool> {
        Ok(user
            .password
            .as_deref()
            .is_some_and(|stored| stored.trim() == password.trim()))
    }
}

/// Stores Argon2 hashes
#[derive(Debug, Clone, Copy, Default)]
pub struct CryptoAuthenticator;

impl Authenticator for CryptoAuthenticator {
    fn kind(&self) -> AuthenticatorKind {
        AuthenticatorKind::Argon2
    }

    fn encode_password(&self, password: &str) -> Result<String> {
        hash_password(password)
    }

    fn authenticate(&self, user: &User, password: &str) -> Result<bool> {
        match user.password.as_deref() {
            Some(stored) => verify_password(password, stored),
            None => Ok(false),
        }
    }
}

//! Argon2 password encoding for stored user credentials

use crate::utils::error::{Result, SecurityError};
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

/// PHC prefix shared by every Argon2 variant
const ARGON2_PREFIX: &str = "$argon2";

/// Encode a clear-text password as an Argon2 PHC string
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| SecurityError::crypto(format!("Failed to hash password: {}", e)))
}

/// Check a clear-text password against a stored PHC string.
///
/// A wrong password is `Ok(false)`; a malformed stored value is an error.
pub fn verify_password(password: &str, encoded: &str) -> Result<bool> {
    let parsed = PasswordHash::new(encoded)
        .map_err(|e| SecurityError::crypto(format!("Stored credential is not a valid hash: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(SecurityError::crypto(format!(
            "Password verification failed: {}",
            e
        ))),
    }
}

/// Whether a stored credential looks like an Argon2 hash
pub fn is_argon2_hash(encoded: &str) -> bool {
    encoded.starts_with(ARGON2_PREFIX)
}

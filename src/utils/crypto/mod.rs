//! Credential encoding

pub mod password;

pub use password::{hash_password, is_argon2_hash, verify_password};

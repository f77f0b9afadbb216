//! Shared utilities
//!
//! - **error**: the crate-wide error taxonomy
//! - **logging**: subscriber setup and the security audit trail
//! - **crypto**: credential encoding

pub mod crypto;
pub mod error;
pub mod logging;

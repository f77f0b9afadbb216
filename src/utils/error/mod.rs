//! Error handling for aclgraph
//!
//! Every fallible operation in the crate reports one of the variants of
//! [`SecurityError`]. Storage failures are always propagated, never swallowed.

mod helpers;
mod types;

pub use types::{Result, SecurityError};

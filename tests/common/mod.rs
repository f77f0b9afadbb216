//! Common test utilities for aclgraph
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::TestGraph;
//!
//! let graph = TestGraph::new(ModelKind::Dynamic);
//! let alice = graph.user("alice");
//! ```

pub mod assertions;
pub mod fixtures;

pub use assertions::AclAssertions;
pub use fixtures::TestGraph;

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}

//! Integration tests for aclgraph
//!
//! These tests verify the interaction between the service, the managers,
//! the store and the ACL snapshots without mocking.

pub mod basic_model_tests;
pub mod config_seed_tests;
pub mod dynamic_model_tests;
pub mod entity_manager_tests;
pub mod session_tests;
pub mod turbine_model_tests;

//! Authorization core
//!
//! - **models**: users, groups, roles, permissions and the Turbine join entity
//! - **sets**: case-insensitive uniqueness collections
//! - **acl**: per-model access control snapshots and their factories
//! - **model_manager**: grant and revoke, the only edge mutation surface
//! - **entity_manager**: entity lifecycle with revoke-all cascade

pub mod acl;
pub mod entity_manager;
pub mod model_manager;
pub mod models;
pub mod sets;

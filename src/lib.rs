//! # aclgraph
//!
//! A role-based access-control engine over a graph of users, groups, roles
//! and permissions.
//!
//! ## Features
//!
//! - **Three models**: Basic (user to group), Dynamic (roles held directly,
//!   through groups and by delegation) and Turbine (roles held per group)
//! - **Immutable snapshots**: an [`AccessControlList`] answers role and
//!   permission questions without touching storage
//! - **Guarded mutation**: model managers validate endpoints and apply
//!   grants under a lock
//! - **Pluggable storage**: anything implementing [`SecurityStore`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use aclgraph::{ModelKind, SecurityConfig, SecurityService};
//! use aclgraph::storage::MemoryStore;
//! use std::sync::Arc;
//!
//! fn main() -> aclgraph::Result<()> {
//!     let config = SecurityConfig {
//!         model: ModelKind::Turbine,
//!         ..SecurityConfig::default()
//!     };
//!     let service = SecurityService::with_store(config, Arc::new(MemoryStore::new()))?;
//!
//!     let alice = service.users().add_user("alice", "secret")?;
//!     let paris = service.groups().add("paris")?;
//!     let manager = service.roles().add("manager")?;
//!     service.turbine()?.grant(&alice, &paris, &manager)?;
//!
//!     let session = service.login("alice", "secret")?;
//!     assert!(session.acl.has_role_in("manager", "paris")?);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod core;
pub mod service;
pub mod storage;
pub mod utils;

// Re-export main types
pub use auth::{Authenticator, AuthenticatorKind};
pub use config::{Config, SecurityConfig};
pub use core::acl::{AccessControlList, AclFactory};
pub use core::models::{
    EntityId, EntityKind, Group, ModelKind, Named, Permission, Role, SecurityEntity, User,
};
pub use core::sets::{GroupSet, PermissionSet, RoleSet, SecuritySet, UserSet};
pub use service::{SecurityService, Session};
pub use storage::{MemoryStore, SecurityStore};
pub use utils::error::{Result, SecurityError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Git revision the crate was built from
pub const GIT_HASH: &str = env!("ACLGRAPH_GIT_HASH");

//! Uniqueness collections
//!
//! Ordered containers of entities keyed by identity and by case-insensitive
//! name. Re-adding the same entity is a no-op; adding a different entity
//! under an existing name fails with `EntityExists`.

mod security_set;

pub use security_set::SecuritySet;

use crate::core::models::{Group, Permission, Role, User};

pub type UserSet = SecuritySet<User>;
pub type GroupSet = SecuritySet<Group>;
pub type RoleSet = SecuritySet<Role>;
pub type PermissionSet = SecuritySet<Permission>;

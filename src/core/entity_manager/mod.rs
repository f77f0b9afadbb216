//! Entity managers
//!
//! Create, look up, rename and remove users, groups, roles and
//! permissions. Removal revokes every edge through the active model
//! manager before the entity is deleted.

mod manager;
mod user;

pub use manager::EntityManager;
pub use user::UserManager;

use crate::core::models::{Group, Permission, Role};

pub type GroupManager = EntityManager<Group>;
pub type RoleManager = EntityManager<Role>;
pub type PermissionManager = EntityManager<Permission>;

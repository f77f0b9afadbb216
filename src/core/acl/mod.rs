//! Access control lists
//!
//! An ACL is an immutable snapshot of one user's derived groups, roles and
//! permissions. It never re-reads the graph; build a new one to observe
//! later grants. All name arguments are compared case-insensitively.

mod basic;
mod dynamic;
mod factory;
mod turbine;

pub use basic::BasicAcl;
pub use dynamic::DynamicAcl;
pub use factory::{
    AclFactory, BasicAclFactory, DynamicAclFactory, TurbineAclFactory, create_acl_factory,
};
pub use turbine::TurbineAcl;

use crate::core::models::{EntityRecord, ModelKind};
use crate::core::sets::{GroupSet, PermissionSet, RoleSet};
use crate::utils::error::{Result, SecurityError};
use std::fmt;

/// Authorization questions answered against a frozen snapshot.
///
/// Set-returning methods hand out copies; callers cannot reach the
/// snapshot's own sets.
pub trait AccessControlList: Send + Sync + fmt::Debug {
    /// Model this snapshot was built for
    fn model(&self) -> ModelKind;

    /// The principal the snapshot describes
    fn user(&self) -> &EntityRecord;

    fn has_role(&self, role: &str) -> Result<bool>;

    /// Role held within a specific group
    fn has_role_in(&self, role: &str, group: &str) -> Result<bool>;

    fn has_permission(&self, permission: &str) -> Result<bool>;

    /// Permission held within a specific group
    fn has_permission_in(&self, permission: &str, group: &str) -> Result<bool>;

    fn roles(&self) -> Result<RoleSet>;

    fn roles_in(&self, group: &str) -> Result<RoleSet>;

    fn permissions(&self) -> Result<PermissionSet>;

    fn permissions_in(&self, group: &str) -> Result<PermissionSet>;

    /// Groups the principal belongs to
    fn groups(&self) -> GroupSet;

    fn is_in_group(&self, group: &str) -> bool;

    /// Role held within at least one of the given groups
    fn has_role_in_any(&self, role: &str, groups: &[&str]) -> Result<bool> {
        for group in groups {
            if self.has_role_in(role, group)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Permission held within at least one of the given groups
    fn has_permission_in_any(&self, permission: &str, groups: &[&str]) -> Result<bool> {
        for group in groups {
            if self.has_permission_in(permission, group)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Group-scoped queries need a group name
fn require_group(group: &str) -> Result<&str> {
    if group.trim().is_empty() {
        return Err(SecurityError::access_control(
            "A group is required for a group-scoped query",
        ));
    }
    Ok(group)
}

//! ACL for the Basic model

use super::AccessControlList;
use crate::core::models::{EntityRecord, ModelKind};
use crate::core::sets::{GroupSet, PermissionSet, RoleSet};
use crate::utils::error::{Result, SecurityError};

/// Group membership snapshot. Basic has no roles; a permission check is a
/// membership check on the group of that name.
#[derive(Debug, Clone)]
pub struct BasicAcl {
    user: EntityRecord,
    groups: GroupSet,
}

impl BasicAcl {
    pub fn new(user: EntityRecord, groups: GroupSet) -> Self {
        Self { user, groups }
    }

    fn unsupported<T>(operation: &str) -> Result<T> {
        Err(SecurityError::access_control(format!(
            "{} is not supported by the basic model",
            operation
        )))
    }
}

impl AccessControlList for BasicAcl {
    fn model(&self) -> ModelKind {
        ModelKind::Basic
    }

    fn user(&self) -> &EntityRecord {
        &self.user
    }

    fn has_role(&self, _role: &str) -> Result<bool> {
        Self::unsupported("has_role")
    }

    fn has_role_in(&self, _role: &str, _group: &str) -> Result<bool> {
        Self::unsupported("has_role_in")
    }

    fn has_permission(&self, permission: &str) -> Result<bool> {
        Ok(self.is_in_group(permission))
    }

    fn has_permission_in(&self, _permission: &str, _group: &str) -> Result<bool> {
        Self::unsupported("has_permission_in")
    }

    fn roles(&self) -> Result<RoleSet> {
        Self::unsupported("roles")
    }

    fn roles_in(&self, _group: &str) -> Result<RoleSet> {
        Self::unsupported("roles_in")
    }

    fn permissions(&self) -> Result<PermissionSet> {
        Self::unsupported("permissions")
    }

    fn permissions_in(&self, _group: &str) -> Result<PermissionSet> {
        Self::unsupported("permissions_in")
    }

    fn groups(&self) -> GroupSet {
        self.groups.clone()
    }

    fn is_in_group(&self, group: &str) -> bool {
        self.groups.contains_name(group)
    }
}

//! ACL for the Dynamic model

use super::{AccessControlList, require_group};
use crate::core::models::{EntityRecord, ModelKind, name_key};
use crate::core::sets::{GroupSet, PermissionSet, RoleSet, UserSet};
use crate::utils::error::Result;
use std::collections::HashMap;

/// Global role snapshot: direct roles, roles conferred by the user's groups
/// and roles inherited from delegators, expanded to their permissions.
#[derive(Debug, Clone)]
pub struct DynamicAcl {
    user: EntityRecord,
    groups: GroupSet,
    roles: RoleSet,
    permissions: PermissionSet,
    /// Roles conferred by each of the user's groups, keyed by name key
    group_roles: HashMap<String, RoleSet>,
    delegators: UserSet,
}

impl DynamicAcl {
    /// `roles` must carry their permission sets
    pub fn new(
        user: EntityRecord,
        groups: GroupSet,
        roles: RoleSet,
        group_roles: HashMap<String, RoleSet>,
        delegators: UserSet,
    ) -> Result<Self> {
        let permissions = expand(&roles)?;
        Ok(Self {
            user,
            groups,
            roles,
            permissions,
            group_roles,
            delegators,
        })
    }

    /// Users whose roles were folded into this snapshot
    pub fn delegators(&self) -> UserSet {
        self.delegators.clone()
    }

    fn group_roles(&self, group: &str) -> Result<Option<&RoleSet>> {
        let group = require_group(group)?;
        Ok(self.group_roles.get(&name_key(group)))
    }
}

/// Union of the permissions owned by each role
pub(super) fn expand(roles: &RoleSet) -> Result<PermissionSet> {
    let mut permissions = PermissionSet::new();
    for role in roles {
        permissions.add_all(role.permissions.iter().cloned())?;
    }
    Ok(permissions)
}

impl AccessControlList for DynamicAcl {
    fn model(&self) -> ModelKind {
        ModelKind::Dynamic
    }

    fn user(&self) -> &EntityRecord {
        &self.user
    }

    fn has_role(&self, role: &str) -> Result<bool> {
        Ok(self.roles.contains_name(role))
    }

    fn has_role_in(&self, role: &str, group: &str) -> Result<bool> {
        Ok(self
            .group_roles(group)?
            .is_some_and(|roles| roles.contains_name(role)))
    }

    fn has_permission(&self, permission: &str) -> Result<bool> {
        Ok(self.permissions.contains_name(permission))
    }

    fn has_permission_in(&self, permission: &str, group: &str) -> Result<bool> {
        Ok(self.permissions_in(group)?.contains_name(permission))
    }

    fn roles(&self) -> Result<RoleSet> {
        Ok(self.roles.clone())
    }

    fn roles_in(&self, group: &str) -> Result<RoleSet> {
        Ok(self.group_roles(group)?.cloned().unwrap_or_default())
    }

    fn permissions(&self) -> Result<PermissionSet> {
        Ok(self.permissions.clone())
    }

    fn permissions_in(&self, group: &str) -> Result<PermissionSet> {
        match self.group_roles(group)? {
            Some(roles) => expand(roles),
            None => Ok(PermissionSet::new()),
        }
    }

    fn groups(&self) -> GroupSet {
        self.groups.clone()
    }

    fn is_in_group(&self, group: &str) -> bool {
        self.groups.contains_name(group)
    }
}

//! ACL for the Turbine model

use super::dynamic::expand;
use super::{AccessControlList, require_group};
use crate::core::models::{EntityRecord, Group, ModelKind, Named, Role, name_key};
use crate::core::sets::{GroupSet, PermissionSet, RoleSet};
use crate::utils::error::Result;
use std::collections::HashMap;

/// Per-group role snapshot.
///
/// Without a group argument a query asks "in any group"; with one it is
/// scoped to that group. The configured global group is just another group
/// with its own convenience accessors.
#[derive(Debug, Clone)]
pub struct TurbineAcl {
    user: EntityRecord,
    global_group: String,
    groups: GroupSet,
    roles: RoleSet,
    permissions: PermissionSet,
    group_roles: HashMap<String, RoleSet>,
    group_permissions: HashMap<String, PermissionSet>,
}

impl TurbineAcl {
    /// Build from the user's (group, role) assignments. Roles must carry
    /// their permission sets.
    pub fn new<S: Into<String>>(
        user: EntityRecord,
        assignments: Vec<(Group, Role)>,
        global_group: S,
    ) -> Result<Self> {
        let mut groups = GroupSet::new();
        let mut roles = RoleSet::new();
        let mut group_roles: HashMap<String, RoleSet> = HashMap::new();

        for (group, role) in assignments {
            group_roles
                .entry(name_key(group.name()))
                .or_default()
                .add(role.clone())?;
            roles.add(role)?;
            groups.add(group)?;
        }

        let mut group_permissions = HashMap::with_capacity(group_roles.len());
        for (key, scoped) in &group_roles {
            group_permissions.insert(key.clone(), expand(scoped)?);
        }

        Ok(Self {
            user,
            global_group: global_group.into(),
            groups,
            permissions: expand(&roles)?,
            roles,
            group_roles,
            group_permissions,
        })
    }

    pub fn global_group(&self) -> &str {
        &self.global_group
    }

    /// Role held within the global group
    pub fn has_global_role(&self, role: &str) -> bool {
        self.scoped_roles(&self.global_group)
            .is_some_and(|roles| roles.contains_name(role))
    }

    pub fn has_global_permission(&self, permission: &str) -> bool {
        self.scoped_permissions(&self.global_group)
            .is_some_and(|permissions| permissions.contains_name(permission))
    }

    pub fn global_roles(&self) -> RoleSet {
        self.scoped_roles(&self.global_group)
            .cloned()
            .unwrap_or_default()
    }

    pub fn global_permissions(&self) -> PermissionSet {
        self.scoped_permissions(&self.global_group)
            .cloned()
            .unwrap_or_default()
    }

    fn scoped_roles(&self, group: &str) -> Option<&RoleSet> {
        self.group_roles.get(&name_key(group))
    }

    fn scoped_permissions(&self, group: &str) -> Option<&PermissionSet> {
        self.group_permissions.get(&name_key(group))
    }
}

impl AccessControlList for TurbineAcl {
    fn model(&self) -> ModelKind {
        ModelKind::Turbine
    }

    fn user(&self) -> &EntityRecord {
        &self.user
    }

    fn has_role(&self, role: &str) -> Result<bool> {
        Ok(self.roles.contains_name(role))
    }

    fn has_role_in(&self, role: &str, group: &str) -> Result<bool> {
        let group = require_group(group)?;
        Ok(self
            .scoped_roles(group)
            .is_some_and(|roles| roles.contains_name(role)))
    }

    fn has_permission(&self, permission: &str) -> Result<bool> {
        Ok(self.permissions.contains_name(permission))
    }

    fn has_permission_in(&self, permission: &str, group: &str) -> Result<bool> {
        let group = require_group(group)?;
        Ok(self
            .scoped_permissions(group)
            .is_some_and(|permissions| permissions.contains_name(permission)))
    }

    fn roles(&self) -> Result<RoleSet> {
        Ok(self.roles.clone())
    }

    fn roles_in(&self, group: &str) -> Result<RoleSet> {
        let group = require_group(group)?;
        Ok(self.scoped_roles(group).cloned().unwrap_or_default())
    }

    fn permissions(&self) -> Result<PermissionSet> {
        Ok(self.permissions.clone())
    }

    fn permissions_in(&self, group: &str) -> Result<PermissionSet> {
        let group = require_group(group)?;
        Ok(self.scoped_permissions(group).cloned().unwrap_or_default())
    }

    fn groups(&self) -> GroupSet {
        self.groups.clone()
    }

    fn is_in_group(&self, group: &str) -> bool {
        self.groups.contains_name(group)
    }
}

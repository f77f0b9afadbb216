//! Role entity

use super::entity::{EntityId, EntityKind, security_entity};
use super::turbine::TurbineUserGroupRole;
use crate::core::sets::{GroupSet, PermissionSet, UserSet};
use serde::Serialize;

/// A named bundle of permissions
#[derive(Debug, Clone, Serialize)]
pub struct Role {
    id: EntityId,
    name: String,
    /// Permissions owned by the role (Dynamic, Turbine)
    pub permissions: PermissionSet,
    /// Groups conferring this role (Dynamic)
    #[serde(skip_serializing_if = "GroupSet::is_empty")]
    pub groups: GroupSet,
    /// Users holding this role directly (Dynamic)
    #[serde(skip_serializing_if = "UserSet::is_empty")]
    pub users: UserSet,
    /// Group-scoped assignments of this role (Turbine)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub user_group_roles: Vec<TurbineUserGroupRole>,
}

impl Role {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self::with_id(EntityId::new(), name)
    }

    pub fn with_id<S: Into<String>>(id: EntityId, name: S) -> Self {
        Self {
            id,
            name: name.into(),
            permissions: PermissionSet::new(),
            groups: GroupSet::new(),
            users: UserSet::new(),
            user_group_roles: Vec::new(),
        }
    }
}

security_entity!(Role, EntityKind::Role);

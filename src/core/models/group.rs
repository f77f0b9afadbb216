//! Group entity

use super::entity::{EntityId, EntityKind, security_entity};
use super::turbine::TurbineUserGroupRole;
use crate::core::sets::{RoleSet, UserSet};
use serde::Serialize;

/// A collection of users. In Basic it is the permission-bearing unit, in
/// Turbine it scopes role assignments.
#[derive(Debug, Clone, Serialize)]
pub struct Group {
    id: EntityId,
    name: String,
    /// Members (Basic, Dynamic)
    #[serde(skip_serializing_if = "UserSet::is_empty")]
    pub users: UserSet,
    /// Roles conferred on every member (Dynamic)
    #[serde(skip_serializing_if = "RoleSet::is_empty")]
    pub roles: RoleSet,
    /// Role assignments scoped to this group (Turbine)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub user_group_roles: Vec<TurbineUserGroupRole>,
}

impl Group {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self::with_id(EntityId::new(), name)
    }

    pub fn with_id<S: Into<String>>(id: EntityId, name: S) -> Self {
        Self {
            id,
            name: name.into(),
            users: UserSet::new(),
            roles: RoleSet::new(),
            user_group_roles: Vec::new(),
        }
    }
}

security_entity!(Group, EntityKind::Group);

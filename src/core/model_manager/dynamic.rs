//! Model manager for the Dynamic model

use super::ModelManager;
use super::shared::{EntityRef, ManagerCore};
use crate::core::models::{Group, ModelKind, Named, Permission, Role, User};
use crate::storage::{Edge, SecurityStore};
use crate::utils::error::Result;
use std::sync::Arc;

/// Pairwise grants between users, groups, roles and permissions, plus
/// delegation of one user's roles to another
#[derive(Debug)]
pub struct DynamicModelManager {
    core: ManagerCore,
}

impl DynamicModelManager {
    pub fn new(store: Arc<dyn SecurityStore>) -> Self {
        Self {
            core: ManagerCore::new(ModelKind::Dynamic, store),
        }
    }

    pub fn grant_role(&self, user: &User, role: &Role) -> Result<bool> {
        self.core.grant(
            Edge::UserRole {
                user: user.id(),
                role: role.id(),
            },
            &[EntityRef::of(user), EntityRef::of(role)],
        )
    }

    pub fn revoke_role(&self, user: &User, role: &Role) -> Result<bool> {
        self.core.revoke(
            Edge::UserRole {
                user: user.id(),
                role: role.id(),
            },
            &[EntityRef::of(user), EntityRef::of(role)],
        )
    }

    pub fn grant_group(&self, user: &User, group: &Group) -> Result<bool> {
        self.core.grant(
            Edge::UserGroup {
                user: user.id(),
                group: group.id(),
            },
            &[EntityRef::of(user), EntityRef::of(group)],
        )
    }

    pub fn revoke_group(&self, user: &User, group: &Group) -> Result<bool> {
        self.core.revoke(
            Edge::UserGroup {
                user: user.id(),
                group: group.id(),
            },
            &[EntityRef::of(user), EntityRef::of(group)],
        )
    }

    /// Every member of `group` gains `role`
    pub fn grant_group_role(&self, group: &Group, role: &Role) -> Result<bool> {
        self.core.grant(
            Edge::GroupRole {
                group: group.id(),
                role: role.id(),
            },
            &[EntityRef::of(group), EntityRef::of(role)],
        )
    }

    pub fn revoke_group_role(&self, group: &Group, role: &Role) -> Result<bool> {
        self.core.revoke(
            Edge::GroupRole {
                group: group.id(),
                role: role.id(),
            },
            &[EntityRef::of(group), EntityRef::of(role)],
        )
    }

    pub fn grant_permission(&self, role: &Role, permission: &Permission) -> Result<bool> {
        self.core.grant(
            Edge::RolePermission {
                role: role.id(),
                permission: permission.id(),
            },
            &[EntityRef::of(role), EntityRef::of(permission)],
        )
    }

    pub fn revoke_permission(&self, role: &Role, permission: &Permission) -> Result<bool> {
        self.core.revoke(
            Edge::RolePermission {
                role: role.id(),
                permission: permission.id(),
            },
            &[EntityRef::of(role), EntityRef::of(permission)],
        )
    }

    /// Let `delegatee` act with the roles of `delegator`
    pub fn add_delegate(&self, delegator: &User, delegatee: &User) -> Result<bool> {
        self.core.grant(
            Edge::Delegation {
                delegator: delegator.id(),
                delegatee: delegatee.id(),
            },
            &[EntityRef::of(delegator), EntityRef::of(delegatee)],
        )
    }

    /// Withdraw a delegation. Unlike the other revokes, the delegation must
    /// exist; otherwise this fails with `UnknownEntity`.
    pub fn remove_delegate(&self, delegator: &User, delegatee: &User) -> Result<()> {
        self.core.revoke_existing(
            Edge::Delegation {
                delegator: delegator.id(),
                delegatee: delegatee.id(),
            },
            &[EntityRef::of(delegator), EntityRef::of(delegatee)],
        )
    }
}

impl ModelManager for DynamicModelManager {
    fn model(&self) -> ModelKind {
        self.core.model()
    }

    fn revoke_all(&self, entity: EntityRef<'_>) -> Result<usize> {
        self.core
            .revoke_all(entity, |edge| !matches!(edge, Edge::UserGroupRole { .. }))
    }
}

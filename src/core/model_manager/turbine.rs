//! Model manager for the Turbine model

use super::ModelManager;
use super::shared::{EntityRef, ManagerCore};
use crate::core::models::{
    EntityKind, Group, ModelKind, Named, Permission, Role, SecurityEntity, User, validate_name,
};
use crate::storage::{Edge, SecurityStore};
use crate::utils::error::Result;
use crate::utils::logging::SecurityLogger;
use std::sync::Arc;

/// Group-scoped role assignment through (user, group, role) join entities
#[derive(Debug)]
pub struct TurbineModelManager {
    core: ManagerCore,
    global_group: String,
}

impl TurbineModelManager {
    pub fn new<S: Into<String>>(store: Arc<dyn SecurityStore>, global_group: S) -> Self {
        Self {
            core: ManagerCore::new(ModelKind::Turbine, store),
            global_group: global_group.into(),
        }
    }

    pub fn global_group_name(&self) -> &str {
        &self.global_group
    }

    /// Assign `role` to `user` within `group`
    pub fn grant(&self, user: &User, group: &Group, role: &Role) -> Result<bool> {
        self.core.grant(
            join(user, group, role),
            &[EntityRef::of(user), EntityRef::of(group), EntityRef::of(role)],
        )
    }

    /// Remove the assignment of `role` to `user` within `group`
    pub fn revoke(&self, user: &User, group: &Group, role: &Role) -> Result<bool> {
        self.core.revoke(
            join(user, group, role),
            &[EntityRef::of(user), EntityRef::of(group), EntityRef::of(role)],
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

    /// The configured global group, created on first use
    pub fn global_group(&self) -> Result<Group> {
        validate_name(&self.global_group)?;
        self.core.locked(&[], |store| {
            let record = match store.find_by_name(EntityKind::Group, &self.global_group)? {
                Some(record) => record,
                None => {
                    let record = store.create_entity(EntityKind::Group, &self.global_group)?;
                    SecurityLogger::log_entity_event("created", EntityKind::Group, &record.name);
                    record
                }
            };
            Ok(Group::from_record(record))
        })
    }

    /// Swap `old_role` for `new_role` in the global group as one step
    pub fn replace(&self, user: &User, old_role: &Role, new_role: &Role) -> Result<()> {
        let global = self.global_group()?;
        let endpoints = [
            EntityRef::of(user),
            EntityRef::of(&global),
            EntityRef::of(old_role),
            EntityRef::of(new_role),
        ];
        let (removed, created) = self.core.locked(&endpoints, |store| {
            let removed = store.delete_edge(&join(user, &global, old_role))?;
            match store.persist_edge(&join(user, &global, new_role)) {
                Ok(created) => Ok((removed, created)),
                Err(e) => {
                    // Restore the old assignment
                    if removed {
                        store.persist_edge(&join(user, &global, old_role))?;
                    }
                    Err(e)
                }
            }
        })?;

        let scope = format!("{} -> {}", user.name(), global.name());
        SecurityLogger::log_revoke(
            ModelKind::Turbine,
            "user_group_role",
            &format!("{} -> {}", scope, old_role.name()),
            removed,
        );
        SecurityLogger::log_grant(
            ModelKind::Turbine,
            "user_group_role",
            &format!("{} -> {}", scope, new_role.name()),
            created,
        );
        Ok(())
    }
}

fn join(user: &User, group: &Group, role: &Role) -> Edge {
    Edge::UserGroupRole {
        user: user.id(),
        group: group.id(),
        role: role.id(),
    }
}

impl ModelManager for TurbineModelManager {
    fn model(&self) -> ModelKind {
        self.core.model()
    }

    fn revoke_all(&self, entity: EntityRef<'_>) -> Result<usize> {
        self.core.revoke_all(entity, |edge| {
            matches!(edge, Edge::UserGroupRole { .. } | Edge::RolePermission { .. })
        })
    }
}

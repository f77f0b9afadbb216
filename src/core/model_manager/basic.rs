//! Model manager for the Basic model

use super::ModelManager;
use super::shared::{EntityRef, ManagerCore};
use crate::core::models::{Group, ModelKind, Named, User};
use crate::storage::{Edge, SecurityStore};
use crate::utils::error::Result;
use std::sync::Arc;

/// Assigns users to groups
#[derive(Debug)]
pub struct BasicModelManager {
    core: ManagerCore,
}

impl BasicModelManager {
    pub fn new(store: Arc<dyn SecurityStore>) -> Self {
        Self {
            core: ManagerCore::new(ModelKind::Basic, store),
        }
    }

    /// Put a user in a group. Returns `true` if the membership is new.
    pub fn grant(&self, user: &User, group: &Group) -> Result<bool> {
        self.core.grant(
            Edge::UserGroup {
                user: user.id(),
                group: group.id(),
            },
            &[EntityRef::of(user), EntityRef::of(group)],
        )
    }

    /// Take a user out of a group. Returns `true` if they were a member.
    pub fn revoke(&self, user: &User, group: &Group) -> Result<bool> {
        self.core.revoke(
            Edge::UserGroup {
                user: user.id(),
                group: group.id(),
            },
            &[EntityRef::of(user), EntityRef::of(group)],
        )
    }
}

impl ModelManager for BasicModelManager {
    fn model(&self) -> ModelKind {
        self.core.model()
    }

    fn revoke_all(&self, entity: EntityRef<'_>) -> Result<usize> {
        self.core
            .revoke_all(entity, |edge| matches!(edge, Edge::UserGroup { .. }))
    }
}

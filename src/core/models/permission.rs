//! Permission entity

use super::entity::{EntityId, EntityKind, security_entity};
use crate::core::sets::RoleSet;
use serde::Serialize;

/// Leaf of the authorization graph
#[derive(Debug, Clone, Serialize)]
pub struct Permission {
    id: EntityId,
    name: String,
    /// Roles owning this permission
    #[serde(skip_serializing_if = "RoleSet::is_empty")]
    pub roles: RoleSet,
}

impl Permission {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self::with_id(EntityId::new(), name)
    }

    pub fn with_id<S: Into<String>>(id: EntityId, name: S) -> Self {
        Self {
            id,
            name: name.into(),
            roles: RoleSet::new(),
        }
    }
}

security_entity!(Permission, EntityKind::Permission);

//! Storage collaborator contract

use crate::core::models::{EntityId, EntityKind, EntityRecord};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One edge of the authorization graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Edge {
    UserGroup { user: EntityId, group: EntityId },
    UserRole { user: EntityId, role: EntityId },
    GroupRole { group: EntityId, role: EntityId },
    RolePermission { role: EntityId, permission: EntityId },
    /// Turbine join entity
    UserGroupRole {
        user: EntityId,
        group: EntityId,
        role: EntityId,
    },
    /// `delegatee` may act with the roles of `delegator`
    Delegation {
        delegator: EntityId,
        delegatee: EntityId,
    },
}

impl Edge {
    /// Every endpoint of the edge with its entity kind
    pub fn endpoints(&self) -> Vec<(EntityKind, EntityId)> {
        match *self {
            Edge::UserGroup { user, group } => {
                vec![(EntityKind::User, user), (EntityKind::Group, group)]
            }
            Edge::UserRole { user, role } => vec![(EntityKind::User, user), (EntityKind::Role, role)],
            Edge::GroupRole { group, role } => {
                vec![(EntityKind::Group, group), (EntityKind::Role, role)]
            }
            Edge::RolePermission { role, permission } => vec![
                (EntityKind::Role, role),
                (EntityKind::Permission, permission),
            ],
            Edge::UserGroupRole { user, group, role } => vec![
                (EntityKind::User, user),
                (EntityKind::Group, group),
                (EntityKind::Role, role),
            ],
            Edge::Delegation {
                delegator,
                delegatee,
            } => vec![(EntityKind::User, delegator), (EntityKind::User, delegatee)],
        }
    }

    pub fn touches(&self, id: EntityId) -> bool {
        self.endpoints().iter().any(|(_, endpoint)| *endpoint == id)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Edge::UserGroup { .. } => "user_group",
            Edge::UserRole { .. } => "user_role",
            Edge::GroupRole { .. } => "group_role",
            Edge::RolePermission { .. } => "role_permission",
            Edge::UserGroupRole { .. } => "user_group_role",
            Edge::Delegation { .. } => "delegation",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self
            .endpoints()
            .iter()
            .map(|(kind, id)| format!("{}:{}", kind, id))
            .collect();
        write!(f, "{}({})", self.label(), ids.join(", "))
    }
}

/// Authentication attributes of a user, opaque to the authorization core
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Encoded password as produced by the configured authenticator
    pub password: Option<String>,
    /// Last successful login
    pub last_login: Option<DateTime<Utc>>,
}

/// Storage backend for entities, edges and credentials.
///
/// Implementations report their own failures as `DataBackend`; callers
/// propagate them unchanged.
#[cfg_attr(test, mockall::automock)]
pub trait SecurityStore: Send + Sync {
    fn find_by_name(&self, kind: EntityKind, name: &str) -> Result<Option<EntityRecord>>;

    fn find_by_id(&self, kind: EntityKind, id: EntityId) -> Result<Option<EntityRecord>>;

    /// All entities of a kind
    fn list(&self, kind: EntityKind) -> Result<Vec<EntityRecord>>;

    /// Create an entity and assign it an identity. Fails with `EntityExists`
    /// on a case-insensitive name clash.
    fn create_entity(&self, kind: EntityKind, name: &str) -> Result<EntityRecord>;

    fn rename_entity(&self, kind: EntityKind, id: EntityId, name: &str) -> Result<EntityRecord>;

    /// Delete an entity together with any edge still touching it
    fn delete_entity(&self, kind: EntityKind, id: EntityId) -> Result<()>;

    fn load_credentials(&self, user: EntityId) -> Result<Credentials>;

    fn save_credentials(&self, user: EntityId, credentials: &Credentials) -> Result<()>;

    /// Edges touching an entity, in the order they were created
    fn load_edges_for(&self, kind: EntityKind, id: EntityId) -> Result<Vec<Edge>>;

    /// Record an edge; returns `false` if it already existed
    fn persist_edge(&self, edge: &Edge) -> Result<bool>;

    /// Remove an edge; returns `false` if it did not exist
    fn delete_edge(&self, edge: &Edge) -> Result<bool>;
}

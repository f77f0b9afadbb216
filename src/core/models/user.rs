//! User entity

use super::entity::{EntityId, EntityKind, security_entity};
use super::turbine::TurbineUserGroupRole;
use crate::core::sets::{GroupSet, RoleSet, UserSet};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Name reserved for the unauthenticated principal
pub const ANONYMOUS_USER_NAME: &str = "anon";

/// A principal. Which edge sets are populated depends on the active model.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    id: EntityId,
    name: String,
    /// Encoded credential, owned by the user store
    #[serde(skip_serializing)]
    pub password: Option<String>,
    /// Last successful login
    pub last_login: Option<DateTime<Utc>>,
    /// Groups the user belongs to (Basic, Dynamic)
    #[serde(skip_serializing_if = "GroupSet::is_empty")]
    pub groups: GroupSet,
    /// Directly assigned roles (Dynamic)
    #[serde(skip_serializing_if = "RoleSet::is_empty")]
    pub roles: RoleSet,
    /// Users whose roles this user may act with (Dynamic)
    #[serde(skip_serializing_if = "UserSet::is_empty")]
    pub delegators: UserSet,
    /// Users acting with this user's roles (Dynamic)
    #[serde(skip_serializing_if = "UserSet::is_empty")]
    pub delegatees: UserSet,
    /// Group-scoped role assignments (Turbine)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub user_group_roles: Vec<TurbineUserGroupRole>,
}

impl User {
    /// Create a detached user with a fresh identity
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self::with_id(EntityId::new(), name)
    }

    pub fn with_id<S: Into<String>>(id: EntityId, name: S) -> Self {
        Self {
            id,
            name: name.into(),
            password: None,
            last_login: None,
            groups: GroupSet::new(),
            roles: RoleSet::new(),
            delegators: UserSet::new(),
            delegatees: UserSet::new(),
            user_group_roles: Vec::new(),
        }
    }

    /// The unauthenticated principal; never persisted
    pub fn anonymous() -> Self {
        Self::new(ANONYMOUS_USER_NAME)
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty() || self.name.eq_ignore_ascii_case(ANONYMOUS_USER_NAME)
    }
}

security_entity!(User, EntityKind::User);

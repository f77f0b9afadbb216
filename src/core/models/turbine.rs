//! Turbine join entity

use super::entity::{EntityRecord, Named};
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

/// One (user, group, role) assignment. Identity is the triple of entity ids.
#[derive(Debug, Clone, Serialize)]
pub struct TurbineUserGroupRole {
    pub user: EntityRecord,
    pub group: EntityRecord,
    pub role: EntityRecord,
}

impl TurbineUserGroupRole {
    pub fn new(user: EntityRecord, group: EntityRecord, role: EntityRecord) -> Self {
        Self { user, group, role }
    }

    /// True when this assignment lives in the named group (case-insensitive)
    pub fn in_group(&self, group: &str) -> bool {
        self.group.name_key() == super::entity::name_key(group)
    }
}

impl PartialEq for TurbineUserGroupRole {
    fn eq(&self, other: &Self) -> bool {
        self.user.id == other.user.id
            && self.group.id == other.group.id
            && self.role.id == other.role.id
    }
}

impl Eq for TurbineUserGroupRole {}

impl Hash for TurbineUserGroupRole {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.user.id.hash(state);
        self.group.id.hash(state);
        self.role.id.hash(state);
    }
}

impl fmt::Display for TurbineUserGroupRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} in {} as {}",
            self.user.name, self.group.name, self.role.name
        )
    }
}

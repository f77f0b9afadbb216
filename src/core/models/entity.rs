//! Entity identity shared by users, groups, roles and permissions

use crate::utils::error::SecurityError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque identity key assigned by the storage collaborator at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Allocate a fresh identity
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Concrete entity type, used to key storage tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    User,
    Group,
    Role,
    Permission,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::User,
        EntityKind::Group,
        EntityKind::Role,
        EntityKind::Permission,
    ];
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::User => write!(f, "user"),
            EntityKind::Group => write!(f, "group"),
            EntityKind::Role => write!(f, "role"),
            EntityKind::Permission => write!(f, "permission"),
        }
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "user" => Ok(EntityKind::User),
            "group" => Ok(EntityKind::Group),
            "role" => Ok(EntityKind::Role),
            "permission" => Ok(EntityKind::Permission),
            _ => Err(format!("Invalid entity kind: {}", s)),
        }
    }
}

/// Anything with an identity and a name; the membership contract of a `SecuritySet`
pub trait Named {
    fn id(&self) -> EntityId;
    fn name(&self) -> &str;

    /// Key used for case-insensitive name uniqueness
    fn name_key(&self) -> String {
        name_key(self.name())
    }
}

/// Normalise a name for case-insensitive comparison
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

/// Reject blank entity names
pub fn validate_name(name: &str) -> crate::utils::error::Result<()> {
    if name.trim().is_empty() {
        return Err(SecurityError::data_backend("Entity name must not be empty"));
    }
    Ok(())
}

/// Bare identity and name of an entity, as persisted by the storage collaborator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRecord {
    pub id: EntityId,
    pub name: String,
}

impl EntityRecord {
    pub fn new<S: Into<String>>(id: EntityId, name: S) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Named for EntityRecord {
    fn id(&self) -> EntityId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for EntityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.name, self.id)
    }
}

/// Common capability of the four graph vertex types
pub trait SecurityEntity: Named + Clone + fmt::Debug + Send + Sync + 'static {
    const KIND: EntityKind;

    /// Build a detached entity with no edges loaded
    fn from_record(record: EntityRecord) -> Self;

    fn record(&self) -> EntityRecord {
        EntityRecord::new(self.id(), self.name())
    }

    /// Human-readable reference used in error messages, e.g. `role 'admin'`
    fn describe(&self) -> String {
        format!("{} '{}'", Self::KIND, self.name())
    }
}

/// Implements identity, equality and hashing for an entity struct with
/// private `id` and `name` fields. Equality is identity-only.
macro_rules! security_entity {
    ($ty:ident, $kind:expr) => {
        impl $crate::core::models::Named for $ty {
            fn id(&self) -> $crate::core::models::EntityId {
                self.id
            }

            fn name(&self) -> &str {
                &self.name
            }
        }

        impl $crate::core::models::SecurityEntity for $ty {
            const KIND: $crate::core::models::EntityKind = $kind;

            fn from_record(record: $crate::core::models::EntityRecord) -> Self {
                Self::with_id(record.id, record.name)
            }
        }

        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.id == other.id
            }
        }

        impl Eq for $ty {}

        impl std::hash::Hash for $ty {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                self.id.hash(state);
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.name)
            }
        }
    };
}

pub(crate) use security_entity;

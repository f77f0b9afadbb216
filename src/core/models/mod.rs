//! Authorization graph entities
//!
//! Users, groups, roles and permissions are plain records with an immutable
//! identity and a mutable name. Two entities are equal when their ids are.

mod entity;
mod group;
mod model_kind;
mod permission;
mod role;
mod turbine;
mod user;

pub use entity::{
    EntityId, EntityKind, EntityRecord, Named, SecurityEntity, name_key, validate_name,
};
pub use group::Group;
pub use model_kind::ModelKind;
pub use permission::Permission;
pub use role::Role;
pub use turbine::TurbineUserGroupRole;
pub use user::{ANONYMOUS_USER_NAME, User};

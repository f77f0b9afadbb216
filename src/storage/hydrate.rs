//! Typed lookups that load an entity together with its direct edges

use super::store::{Edge, SecurityStore};
use crate::core::models::{
    EntityId, EntityKind, EntityRecord, Group, Named, Permission, Role, SecurityEntity,
    TurbineUserGroupRole, User,
};
use crate::core::sets::SecuritySet;
use crate::utils::error::{Result, SecurityError};

/// An entity that can be loaded from a store with its neighbours attached.
/// Neighbours are detached: their own edges are not loaded.
pub trait Hydrate: SecurityEntity + Sized {
    fn hydrate<S: SecurityStore + ?Sized>(store: &S, record: EntityRecord) -> Result<Self>;
}

/// Resolve an edge endpoint; a missing endpoint means the store is corrupt
fn endpoint<S: SecurityStore + ?Sized>(
    store: &S,
    kind: EntityKind,
    id: EntityId,
) -> Result<EntityRecord> {
    store.find_by_id(kind, id)?.ok_or_else(|| {
        SecurityError::data_backend(format!("Dangling edge to {} {}", kind, id))
    })
}

fn attach<T: SecurityEntity, S: SecurityStore + ?Sized>(
    store: &S,
    set: &mut SecuritySet<T>,
    id: EntityId,
) -> Result<()> {
    let record = endpoint(store, T::KIND, id)?;
    set.add(T::from_record(record))?;
    Ok(())
}

fn join_entity<S: SecurityStore + ?Sized>(
    store: &S,
    user: EntityId,
    group: EntityId,
    role: EntityId,
) -> Result<TurbineUserGroupRole> {
    Ok(TurbineUserGroupRole::new(
        endpoint(store, EntityKind::User, user)?,
        endpoint(store, EntityKind::Group, group)?,
        endpoint(store, EntityKind::Role, role)?,
    ))
}

impl Hydrate for User {
    fn hydrate<S: SecurityStore + ?Sized>(store: &S, record: EntityRecord) -> Result<Self> {
        let mut user = User::from_record(record);
        let credentials = store.load_credentials(user.id())?;
        user.password = credentials.password;
        user.last_login = credentials.last_login;

        for edge in store.load_edges_for(EntityKind::User, user.id())? {
            match edge {
                Edge::UserGroup { group, .. } => attach(store, &mut user.groups, group)?,
                Edge::UserRole { role, .. } => attach(store, &mut user.roles, role)?,
                Edge::UserGroupRole {
                    user: u,
                    group,
                    role,
                } => user
                    .user_group_roles
                    .push(join_entity(store, u, group, role)?),
                Edge::Delegation {
                    delegator,
                    delegatee,
                } => {
                    if delegatee == user.id() {
                        attach(store, &mut user.delegators, delegator)?;
                    } else {
                        attach(store, &mut user.delegatees, delegatee)?;
                    }
                }
                Edge::GroupRole { .. } | Edge::RolePermission { .. } => {}
            }
        }
        Ok(user)
    }
}

impl Hydrate for Group {
    fn hydrate<S: SecurityStore + ?Sized>(store: &S, record: EntityRecord) -> Result<Self> {
        let mut group = Group::from_record(record);
        for edge in store.load_edges_for(EntityKind::Group, group.id())? {
            match edge {
                Edge::UserGroup { user, .. } => attach(store, &mut group.users, user)?,
                Edge::GroupRole { role, .. } => attach(store, &mut group.roles, role)?,
                Edge::UserGroupRole {
                    user,
                    group: g,
                    role,
                } => group
                    .user_group_roles
                    .push(join_entity(store, user, g, role)?),
                _ => {}
            }
        }
        Ok(group)
    }
}

impl Hydrate for Role {
    fn hydrate<S: SecurityStore + ?Sized>(store: &S, record: EntityRecord) -> Result<Self> {
        let mut role = Role::from_record(record);
        for edge in store.load_edges_for(EntityKind::Role, role.id())? {
            match edge {
                Edge::RolePermission { permission, .. } => {
                    attach(store, &mut role.permissions, permission)?
                }
                Edge::GroupRole { group, .. } => attach(store, &mut role.groups, group)?,
                Edge::UserRole { user, .. } => attach(store, &mut role.users, user)?,
                Edge::UserGroupRole {
                    user,
                    group,
                    role: r,
                } => role
                    .user_group_roles
                    .push(join_entity(store, user, group, r)?),
                _ => {}
            }
        }
        Ok(role)
    }
}

impl Hydrate for Permission {
    fn hydrate<S: SecurityStore + ?Sized>(store: &S, record: EntityRecord) -> Result<Self> {
        let mut permission = Permission::from_record(record);
        for edge in store.load_edges_for(EntityKind::Permission, permission.id())? {
            if let Edge::RolePermission { role, .. } = edge {
                attach(store, &mut permission.roles, role)?;
            }
        }
        Ok(permission)
    }
}

/// Typed finders over any `SecurityStore`
pub trait StoreExt: SecurityStore {
    /// Load an entity by name, failing with `UnknownEntity` if absent
    fn find_entity_by_name<E: Hydrate>(&self, name: &str) -> Result<E> {
        let record = self.find_by_name(E::KIND, name)?.ok_or_else(|| {
            SecurityError::unknown_entity(format!("{} '{}'", E::KIND, name))
        })?;
        E::hydrate(self, record)
    }

    /// Load an entity by id, failing with `UnknownEntity` if absent
    fn find_entity_by_id<E: Hydrate>(&self, id: EntityId) -> Result<E> {
        let record = self
            .find_by_id(E::KIND, id)?
            .ok_or_else(|| SecurityError::unknown_entity(format!("{} {}", E::KIND, id)))?;
        E::hydrate(self, record)
    }

    fn all_entities<E: Hydrate>(&self) -> Result<SecuritySet<E>> {
        let mut set = SecuritySet::new();
        for record in self.list(E::KIND)? {
            set.add(E::hydrate(self, record)?)?;
        }
        Ok(set)
    }

    fn find_user_by_name(&self, name: &str) -> Result<User> {
        self.find_entity_by_name(name)
    }

    fn find_group_by_name(&self, name: &str) -> Result<Group> {
        self.find_entity_by_name(name)
    }

    fn find_role_by_name(&self, name: &str) -> Result<Role> {
        self.find_entity_by_name(name)
    }

    fn find_permission_by_name(&self, name: &str) -> Result<Permission> {
        self.find_entity_by_name(name)
    }

    fn find_role_by_id(&self, id: EntityId) -> Result<Role> {
        self.find_entity_by_id(id)
    }

    fn find_user_by_id(&self, id: EntityId) -> Result<User> {
        self.find_entity_by_id(id)
    }
}

impl<S: SecurityStore + ?Sized> StoreExt for S {}

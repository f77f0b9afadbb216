//! ACL factories, one per model

use super::{AccessControlList, BasicAcl, DynamicAcl, TurbineAcl};
use crate::core::models::{EntityId, Group, ModelKind, Named, Role, SecurityEntity, User, name_key};
use crate::core::sets::{RoleSet, UserSet};
use crate::storage::{SecurityStore, StoreExt};
use crate::utils::error::{Result, SecurityError};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use tracing::debug;

/// Builds the ACL of the active model for a user whose direct edges are loaded
pub trait AclFactory: Send + Sync {
    fn model(&self) -> ModelKind;

    fn access_control_list(&self, user: &User) -> Result<Arc<dyn AccessControlList>>;
}

/// Pick the factory for a configured model
pub fn create_acl_factory(
    model: ModelKind,
    store: Arc<dyn SecurityStore>,
    global_group: &str,
) -> Arc<dyn AclFactory> {
    match model {
        ModelKind::Basic => Arc::new(BasicAclFactory::new(store)),
        ModelKind::Dynamic => Arc::new(DynamicAclFactory::new(store)),
        ModelKind::Turbine => Arc::new(TurbineAclFactory::new(store, global_group)),
    }
}

/// An edge pointing at a vanished entity means the backend is inconsistent
fn load_failure(what: &str, error: SecurityError) -> SecurityError {
    if error.is_unknown_entity() {
        SecurityError::data_backend(format!("Failed to load {}: {}", what, error))
    } else {
        error
    }
}

/// Snapshots are only built for users the store still knows
fn ensure_known(store: &dyn SecurityStore, user: &User) -> Result<()> {
    if store.find_by_id(User::KIND, user.id())?.is_some() {
        Ok(())
    } else {
        Err(SecurityError::unknown_entity(user.describe()))
    }
}

/// Roles with their permissions, loaded once per build
struct RoleCache<'a> {
    store: &'a dyn SecurityStore,
    roles: HashMap<EntityId, Role>,
}

impl<'a> RoleCache<'a> {
    fn new(store: &'a dyn SecurityStore) -> Self {
        Self {
            store,
            roles: HashMap::new(),
        }
    }

    fn get(&mut self, id: EntityId) -> Result<Role> {
        if let Some(role) = self.roles.get(&id) {
            return Ok(role.clone());
        }
        let role = self
            .store
            .find_role_by_id(id)
            .map_err(|e| load_failure("role", e))?;
        self.roles.insert(id, role.clone());
        Ok(role)
    }
}

/// Factory for the Basic model
pub struct BasicAclFactory {
    store: Arc<dyn SecurityStore>,
}

impl BasicAclFactory {
    pub fn new(store: Arc<dyn SecurityStore>) -> Self {
        Self { store }
    }

    pub fn build(&self, user: &User) -> Result<BasicAcl> {
        ensure_known(self.store.as_ref(), user)?;
        debug!(user = %user.name(), groups = user.groups.len(), "Built basic ACL");
        Ok(BasicAcl::new(user.record(), user.groups.clone()))
    }
}

impl AclFactory for BasicAclFactory {
    fn model(&self) -> ModelKind {
        ModelKind::Basic
    }

    fn access_control_list(&self, user: &User) -> Result<Arc<dyn AccessControlList>> {
        Ok(Arc::new(self.build(user)?))
    }
}

/// Factory for the Dynamic model
pub struct DynamicAclFactory {
    store: Arc<dyn SecurityStore>,
}

impl DynamicAclFactory {
    pub fn new(store: Arc<dyn SecurityStore>) -> Self {
        Self { store }
    }

    /// The user followed by every transitive delegator, each loaded once
    fn principals(&self, user: &User) -> Result<Vec<User>> {
        let mut seen: HashSet<EntityId> = HashSet::from([user.id()]);
        let mut queue: VecDeque<EntityId> = user.delegators.ids().into_iter().collect();
        let mut principals = vec![user.clone()];

        while let Some(id) = queue.pop_front() {
            if !seen.insert(id) {
                continue;
            }
            let delegator = self
                .store
                .find_user_by_id(id)
                .map_err(|e| load_failure("delegator", e))?;
            queue.extend(delegator.delegators.ids());
            principals.push(delegator);
        }
        Ok(principals)
    }

    pub fn build(&self, user: &User) -> Result<DynamicAcl> {
        ensure_known(self.store.as_ref(), user)?;
        let mut cache = RoleCache::new(self.store.as_ref());
        let mut roles = RoleSet::new();
        let mut group_roles: HashMap<String, RoleSet> = HashMap::new();
        let principals = self.principals(user)?;

        for (position, principal) in principals.iter().enumerate() {
            for role in &principal.roles {
                roles.add(cache.get(role.id())?)?;
            }
            for group in &principal.groups {
                let group: Group = self
                    .store
                    .find_entity_by_id(group.id())
                    .map_err(|e| load_failure("group", e))?;
                for role in &group.roles {
                    let role = cache.get(role.id())?;
                    if position == 0 {
                        group_roles
                            .entry(name_key(group.name()))
                            .or_default()
                            .add(role.clone())?;
                    }
                    roles.add(role)?;
                }
            }
        }

        let delegators = UserSet::try_from_iter(
            principals
                .into_iter()
                .skip(1)
                .map(|principal| User::from_record(principal.record())),
        )?;

        debug!(
            user = %user.name(),
            roles = roles.len(),
            delegators = delegators.len(),
            "Built dynamic ACL"
        );
        DynamicAcl::new(
            user.record(),
            user.groups.clone(),
            roles,
            group_roles,
            delegators,
        )
    }
}

impl AclFactory for DynamicAclFactory {
    fn model(&self) -> ModelKind {
        ModelKind::Dynamic
    }

    fn access_control_list(&self, user: &User) -> Result<Arc<dyn AccessControlList>> {
        Ok(Arc::new(self.build(user)?))
    }
}

/// Factory for the Turbine model
pub struct TurbineAclFactory {
    store: Arc<dyn SecurityStore>,
    global_group: String,
}

impl TurbineAclFactory {
    pub fn new<S: Into<String>>(store: Arc<dyn SecurityStore>, global_group: S) -> Self {
        Self {
            store,
            global_group: global_group.into(),
        }
    }

    pub fn build(&self, user: &User) -> Result<TurbineAcl> {
        ensure_known(self.store.as_ref(), user)?;
        let mut cache = RoleCache::new(self.store.as_ref());
        let mut assignments = Vec::with_capacity(user.user_group_roles.len());

        for assignment in &user.user_group_roles {
            let role = cache.get(assignment.role.id)?;
            assignments.push((Group::from_record(assignment.group.clone()), role));
        }

        debug!(
            user = %user.name(),
            assignments = assignments.len(),
            "Built turbine ACL"
        );
        TurbineAcl::new(user.record(), assignments, self.global_group.clone())
    }
}

impl AclFactory for TurbineAclFactory {
    fn model(&self) -> ModelKind {
        ModelKind::Turbine
    }

    fn access_control_list(&self, user: &User) -> Result<Arc<dyn AccessControlList>> {
        Ok(Arc::new(self.build(user)?))
    }
}

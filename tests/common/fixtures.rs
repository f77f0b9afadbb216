//! Graph fixtures
//!
//! Every fixture owns a fresh [`MemoryStore`]. All helpers go through the
//! public managers, so fixtures exercise the same paths as callers do.

use aclgraph::storage::MemoryStore;
use aclgraph::{
    AccessControlList, AuthenticatorKind, Group, ModelKind, Named, Permission, Role,
    SecurityConfig, SecurityService, User,
};
use std::sync::Arc;

/// Default password given to fixture users
pub const PASSWORD: &str = "password123";

pub struct TestGraph {
    pub store: Arc<MemoryStore>,
    pub service: SecurityService,
}

impl TestGraph {
    pub fn new(model: ModelKind) -> Self {
        Self::with_config(SecurityConfig {
            model,
            ..SecurityConfig::default()
        })
    }

    pub fn with_config(config: SecurityConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        let service = SecurityService::with_store(config, store.clone()).unwrap();
        Self { store, service }
    }

    pub fn with_authenticator(model: ModelKind, authenticator: AuthenticatorKind) -> Self {
        Self::with_config(SecurityConfig {
            model,
            authenticator,
            ..SecurityConfig::default()
        })
    }

    pub fn user(&self, name: &str) -> User {
        self.service.users().add_user(name, PASSWORD).unwrap()
    }

    pub fn group(&self, name: &str) -> Group {
        self.service.groups().add(name).unwrap()
    }

    pub fn role(&self, name: &str) -> Role {
        self.service.roles().add(name).unwrap()
    }

    pub fn permission(&self, name: &str) -> Permission {
        self.service.permissions().add(name).unwrap()
    }

    /// Role owning the given permissions, created under any model that has roles
    pub fn role_with(&self, name: &str, permissions: &[&str]) -> Role {
        let role = self.role(name);
        for permission in permissions {
            let permission = self.permission(permission);
            let granted = match self.service.model() {
                ModelKind::Dynamic => self.service.dynamic().unwrap().grant_permission(&role, &permission),
                ModelKind::Turbine => self.service.turbine().unwrap().grant_permission(&role, &permission),
                ModelKind::Basic => panic!("the basic model has no roles"),
            };
            granted.unwrap();
        }
        role
    }

    /// Re-read a user with their current edges
    pub fn reload(&self, user: &User) -> User {
        self.service.users().get_user_by_id(user.id()).unwrap()
    }

    /// Fresh snapshot for a user
    pub fn acl(&self, user: &User) -> Arc<dyn AccessControlList> {
        self.service.access_control_list(&self.reload(user)).unwrap()
    }
}

//! Security service
//!
//! Wires a store, the configured model manager, the entity managers, the
//! ACL factory and the authenticator into one handle, and keeps a registry
//! of logged-in sessions.

mod models;
mod seed;
mod session;

pub use models::ModelManagers;
pub use seed::{SeedGrant, SeedGraph, SeedSummary, SeedUser};
pub use session::{Session, SessionRegistry};

use crate::auth::create_authenticator;
use crate::config::{Config, SecurityConfig, Validate};
use crate::core::acl::{AccessControlList, AclFactory, create_acl_factory};
use crate::core::entity_manager::{GroupManager, PermissionManager, RoleManager, UserManager};
use crate::core::model_manager::{BasicModelManager, DynamicModelManager, TurbineModelManager};
use crate::core::models::{ModelKind, Named, User};
use crate::storage::{MemoryStore, SecurityStore};
use crate::utils::error::{Result, SecurityError};
use crate::utils::logging::SecurityLogger;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Entry point to the authorization engine
pub struct SecurityService {
    config: SecurityConfig,
    store: Arc<dyn SecurityStore>,
    models: ModelManagers,
    users: UserManager,
    groups: GroupManager,
    roles: RoleManager,
    permissions: PermissionManager,
    acl_factory: Arc<dyn AclFactory>,
    sessions: SessionRegistry,
}

impl SecurityService {
    /// Build a service over a fresh [`MemoryStore`], applying the configured
    /// seed graph if there is one
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let security = config.security().clone();
        let seed = security.seed.clone();
        let service = Self::with_store(security, Arc::new(MemoryStore::new()))?;

        if let Some(path) = seed {
            let graph = SeedGraph::from_file(&path)?;
            let summary = service.apply_seed(&graph)?;
            info!(
                "Seed graph {:?} applied: {} entities, {} grants",
                path, summary.entities, summary.grants
            );
        }

        Ok(service)
    }

    /// Build a service over an existing store. Fails with `Config` if the
    /// security section does not validate.
    pub fn with_store(config: SecurityConfig, store: Arc<dyn SecurityStore>) -> Result<Self> {
        config
            .validate()
            .map_err(|e| SecurityError::config(format!("Security config error: {}", e)))?;

        let models = ModelManagers::new(config.model, Arc::clone(&store), &config.global_group);
        let model_manager = models.as_model_manager();
        let authenticator = create_authenticator(config.authenticator);
        let acl_factory = create_acl_factory(config.model, Arc::clone(&store), &config.global_group);

        info!(
            "Security service ready: model={}, authenticator={}",
            config.model, config.authenticator
        );

        Ok(Self {
            users: UserManager::new(Arc::clone(&store), Arc::clone(&model_manager), authenticator),
            groups: GroupManager::new(Arc::clone(&store), Arc::clone(&model_manager)),
            roles: RoleManager::new(Arc::clone(&store), Arc::clone(&model_manager)),
            permissions: PermissionManager::new(Arc::clone(&store), model_manager),
            config,
            store,
            models,
            acl_factory,
            sessions: SessionRegistry::new(),
        })
    }

    pub fn config(&self) -> &SecurityConfig {
        &self.config
    }

    pub fn model(&self) -> ModelKind {
        self.config.model
    }

    pub fn store(&self) -> &Arc<dyn SecurityStore> {
        &self.store
    }

    pub fn model_managers(&self) -> &ModelManagers {
        &self.models
    }

    /// The Basic model manager. Fails with `AccessControl` under another model.
    pub fn basic(&self) -> Result<&BasicModelManager> {
        self.models.basic()
    }

    /// The Dynamic model manager. Fails with `AccessControl` under another model.
    pub fn dynamic(&self) -> Result<&DynamicModelManager> {
        self.models.dynamic()
    }

    /// The Turbine model manager. Fails with `AccessControl` under another model.
    pub fn turbine(&self) -> Result<&TurbineModelManager> {
        self.models.turbine()
    }

    pub fn users(&self) -> &UserManager {
        &self.users
    }

    pub fn groups(&self) -> &GroupManager {
        &self.groups
    }

    pub fn roles(&self) -> &RoleManager {
        &self.roles
    }

    pub fn permissions(&self) -> &PermissionManager {
        &self.permissions
    }

    pub fn acl_factory(&self) -> &Arc<dyn AclFactory> {
        &self.acl_factory
    }

    /// Snapshot of the user's permissions under the active model
    pub fn access_control_list(&self, user: &User) -> Result<Arc<dyn AccessControlList>> {
        self.acl_factory.access_control_list(user)
    }

    /// Look a user up by name and build their ACL without authenticating
    pub fn access_control_list_for(&self, name: &str) -> Result<Arc<dyn AccessControlList>> {
        let user = self.users.get_user(name)?;
        self.access_control_list(&user)
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Authenticate and open a session holding a fresh ACL
    pub fn login(&self, name: &str, password: &str) -> Result<Session> {
        let user = self.users.get_user_with_password(name, password)?;
        let acl = self.access_control_list(&user)?;
        let session = Session::new(user, acl);
        let open = self.sessions.insert(session.clone());
        SecurityLogger::log_session_event("login", session.user.name(), open);
        Ok(session)
    }

    pub fn session(&self, id: Uuid) -> Option<Session> {
        self.sessions.get(id)
    }

    /// Close a session. Returns false if it was not open.
    pub fn logout(&self, id: Uuid) -> bool {
        match self.sessions.remove(id) {
            Some(session) => {
                let open = self.sessions.count_for(session.user.id());
                SecurityLogger::log_session_event("logout", session.user.name(), open);
                true
            }
            None => false,
        }
    }

    /// Drop every session of a user, e.g. after an administrative change
    /// to their grants. Returns the number of sessions closed.
    pub fn invalidate_user(&self, name: &str) -> usize {
        let closed = self.sessions.remove_user_name(name);
        if closed > 0 {
            SecurityLogger::log_session_event("invalidated", name, closed);
        }
        closed
    }

    /// Re-derive a session's user and ACL from the current graph.
    /// A session whose user has been removed is closed.
    pub fn refresh(&self, id: Uuid) -> Result<Session> {
        let current = self
            .sessions
            .get(id)
            .ok_or_else(|| SecurityError::unknown_entity(format!("session {}", id)))?;

        let user = match self.users.get_user_by_id(current.user.id()) {
            Ok(user) => user,
            Err(e) if e.is_unknown_entity() => {
                self.sessions.remove(id);
                SecurityLogger::log_session_event("expired", current.user.name(), 0);
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        let acl = self.access_control_list(&user)?;
        let refreshed = current.refreshed(user, acl);
        self.sessions.replace(refreshed.clone());
        SecurityLogger::log_session_event(
            "refreshed",
            refreshed.user.name(),
            self.sessions.count_for(refreshed.user.id()),
        );
        Ok(refreshed)
    }

    /// Create the entities and grants described by a seed graph
    pub fn apply_seed(&self, graph: &SeedGraph) -> Result<SeedSummary> {
        seed::apply(self, graph)
    }
}

impl std::fmt::Debug for SecurityService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityService")
            .field("config", &self.config)
            .field("sessions", &self.sessions.len())
            .finish()
    }
}

//! User manager with credential handling

use super::EntityManager;
use crate::auth::Authenticator;
use crate::core::model_manager::ModelManager;
use crate::core::models::{EntityId, Named, SecurityEntity, User};
use crate::core::sets::UserSet;
use crate::storage::{Credentials, SecurityStore};
use crate::utils::error::{Result, SecurityError};
use crate::utils::logging::SecurityLogger;
use chrono::Utc;
use std::sync::Arc;

/// Users plus their credentials, checked through the configured authenticator
#[derive(Clone)]
pub struct UserManager {
    entities: EntityManager<User>,
    authenticator: Arc<dyn Authenticator>,
}

impl UserManager {
    pub fn new(
        store: Arc<dyn SecurityStore>,
        model_manager: Arc<dyn ModelManager>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        Self {
            entities: EntityManager::new(store, model_manager),
            authenticator,
        }
    }

    pub fn authenticator(&self) -> &Arc<dyn Authenticator> {
        &self.authenticator
    }

    /// Create a user with an initial password
    pub fn add_user(&self, name: &str, password: &str) -> Result<User> {
        let mut user = self.entities.add(name)?;
        let encoded = self.authenticator.encode_password(password)?;
        self.entities.store().save_credentials(
            user.id(),
            &Credentials {
                password: Some(encoded.clone()),
                last_login: None,
            },
        )?;
        user.password = Some(encoded);
        Ok(user)
    }

    pub fn get_user(&self, name: &str) -> Result<User> {
        self.entities.get_by_name(name)
    }

    pub fn get_user_by_id(&self, id: EntityId) -> Result<User> {
        self.entities.get_by_id(id)
    }

    pub fn all(&self) -> Result<UserSet> {
        self.entities.all()
    }

    pub fn check_exists(&self, name: &str) -> Result<bool> {
        self.entities.check_exists(name)
    }

    pub fn rename(&self, user: &User, name: &str) -> Result<User> {
        self.entities.rename(user, name)
    }

    pub fn remove(&self, user: &User) -> Result<usize> {
        self.entities.remove(user)
    }

    /// Fails with `PasswordMismatch` if the credential does not match
    pub fn authenticate(&self, user: &User, password: &str) -> Result<()> {
        if self.authenticator.authenticate(user, password)? {
            SecurityLogger::log_auth_event(user.name(), true, None);
            Ok(())
        } else {
            SecurityLogger::log_auth_event(user.name(), false, Some("password mismatch"));
            Err(SecurityError::password_mismatch(format!(
                "Invalid credentials for user '{}'",
                user.name()
            )))
        }
    }

    /// Look up and authenticate a user, recording the login time
    pub fn get_user_with_password(&self, name: &str, password: &str) -> Result<User> {
        let mut user = self.get_user(name)?;
        self.authenticate(&user, password)?;
        user.last_login = Some(self.record_login(&user)?);
        Ok(user)
    }

    /// Replace the password after checking the current one
    pub fn change_password(
        &self,
        user: &User,
        old_password: &str,
        new_password: &str,
    ) -> Result<()> {
        let stored = self.get_user_by_id(user.id())?;
        self.authenticate(&stored, old_password)?;
        self.force_password(&stored, new_password)
    }

    /// Replace the password without checking the current one
    pub fn force_password(&self, user: &User, new_password: &str) -> Result<()> {
        let store = self.entities.store();
        let mut credentials = store.load_credentials(user.id())?;
        credentials.password = Some(self.authenticator.encode_password(new_password)?);
        store.save_credentials(user.id(), &credentials)?;
        SecurityLogger::log_entity_event("password_changed", User::KIND, user.name());
        Ok(())
    }

    fn record_login(&self, user: &User) -> Result<chrono::DateTime<Utc>> {
        let store = self.entities.store();
        let mut credentials = store.load_credentials(user.id())?;
        let now = Utc::now();
        credentials.last_login = Some(now);
        store.save_credentials(user.id(), &credentials)?;
        Ok(now)
    }

    /// The unauthenticated principal. It is never stored.
    pub fn anonymous_user(&self) -> User {
        User::anonymous()
    }
}

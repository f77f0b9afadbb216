//! Generic entity manager

use crate::core::model_manager::{EntityRef, ModelManager};
use crate::core::models::{EntityId, Named, validate_name};
use crate::core::sets::SecuritySet;
use crate::storage::{Hydrate, SecurityStore, StoreExt};
use crate::utils::error::{Result, SecurityError};
use crate::utils::logging::SecurityLogger;
use std::marker::PhantomData;
use std::sync::Arc;

/// Lifecycle operations for one entity type
pub struct EntityManager<E> {
    store: Arc<dyn SecurityStore>,
    model_manager: Arc<dyn ModelManager>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for EntityManager<E> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            model_manager: Arc::clone(&self.model_manager),
            _entity: PhantomData,
        }
    }
}

impl<E: Hydrate> EntityManager<E> {
    pub fn new(store: Arc<dyn SecurityStore>, model_manager: Arc<dyn ModelManager>) -> Self {
        Self {
            store,
            model_manager,
            _entity: PhantomData,
        }
    }

    pub(crate) fn store(&self) -> &dyn SecurityStore {
        self.store.as_ref()
    }

    /// Create a new entity. Fails with `EntityExists` if the name is taken
    /// (case-insensitively) and with `DataBackend` if it is blank.
    pub fn add(&self, name: &str) -> Result<E> {
        validate_name(name)?;
        if self.check_exists(name)? {
            return Err(SecurityError::entity_exists(format!("{} '{}'", E::KIND, name)));
        }
        let record = self.store.create_entity(E::KIND, name)?;
        SecurityLogger::log_entity_event("created", E::KIND, name);
        E::hydrate(self.store.as_ref(), record)
    }

    pub fn get_by_name(&self, name: &str) -> Result<E> {
        self.store.find_entity_by_name(name)
    }

    pub fn get_by_id(&self, id: EntityId) -> Result<E> {
        self.store.find_entity_by_id(id)
    }

    /// Every entity of this type
    pub fn all(&self) -> Result<SecuritySet<E>> {
        self.store.all_entities()
    }

    pub fn check_exists(&self, name: &str) -> Result<bool> {
        Ok(self.store.find_by_name(E::KIND, name)?.is_some())
    }

    pub fn check_exists_id(&self, id: EntityId) -> Result<bool> {
        Ok(self.store.find_by_id(E::KIND, id)?.is_some())
    }

    /// Give an entity a new name; the old name becomes free
    pub fn rename(&self, entity: &E, name: &str) -> Result<E> {
        validate_name(name)?;
        let record = self.store.rename_entity(E::KIND, entity.id(), name)?;
        SecurityLogger::log_entity_event("renamed", E::KIND, name);
        E::hydrate(self.store.as_ref(), record)
    }

    /// Revoke every grant touching the entity, then delete it.
    /// Returns the number of grants revoked.
    pub fn remove(&self, entity: &E) -> Result<usize> {
        let revoked = self.model_manager.revoke_all(EntityRef::of(entity))?;
        self.store.delete_entity(E::KIND, entity.id())?;
        SecurityLogger::log_entity_event("removed", E::KIND, entity.name());
        Ok(revoked)
    }
}

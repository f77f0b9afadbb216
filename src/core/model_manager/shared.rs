//! Validation and locking shared by the model managers

use crate::core::models::{EntityId, EntityKind, ModelKind, SecurityEntity};
use crate::storage::{Edge, SecurityStore};
use crate::utils::error::{Result, SecurityError};
use crate::utils::logging::SecurityLogger;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Borrowed reference to an edge endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityRef<'a> {
    pub kind: EntityKind,
    pub id: EntityId,
    pub name: &'a str,
}

impl<'a> EntityRef<'a> {
    pub fn of<E: SecurityEntity>(entity: &'a E) -> Self {
        Self {
            kind: E::KIND,
            id: entity.id(),
            name: entity.name(),
        }
    }
}

impl fmt::Display for EntityRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.name)
    }
}

fn subject(endpoints: &[EntityRef<'_>]) -> String {
    endpoints
        .iter()
        .map(|endpoint| endpoint.name)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Store handle plus the mutual-exclusion scope held for each mutation
pub(crate) struct ManagerCore {
    model: ModelKind,
    store: Arc<dyn SecurityStore>,
    lock: Mutex<()>,
}

impl fmt::Debug for ManagerCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagerCore")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl ManagerCore {
    pub(crate) fn new(model: ModelKind, store: Arc<dyn SecurityStore>) -> Self {
        Self {
            model,
            store,
            lock: Mutex::new(()),
        }
    }

    pub(crate) fn model(&self) -> ModelKind {
        self.model
    }

    pub(crate) fn store(&self) -> &dyn SecurityStore {
        self.store.as_ref()
    }

    fn require(&self, endpoint: &EntityRef<'_>) -> Result<()> {
        match self.store.find_by_id(endpoint.kind, endpoint.id)? {
            Some(_) => Ok(()),
            None => Err(SecurityError::unknown_entity(endpoint.to_string())),
        }
    }

    /// Validate every endpoint, then run `f`, all under the manager lock
    pub(crate) fn locked<T, F>(&self, endpoints: &[EntityRef<'_>], f: F) -> Result<T>
    where
        F: FnOnce(&dyn SecurityStore) -> Result<T>,
    {
        let _guard = self.lock.lock();
        for endpoint in endpoints {
            self.require(endpoint)?;
        }
        f(self.store.as_ref())
    }

    /// Create an edge; `Ok(false)` if it was already there
    pub(crate) fn grant(&self, edge: Edge, endpoints: &[EntityRef<'_>]) -> Result<bool> {
        let created = self.locked(endpoints, |store| store.persist_edge(&edge))?;
        SecurityLogger::log_grant(self.model, edge.label(), &subject(endpoints), created);
        Ok(created)
    }

    /// Remove an edge; `Ok(false)` if there was nothing to remove
    pub(crate) fn revoke(&self, edge: Edge, endpoints: &[EntityRef<'_>]) -> Result<bool> {
        let removed = self.locked(endpoints, |store| store.delete_edge(&edge))?;
        SecurityLogger::log_revoke(self.model, edge.label(), &subject(endpoints), removed);
        Ok(removed)
    }

    /// Remove an edge that must exist
    pub(crate) fn revoke_existing(&self, edge: Edge, endpoints: &[EntityRef<'_>]) -> Result<()> {
        if self.revoke(edge, endpoints)? {
            Ok(())
        } else {
            Err(SecurityError::unknown_entity(format!(
                "No {} between {}",
                edge.label(),
                subject(endpoints)
            )))
        }
    }

    /// Remove every edge touching `entity` that `filter` accepts
    pub(crate) fn revoke_all<F>(&self, entity: EntityRef<'_>, filter: F) -> Result<usize>
    where
        F: Fn(&Edge) -> bool,
    {
        let removed = self.locked(&[entity], |store| {
            let mut removed = 0;
            for edge in store.load_edges_for(entity.kind, entity.id)? {
                if filter(&edge) && store.delete_edge(&edge)? {
                    removed += 1;
                }
            }
            Ok(removed)
        })?;
        SecurityLogger::log_revoke_all(self.model, entity.kind, entity.name, removed);
        Ok(removed)
    }
}

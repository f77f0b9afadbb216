//! Model managers
//!
//! The only mutation surface for graph edges. Every call validates its
//! endpoints before touching the store and runs under a per-manager lock,
//! so a grant or revoke is never observed half-applied.
//!
//! Granting an existing edge and revoking a missing one are both no-ops.
//! An endpoint the store does not know is always `UnknownEntity`.

mod basic;
mod dynamic;
mod shared;
mod turbine;

pub use basic::BasicModelManager;
pub use dynamic::DynamicModelManager;
pub use shared::EntityRef;
pub use turbine::TurbineModelManager;

use crate::core::models::{ModelKind, SecurityEntity};
use crate::utils::error::Result;

/// Operations shared by the three model managers
pub trait ModelManager: Send + Sync {
    fn model(&self) -> ModelKind;

    /// Remove every edge touching the entity, ahead of deleting it.
    /// Returns the number of edges removed.
    fn revoke_all(&self, entity: EntityRef<'_>) -> Result<usize>;

    fn revoke_all_for<E: SecurityEntity>(&self, entity: &E) -> Result<usize>
    where
        Self: Sized,
    {
        self.revoke_all(EntityRef::of(entity))
    }
}

//! Storage layer
//!
//! The authorization core reaches entities, edges and credentials only
//! through [`SecurityStore`]. [`MemoryStore`] is the bundled backend.

mod hydrate;
mod memory;
mod store;

pub use hydrate::{Hydrate, StoreExt};
pub use memory::MemoryStore;
pub use store::{Credentials, Edge, SecurityStore};

#[cfg(test)]
pub use store::MockSecurityStore;

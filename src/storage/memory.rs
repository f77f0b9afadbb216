//! In-memory storage backend

use super::store::{Credentials, Edge, SecurityStore};
use crate::core::models::{EntityId, EntityKind, EntityRecord};
use crate::core::sets::SecuritySet;
use crate::utils::error::{Result, SecurityError};
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// Edge table indexed by endpoint. Sequence numbers preserve creation order.
#[derive(Debug, Default)]
struct EdgeIndex {
    next_seq: u64,
    edges: BTreeMap<u64, Edge>,
    seq_of: HashMap<Edge, u64>,
    by_endpoint: HashMap<EntityId, BTreeSet<u64>>,
}

impl EdgeIndex {
    fn insert(&mut self, edge: Edge) -> bool {
        if self.seq_of.contains_key(&edge) {
            return false;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        for (_, id) in edge.endpoints() {
            self.by_endpoint.entry(id).or_default().insert(seq);
        }
        self.edges.insert(seq, edge);
        self.seq_of.insert(edge, seq);
        true
    }

    fn remove(&mut self, edge: &Edge) -> bool {
        let Some(seq) = self.seq_of.remove(edge) else {
            return false;
        };
        self.edges.remove(&seq);
        for (_, id) in edge.endpoints() {
            if let Some(seqs) = self.by_endpoint.get_mut(&id) {
                seqs.remove(&seq);
                if seqs.is_empty() {
                    self.by_endpoint.remove(&id);
                }
            }
        }
        true
    }

    fn touching(&self, id: EntityId) -> Vec<Edge> {
        self.by_endpoint
            .get(&id)
            .map(|seqs| {
                seqs.iter()
                    .filter_map(|seq| self.edges.get(seq).copied())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn len(&self) -> usize {
        self.edges.len()
    }
}

#[derive(Debug, Default)]
struct Graph {
    users: SecuritySet<EntityRecord>,
    groups: SecuritySet<EntityRecord>,
    roles: SecuritySet<EntityRecord>,
    permissions: SecuritySet<EntityRecord>,
    credentials: HashMap<EntityId, Credentials>,
    edges: EdgeIndex,
}

impl Graph {
    fn table(&self, kind: EntityKind) -> &SecuritySet<EntityRecord> {
        match kind {
            EntityKind::User => &self.users,
            EntityKind::Group => &self.groups,
            EntityKind::Role => &self.roles,
            EntityKind::Permission => &self.permissions,
        }
    }

    fn table_mut(&mut self, kind: EntityKind) -> &mut SecuritySet<EntityRecord> {
        match kind {
            EntityKind::User => &mut self.users,
            EntityKind::Group => &mut self.groups,
            EntityKind::Role => &mut self.roles,
            EntityKind::Permission => &mut self.permissions,
        }
    }

    fn require(&self, kind: EntityKind, id: EntityId) -> Result<&EntityRecord> {
        self.table(kind)
            .get_by_id(id)
            .ok_or_else(|| SecurityError::unknown_entity(format!("{} {}", kind, id)))
    }

    fn require_endpoints(&self, edge: &Edge) -> Result<()> {
        for (kind, id) in edge.endpoints() {
            self.require(kind, id)?;
        }
        Ok(())
    }
}

/// Thread-safe in-memory `SecurityStore`
#[derive(Debug, Default)]
pub struct MemoryStore {
    graph: RwLock<Graph>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entities of a kind
    pub fn count(&self, kind: EntityKind) -> usize {
        self.graph.read().table(kind).len()
    }

    /// Total number of edges
    pub fn edge_count(&self) -> usize {
        self.graph.read().edges.len()
    }
}

impl SecurityStore for MemoryStore {
    fn find_by_name(&self, kind: EntityKind, name: &str) -> Result<Option<EntityRecord>> {
        Ok(self.graph.read().table(kind).get_by_name(name).cloned())
    }

    fn find_by_id(&self, kind: EntityKind, id: EntityId) -> Result<Option<EntityRecord>> {
        Ok(self.graph.read().table(kind).get_by_id(id).cloned())
    }

    fn list(&self, kind: EntityKind) -> Result<Vec<EntityRecord>> {
        Ok(self.graph.read().table(kind).iter().cloned().collect())
    }

    fn create_entity(&self, kind: EntityKind, name: &str) -> Result<EntityRecord> {
        let record = EntityRecord::new(EntityId::new(), name);
        let mut graph = self.graph.write();
        graph
            .table_mut(kind)
            .add(record.clone())
            .map_err(|_| SecurityError::entity_exists(format!("{} '{}'", kind, name)))?;
        if kind == EntityKind::User {
            graph.credentials.insert(record.id, Credentials::default());
        }
        debug!(kind = %kind, name = %name, id = %record.id, "Entity created");
        Ok(record)
    }

    fn rename_entity(&self, kind: EntityKind, id: EntityId, name: &str) -> Result<EntityRecord> {
        let mut graph = self.graph.write();
        let table = graph.table_mut(kind);
        if let Some(existing) = table.get_by_name(name) {
            if existing.id != id {
                return Err(SecurityError::entity_exists(format!("{} '{}'", kind, name)));
            }
        }
        let mut record = table
            .remove_id(id)
            .ok_or_else(|| SecurityError::unknown_entity(format!("{} {}", kind, id)))?;
        record.name = name.to_string();
        table.add(record.clone())?;
        Ok(record)
    }

    fn delete_entity(&self, kind: EntityKind, id: EntityId) -> Result<()> {
        let mut graph = self.graph.write();
        graph.require(kind, id)?;
        for edge in graph.edges.touching(id) {
            graph.edges.remove(&edge);
        }
        graph.table_mut(kind).remove_id(id);
        graph.credentials.remove(&id);
        debug!(kind = %kind, id = %id, "Entity deleted");
        Ok(())
    }

    fn load_credentials(&self, user: EntityId) -> Result<Credentials> {
        let graph = self.graph.read();
        graph.require(EntityKind::User, user)?;
        Ok(graph.credentials.get(&user).cloned().unwrap_or_default())
    }

    fn save_credentials(&self, user: EntityId, credentials: &Credentials) -> Result<()> {
        let mut graph = self.graph.write();
        graph.require(EntityKind::User, user)?;
        graph.credentials.insert(user, credentials.clone());
        Ok(())
    }

    fn load_edges_for(&self, kind: EntityKind, id: EntityId) -> Result<Vec<Edge>> {
        let graph = self.graph.read();
        graph.require(kind, id)?;
        Ok(graph.edges.touching(id))
    }

    fn persist_edge(&self, edge: &Edge) -> Result<bool> {
        let mut graph = self.graph.write();
        graph.require_endpoints(edge)?;
        Ok(graph.edges.insert(*edge))
    }

    fn delete_edge(&self, edge: &Edge) -> Result<bool> {
        let mut graph = self.graph.write();
        graph.require_endpoints(edge)?;
        Ok(graph.edges.remove(edge))
    }
}

//! Generic uniqueness-enforcing set

use crate::core::models::{EntityId, Named, name_key};
use crate::utils::error::{Result, SecurityError};
use serde::{Serialize, Serializer};
use serde::ser::SerializeSeq;
use std::collections::HashMap;
use std::fmt;

/// Insertion-ordered set with identity and case-insensitive name indexes
#[derive(Clone)]
pub struct SecuritySet<T> {
    items: Vec<T>,
    by_id: HashMap<EntityId, usize>,
    by_name: HashMap<String, usize>,
}

impl<T> Default for SecuritySet<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            by_id: HashMap::new(),
            by_name: HashMap::new(),
        }
    }
}

impl<T: Named + Clone> SecuritySet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from entities, failing on the first name collision
    pub fn try_from_iter<I: IntoIterator<Item = T>>(iter: I) -> Result<Self> {
        let mut set = Self::new();
        set.add_all(iter)?;
        Ok(set)
    }

    /// Add an entity.
    ///
    /// Returns `Ok(false)` if an entity with the same identity is already
    /// present. Fails with `EntityExists` if a different entity already holds
    /// the name (compared case-insensitively).
    pub fn add(&mut self, item: T) -> Result<bool> {
        if self.by_id.contains_key(&item.id()) {
            return Ok(false);
        }

        let key = item.name_key();
        if let Some(&idx) = self.by_name.get(&key) {
            return Err(SecurityError::entity_exists(format!(
                "'{}' collides with existing '{}'",
                item.name(),
                self.items[idx].name()
            )));
        }

        let idx = self.items.len();
        self.by_id.insert(item.id(), idx);
        self.by_name.insert(key, idx);
        self.items.push(item);
        Ok(true)
    }

    /// Add every entity, stopping at the first collision
    pub fn add_all<I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<()> {
        for item in iter {
            self.add(item)?;
        }
        Ok(())
    }

    /// Remove by identity; returns whether something was removed
    pub fn remove(&mut self, item: &T) -> bool {
        self.remove_id(item.id()).is_some()
    }

    pub fn remove_id(&mut self, id: EntityId) -> Option<T> {
        let idx = *self.by_id.get(&id)?;
        Some(self.remove_at(idx))
    }

    pub fn remove_name(&mut self, name: &str) -> Option<T> {
        let idx = *self.by_name.get(&name_key(name))?;
        Some(self.remove_at(idx))
    }

    /// Remove by name, failing with `UnknownEntity` when absent
    pub fn remove_existing(&mut self, name: &str) -> Result<T> {
        self.remove_name(name)
            .ok_or_else(|| SecurityError::unknown_entity(format!("'{}' is not in the set", name)))
    }

    pub fn contains(&self, item: &T) -> bool {
        self.by_id.contains_key(&item.id())
    }

    pub fn contains_id(&self, id: EntityId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(&name_key(name))
    }

    pub fn get_by_name(&self, name: &str) -> Option<&T> {
        self.by_name.get(&name_key(name)).map(|&idx| &self.items[idx])
    }

    pub fn get_by_id(&self, id: EntityId) -> Option<&T> {
        self.by_id.get(&id).map(|&idx| &self.items[idx])
    }

    /// Look up by name, failing with `UnknownEntity` when absent
    pub fn require(&self, name: &str) -> Result<&T> {
        self.get_by_name(name)
            .ok_or_else(|| SecurityError::unknown_entity(format!("'{}' is not in the set", name)))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.by_id.clear();
        self.by_name.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.items.iter().map(|item| item.name().to_string()).collect()
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.items.iter().map(Named::id).collect()
    }

    /// Entities in either set. Fails if the two sets hold different
    /// entities under the same name.
    pub fn union(&self, other: &Self) -> Result<Self> {
        let mut result = self.clone();
        result.add_all(other.iter().cloned())?;
        Ok(result)
    }

    /// Entities of `self` that are also in `other` under the same name,
    /// in `self`'s order
    pub fn intersection(&self, other: &Self) -> Self {
        self.filtered(|item| other.holds(item))
    }

    /// Entities of `self` that `other` does not hold under the same name,
    /// in `self`'s order
    pub fn difference(&self, other: &Self) -> Self {
        self.filtered(|item| !other.holds(item))
    }

    /// Same identity, same name (case-insensitively)
    fn holds(&self, item: &T) -> bool {
        self.get_by_id(item.id())
            .is_some_and(|held| held.name_key() == item.name_key())
    }

    fn filtered<F: Fn(&T) -> bool>(&self, keep: F) -> Self {
        let mut result = Self::new();
        for item in self.items.iter().filter(|item| keep(item)) {
            // A subset of a valid set cannot collide.
            let idx = result.items.len();
            result.by_id.insert(item.id(), idx);
            result.by_name.insert(item.name_key(), idx);
            result.items.push(item.clone());
        }
        result
    }

    fn remove_at(&mut self, idx: usize) -> T {
        let item = self.items.remove(idx);
        self.reindex();
        item
    }

    fn reindex(&mut self) {
        self.by_id.clear();
        self.by_name.clear();
        for (idx, item) in self.items.iter().enumerate() {
            self.by_id.insert(item.id(), idx);
            self.by_name.insert(item.name_key(), idx);
        }
    }
}

/// Set equality: same identities, order ignored
impl<T: Named + Clone> PartialEq for SecuritySet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|item| other.contains(item))
    }
}

impl<T: Named + Clone> Eq for SecuritySet<T> {}

impl<'a, T> IntoIterator for &'a SecuritySet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for SecuritySet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<T: Named> fmt::Display for SecuritySet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} -> {}", item.name(), item.id())?;
        }
        write!(f, "]")
    }
}

impl<T: Named> fmt::Debug for SecuritySet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.items.iter().map(|item| item.name()))
            .finish()
    }
}

impl<T: Serialize> Serialize for SecuritySet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.items.len()))?;
        for item in &self.items {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

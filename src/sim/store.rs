//! Keyed entity collections
//!
//! Entities live in ordered maps so every pass over a collection visits keys
//! in the same order, which keeps tick replay deterministic.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::SimError;

/// Opaque entity key, unique within one simulation instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A collection of entities of one kind, keyed by [`EntityId`]
#[derive(Debug, Clone, PartialEq)]
pub struct EntityStore<T> {
    entries: BTreeMap<EntityId, T>,
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T> EntityStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new entity; a key that is already live is rejected
    pub fn add(&mut self, id: EntityId, entity: T) -> Result<(), SimError> {
        if self.entries.contains_key(&id) {
            return Err(SimError::DuplicateEntity(id));
        }
        self.entries.insert(id, entity);
        Ok(())
    }

    /// Remove an entity; removing an absent key does nothing
    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        self.entries.remove(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.entries.get_mut(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Visit entities in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.entries.iter().map(|(id, entity)| (*id, entity))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.entries.iter_mut().map(|(id, entity)| (*id, entity))
    }

    /// Remove every entity, yielding them in key order
    pub fn drain(&mut self) -> impl Iterator<Item = (EntityId, T)> + use<T> {
        std::mem::take(&mut self.entries).into_iter()
    }

    /// Owned copy of the contents in key order
    pub fn to_vec(&self) -> Vec<(EntityId, T)>
    where
        T: Clone,
    {
        self.iter().map(|(id, entity)| (id, entity.clone())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_get_remove() {
        let mut store = EntityStore::new();
        store.add(EntityId(1), "stone").unwrap();
        store.add(EntityId(2), "bomb").unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(EntityId(1)), Some(&"stone"));
        assert_eq!(store.remove(EntityId(1)), Some("stone"));
        assert!(store.get(EntityId(1)).is_none());
        assert!(store.contains(EntityId(2)));
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let mut store = EntityStore::new();
        store.add(EntityId(7), 1).unwrap();
        let err = store.add(EntityId(7), 2).unwrap_err();
        assert!(matches!(err, SimError::DuplicateEntity(EntityId(7))));
        // Original entity untouched
        assert_eq!(store.get(EntityId(7)), Some(&1));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store: EntityStore<u8> = EntityStore::new();
        assert!(store.remove(EntityId(42)).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_iteration_is_key_ordered() {
        let mut store = EntityStore::new();
        for id in [5, 1, 3] {
            store.add(EntityId(id), id).unwrap();
        }
        let ids: Vec<u64> = store.iter().map(|(id, _)| id.0).collect();
        assert_eq!(ids, vec![1, 3, 5]);

        let drained: Vec<_> = store.drain().collect();
        assert_eq!(drained.len(), 3);
        assert!(store.is_empty());
    }
}

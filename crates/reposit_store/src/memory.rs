//! In-memory store for testing.

use crate::adapter::{ConsistencyModel, StoreAdapter, WriteOutcome};
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::types::{EntityId, Record, Version};
use parking_lot::RwLock;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// An in-memory store adapter.
///
/// This store keeps all records in a hash map and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Ephemeral repositories that don't need persistence
///
/// # Version Advancement
///
/// Inserting a versioned record assigns [`Version::FIRST`]; every applied
/// write increments the stored version by one. Unversioned records never
/// acquire a version.
///
/// # Thread Safety
///
/// This store is thread-safe and can be shared across threads.
///
/// # Example
///
/// ```rust
/// use reposit_store::{EntityId, InMemoryStore, Record, StoreAdapter, Version, WriteOutcome};
///
/// let store = InMemoryStore::new();
/// let id = EntityId::new();
/// store.insert(Record::new(id, Some(Version::FIRST), vec![1])).unwrap();
///
/// let outcome = store
///     .write_if_version_matches(id, Some(Version::FIRST), Record::new(id, None, vec![2]))
///     .unwrap();
/// assert!(matches!(outcome, WriteOutcome::Applied(r) if r.version == Some(Version::new(2))));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<HashMap<EntityId, Record>>,
    config: StoreConfig,
}

impl InMemoryStore {
    /// Creates a new empty strict-consistency store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty store with the given configuration.
    #[must_use]
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Creates a new empty append-model store.
    #[must_use]
    pub fn append_model() -> Self {
        Self::with_config(StoreConfig::append())
    }

    /// Returns the number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns `true` if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Removes all records.
    pub fn clear(&self) {
        self.records.write().clear();
    }

    fn matches(existing: &Record, expected: Option<Version>) -> bool {
        match expected {
            // No expected version: any existing record matches.
            None => true,
            Some(expected) => existing.version == Some(expected),
        }
    }
}

impl StoreAdapter for InMemoryStore {
    fn consistency(&self) -> ConsistencyModel {
        self.config.consistency
    }

    fn lookup(&self, id: EntityId) -> StoreResult<Option<Record>> {
        Ok(self.records.read().get(&id).cloned())
    }

    fn write_if_version_matches(
        &self,
        id: EntityId,
        expected: Option<Version>,
        record: Record,
    ) -> StoreResult<WriteOutcome> {
        let mut records = self.records.write();
        let Some(existing) = records.get(&id) else {
            return Ok(WriteOutcome::NotFound);
        };
        if !Self::matches(existing, expected) {
            return Ok(WriteOutcome::VersionConflict);
        }

        // Unversioned records stay unversioned.
        let version = existing.version.map(Version::next);
        let stored = Record::new(id, version, record.payload);
        records.insert(id, stored.clone());
        Ok(WriteOutcome::Applied(stored))
    }

    fn insert(&self, record: Record) -> StoreResult<Record> {
        let mut records = self.records.write();
        let version = match records.get(&record.id) {
            Some(existing) => {
                if self.config.consistency == ConsistencyModel::Strict {
                    return Err(StoreError::already_exists(record.id));
                }
                existing.version.map(Version::next)
            }
            None => record.version.map(|_| Version::FIRST),
        };

        let stored = Record::new(record.id, version, record.payload);
        records.insert(record.id, stored.clone());
        Ok(stored)
    }

    fn remove_if_version_matches(
        &self,
        id: EntityId,
        expected: Option<Version>,
    ) -> StoreResult<WriteOutcome> {
        let mut records = self.records.write();
        match records.entry(id) {
            Entry::Vacant(_) => Ok(WriteOutcome::NotFound),
            Entry::Occupied(entry) => {
                if Self::matches(entry.get(), expected) {
                    Ok(WriteOutcome::Applied(entry.remove()))
                } else {
                    Ok(WriteOutcome::VersionConflict)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versioned(id: EntityId, payload: Vec<u8>) -> Record {
        Record::new(id, Some(Version::FIRST), payload)
    }

    #[test]
    fn insert_assigns_first_version() {
        let store = InMemoryStore::new();
        let id = EntityId::new();

        let stored = store
            .insert(Record::new(id, Some(Version::new(99)), vec![1]))
            .unwrap();
        assert_eq!(stored.version, Some(Version::FIRST));
        assert_eq!(store.lookup(id).unwrap(), Some(stored));
    }

    #[test]
    fn insert_keeps_unversioned_records_unversioned() {
        let store = InMemoryStore::new();
        let id = EntityId::new();

        let stored = store.insert(Record::new(id, None, vec![1])).unwrap();
        assert_eq!(stored.version, None);
    }

    #[test]
    fn strict_insert_rejects_collision() {
        let store = InMemoryStore::new();
        let id = EntityId::new();

        store.insert(versioned(id, vec![1])).unwrap();
        let result = store.insert(versioned(id, vec![2]));
        assert!(matches!(result, Err(StoreError::AlreadyExists { .. })));
    }

    #[test]
    fn write_advances_version() {
        let store = InMemoryStore::new();
        let id = EntityId::new();
        store.insert(versioned(id, vec![1])).unwrap();

        let outcome = store
            .write_if_version_matches(id, Some(Version::FIRST), Record::new(id, None, vec![2]))
            .unwrap();

        match outcome {
            WriteOutcome::Applied(record) => {
                assert_eq!(record.version, Some(Version::new(2)));
                assert_eq!(record.payload, vec![2]);
            }
            other => panic!("expected Applied, got {other:?}"),
        }
    }

    #[test]
    fn write_with_stale_version_conflicts() {
        let store = InMemoryStore::new();
        let id = EntityId::new();
        store.insert(versioned(id, vec![1])).unwrap();

        let outcome = store
            .write_if_version_matches(id, Some(Version::new(9)), Record::new(id, None, vec![2]))
            .unwrap();
        assert_eq!(outcome, WriteOutcome::VersionConflict);

        // The stored record is unchanged.
        let current = store.lookup(id).unwrap().unwrap();
        assert_eq!(current.payload, vec![1]);
        assert_eq!(current.version, Some(Version::FIRST));
    }

    #[test]
    fn write_to_absent_identifier_is_not_found() {
        let store = InMemoryStore::new();
        let id = EntityId::new();

        let outcome = store
            .write_if_version_matches(id, Some(Version::FIRST), Record::new(id, None, vec![1]))
            .unwrap();
        assert_eq!(outcome, WriteOutcome::NotFound);
    }

    #[test]
    fn missing_expected_version_matches_any_record() {
        let store = InMemoryStore::new();
        let id = EntityId::new();
        store.insert(versioned(id, vec![1])).unwrap();

        let outcome = store
            .write_if_version_matches(id, None, Record::new(id, None, vec![2]))
            .unwrap();
        assert!(matches!(outcome, WriteOutcome::Applied(_)));
    }

    #[test]
    fn remove_returns_removed_record() {
        let store = InMemoryStore::new();
        let id = EntityId::new();
        store.insert(versioned(id, vec![7])).unwrap();

        let outcome = store
            .remove_if_version_matches(id, Some(Version::FIRST))
            .unwrap();
        assert!(matches!(outcome, WriteOutcome::Applied(r) if r.payload == vec![7]));
        assert!(store.lookup(id).unwrap().is_none());
    }

    #[test]
    fn remove_with_stale_version_conflicts() {
        let store = InMemoryStore::new();
        let id = EntityId::new();
        store.insert(versioned(id, vec![7])).unwrap();

        let outcome = store
            .remove_if_version_matches(id, Some(Version::new(3)))
            .unwrap();
        assert_eq!(outcome, WriteOutcome::VersionConflict);
        assert!(store.lookup(id).unwrap().is_some());
    }

    #[test]
    fn append_model_insert_overwrites_and_advances() {
        let store = InMemoryStore::append_model();
        let id = EntityId::new();

        let first = store.insert(versioned(id, vec![1])).unwrap();
        assert_eq!(first.version, Some(Version::FIRST));

        let second = store.insert(versioned(id, vec![2])).unwrap();
        assert_eq!(second.version, Some(Version::new(2)));
        assert_eq!(store.lookup(id).unwrap().unwrap().payload, vec![2]);
    }

    #[test]
    fn len_and_clear() {
        let store = InMemoryStore::new();
        assert!(store.is_empty());

        store.insert(versioned(EntityId::new(), vec![1])).unwrap();
        store.insert(versioned(EntityId::new(), vec![2])).unwrap();
        assert_eq!(store.len(), 2);

        store.clear();
        assert!(store.is_empty());
    }
}

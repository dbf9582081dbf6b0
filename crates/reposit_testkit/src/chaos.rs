//! Chaos store wrapper for fault injection.
//!
//! Wraps any [`StoreAdapter`] to record the order operations reach the
//! store, inject artificial latency, and fail after a configured number of
//! mutations. Used to verify the engine's ordering and failure-boundary
//! guarantees.

use parking_lot::Mutex;
use reposit_store::{
    ConsistencyModel, EntityId, Record, StoreAdapter, StoreError, StoreResult, Version,
    WriteOutcome,
};
use std::time::Duration;

/// One operation observed by a [`ChaosStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChaosOp {
    /// A lookup for the identifier.
    Lookup(EntityId),
    /// A version-guarded write for the identifier.
    Write(EntityId),
    /// An insert of the identifier.
    Insert(EntityId),
    /// A version-guarded removal of the identifier.
    Remove(EntityId),
}

impl ChaosOp {
    /// Returns the identifier the operation addressed.
    #[must_use]
    pub const fn id(self) -> EntityId {
        match self {
            Self::Lookup(id) | Self::Write(id) | Self::Insert(id) | Self::Remove(id) => id,
        }
    }

    /// Returns `true` for mutating operations.
    #[must_use]
    pub const fn is_mutation(self) -> bool {
        matches!(self, Self::Write(_) | Self::Insert(_) | Self::Remove(_))
    }
}

#[derive(Debug, Default)]
struct ChaosState {
    ops: Vec<ChaosOp>,
    mutations_before_failure: Option<usize>,
}

/// A store adapter wrapper that records and perturbs store traffic.
///
/// # Example
///
/// ```rust
/// use reposit_store::{InMemoryStore, StoreAdapter, Record, EntityId};
/// use reposit_testkit::chaos::ChaosStore;
///
/// let store = ChaosStore::new(InMemoryStore::new());
/// store.insert(Record::new(EntityId::new(), None, vec![1])).unwrap();
/// assert_eq!(store.ops().len(), 1);
/// ```
#[derive(Debug)]
pub struct ChaosStore<S: StoreAdapter> {
    inner: S,
    state: Mutex<ChaosState>,
    latency: Option<Duration>,
}

impl<S: StoreAdapter> ChaosStore<S> {
    /// Wraps a store with recording enabled and no faults configured.
    #[must_use]
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            state: Mutex::new(ChaosState::default()),
            latency: None,
        }
    }

    /// Adds a fixed latency to every store operation.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Configures the store to fail with [`StoreError::Unavailable`] once
    /// `count` mutations have been applied.
    pub fn fail_after_mutations(&self, count: usize) {
        self.state.lock().mutations_before_failure = Some(count);
    }

    /// Returns the operations observed so far, in arrival order.
    #[must_use]
    pub fn ops(&self) -> Vec<ChaosOp> {
        self.state.lock().ops.clone()
    }

    /// Returns the mutating operations observed so far, in arrival order.
    #[must_use]
    pub fn mutations(&self) -> Vec<ChaosOp> {
        self.state
            .lock()
            .ops
            .iter()
            .copied()
            .filter(|op| op.is_mutation())
            .collect()
    }

    /// Clears the recorded operation log.
    pub fn reset_ops(&self) {
        self.state.lock().ops.clear();
    }

    /// Returns the wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn observe(&self, op: ChaosOp) -> StoreResult<()> {
        if let Some(latency) = self.latency {
            std::thread::sleep(latency);
        }

        let mut state = self.state.lock();
        if op.is_mutation() {
            if let Some(remaining) = state.mutations_before_failure {
                if remaining == 0 {
                    return Err(StoreError::unavailable("injected fault"));
                }
                state.mutations_before_failure = Some(remaining - 1);
            }
        }
        state.ops.push(op);
        Ok(())
    }
}

impl<S: StoreAdapter> StoreAdapter for ChaosStore<S> {
    fn consistency(&self) -> ConsistencyModel {
        self.inner.consistency()
    }

    fn lookup(&self, id: EntityId) -> StoreResult<Option<Record>> {
        self.observe(ChaosOp::Lookup(id))?;
        self.inner.lookup(id)
    }

    fn write_if_version_matches(
        &self,
        id: EntityId,
        expected: Option<Version>,
        record: Record,
    ) -> StoreResult<WriteOutcome> {
        self.observe(ChaosOp::Write(id))?;
        self.inner.write_if_version_matches(id, expected, record)
    }

    fn insert(&self, record: Record) -> StoreResult<Record> {
        self.observe(ChaosOp::Insert(record.id))?;
        self.inner.insert(record)
    }

    fn remove_if_version_matches(
        &self,
        id: EntityId,
        expected: Option<Version>,
    ) -> StoreResult<WriteOutcome> {
        self.observe(ChaosOp::Remove(id))?;
        self.inner.remove_if_version_matches(id, expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reposit_store::InMemoryStore;

    fn record() -> Record {
        Record::new(EntityId::new(), None, vec![1])
    }

    #[test]
    fn records_operations_in_arrival_order() {
        let store = ChaosStore::new(InMemoryStore::new());
        let stored = store.insert(record()).unwrap();
        store.lookup(stored.id).unwrap();
        store.remove_if_version_matches(stored.id, None).unwrap();

        let ops = store.ops();
        assert_eq!(
            ops,
            vec![
                ChaosOp::Insert(stored.id),
                ChaosOp::Lookup(stored.id),
                ChaosOp::Remove(stored.id),
            ]
        );
        assert_eq!(store.mutations().len(), 2);
    }

    #[test]
    fn fails_after_configured_mutations() {
        let store = ChaosStore::new(InMemoryStore::new());
        store.fail_after_mutations(1);

        store.insert(record()).unwrap();
        let result = store.insert(record());
        assert!(matches!(result, Err(StoreError::Unavailable { .. })));

        // Reads are unaffected by the mutation budget.
        assert!(store.lookup(EntityId::new()).unwrap().is_none());
    }

    #[test]
    fn reset_clears_the_log() {
        let store = ChaosStore::new(InMemoryStore::new());
        store.insert(record()).unwrap();
        store.reset_ops();
        assert!(store.ops().is_empty());
    }
}

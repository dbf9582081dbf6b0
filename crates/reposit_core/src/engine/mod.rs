//! Lifecycle operation engine.

mod outcome;

pub use outcome::Outcome;

use crate::codec::{decode_record, encode_entity};
use crate::entity::{describe, EntityModel};
use crate::error::{CoreError, CoreResult};
use crate::marker::Marker;
use reposit_store::{ConsistencyModel, EntityId, Record, StoreAdapter, StoreError};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Executes lifecycle operations against a store adapter.
///
/// The engine is synchronous per invocation: one call processes a single
/// entity or a bulk collection as a unit of blocking work. Entities are
/// processed independently in input order; each write is atomic at the
/// record level, but a bulk call is not atomic across entities. The first
/// entity that fails identifier/version matching fails the whole call, and
/// writes already applied to earlier entities are kept.
pub struct LifecycleEngine<S: StoreAdapter> {
    /// The backing store. Sole mutator of persisted state.
    store: Arc<S>,
}

impl<S: StoreAdapter> LifecycleEngine<S> {
    /// Creates an engine over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Executes a lifecycle write over the given entities, in input order.
    ///
    /// Returns the applied record for every entity. Outcomes accumulate
    /// keyed by identifier; callers correlate them back to input position
    /// through the projector.
    ///
    /// # Errors
    ///
    /// Fails on the first entity whose write does not apply:
    /// [`CoreError::OptimisticLock`] for update/delete mismatches,
    /// [`CoreError::EntityExists`] for insert collisions,
    /// [`CoreError::Mapping`] for entities without identifiers.
    pub fn execute<T: EntityModel>(&self, marker: Marker, entities: &[T]) -> CoreResult<Vec<Record>> {
        debug!(marker = marker.as_str(), count = entities.len(), "executing lifecycle operation");

        let mut applied = Vec::with_capacity(entities.len());
        for entity in entities {
            let outcome = match marker {
                Marker::Insert => self.apply_insert(entity)?,
                Marker::Update => self.apply_update(entity)?,
                Marker::Delete => self.apply_delete(entity)?,
                Marker::Save => self.apply_save(entity)?,
                Marker::Find => {
                    return Err(CoreError::projection("find is not a lifecycle write"))
                }
            };

            if !matches!(outcome, Outcome::Applied(_)) {
                warn!(id = %outcome.id(), "optimistic locking failure");
            }
            applied.push(outcome.into_applied()?);
        }

        Ok(applied)
    }

    /// Retrieves and decodes the entity stored for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Codec`] if the stored payload cannot be
    /// decoded.
    pub fn find<T: EntityModel>(&self, id: EntityId) -> CoreResult<Option<T>> {
        match self.store.lookup(id)? {
            Some(record) => Ok(Some(decode_record(&record)?)),
            None => Ok(None),
        }
    }

    fn apply_insert<T: EntityModel>(&self, entity: &T) -> CoreResult<Outcome> {
        let key = describe(entity)?;
        trace!(id = %key.id, "insert");

        let record = Record::new(key.id, key.version, encode_entity(entity)?);
        match self.store.insert(record) {
            Ok(stored) => Ok(Outcome::Applied(stored)),
            Err(StoreError::AlreadyExists { id }) => Err(CoreError::entity_exists(id)),
            Err(e) => Err(e.into()),
        }
    }

    fn apply_update<T: EntityModel>(&self, entity: &T) -> CoreResult<Outcome> {
        // Matching on an existing version is not meaningful under
        // append-only write semantics; update behaves as insert there.
        if self.store.consistency() == ConsistencyModel::Append {
            return self.apply_insert(entity);
        }

        let key = describe(entity)?;
        trace!(id = %key.id, version = ?key.version, "update");

        let record = Record::new(key.id, key.version, encode_entity(entity)?);
        let outcome = self
            .store
            .write_if_version_matches(key.id, key.version, record)?;
        Ok(Outcome::from_write(key.id, outcome))
    }

    fn apply_delete<T: EntityModel>(&self, entity: &T) -> CoreResult<Outcome> {
        let key = describe(entity)?;
        trace!(id = %key.id, version = ?key.version, "delete");

        let outcome = self.store.remove_if_version_matches(key.id, key.version)?;
        Ok(Outcome::from_write(key.id, outcome))
    }

    fn apply_save<T: EntityModel>(&self, entity: &T) -> CoreResult<Outcome> {
        let key = describe(entity)?;
        if self.store.lookup(key.id)?.is_some() {
            self.apply_update(entity)
        } else {
            self.apply_insert(entity)
        }
    }
}

impl<S: StoreAdapter> std::fmt::Debug for LifecycleEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleEngine")
            .field("consistency", &self.store.consistency())
            .finish_non_exhaustive()
    }
}

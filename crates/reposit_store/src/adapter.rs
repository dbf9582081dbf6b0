//! Store adapter trait definition.

use crate::error::StoreResult;
use crate::types::{EntityId, Record, Version};

/// Declared consistency model of a backing store.
///
/// The lifecycle engine branches on this configuration: strict stores get
/// version-guarded updates, append stores get insert delegation. The model
/// is declared by the store, never inferred from observed behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsistencyModel {
    /// Immediately consistent store supporting version-guarded writes.
    Strict,
    /// BASE/append-model store where matching on an existing version is not
    /// meaningful; writes behave as inserts.
    Append,
}

/// Result of a version-guarded write or removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The write was applied. Carries the stored record with all
    /// store-assigned values, including the advanced version.
    Applied(Record),
    /// A record exists for the identifier but its version does not match.
    VersionConflict,
    /// No record exists for the identifier.
    NotFound,
}

/// A backing store for Reposit repositories.
///
/// Store adapters are **keyed record stores**. Each entity identifier maps
/// to at most one [`Record`]; the adapter is the sole mutator of persisted
/// state. The engine never interprets store internals - it only calls the
/// operations below.
///
/// # Invariants
///
/// - `lookup` returns exactly the record last stored for that identifier
/// - `write_if_version_matches` is atomic per record: the version check and
///   the write are one indivisible step
/// - An `expected` version of `None` matches any existing record (the
///   identifier match is still required)
/// - Adapters must be `Send + Sync` for concurrent access
///
/// # Implementors
///
/// - [`super::InMemoryStore`] - reference implementation for testing
pub trait StoreAdapter: Send + Sync {
    /// Returns the declared consistency model of this store.
    fn consistency(&self) -> ConsistencyModel;

    /// Looks up the record stored for `id`.
    ///
    /// Returns `None` if no record exists for the identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable.
    fn lookup(&self, id: EntityId) -> StoreResult<Option<Record>>;

    /// Replaces the record for `id` if its current version matches.
    ///
    /// If `expected` is `Some`, the stored record's version must equal it;
    /// if `None`, any existing record matches. On a match the store writes
    /// `record`, advances the version per its advancement rule, and returns
    /// [`WriteOutcome::Applied`] with the stored state.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable. Version mismatch and
    /// missing identifiers are reported through [`WriteOutcome`], not as
    /// errors.
    fn write_if_version_matches(
        &self,
        id: EntityId,
        expected: Option<Version>,
        record: Record,
    ) -> StoreResult<WriteOutcome>;

    /// Inserts a record, returning the stored state with all
    /// store-assigned values (including the initial version for versioned
    /// records).
    ///
    /// # Errors
    ///
    /// Strict stores return [`crate::StoreError::AlreadyExists`] when a
    /// record already exists for the identifier. Append stores accept
    /// repeated inserts (last write wins).
    fn insert(&self, record: Record) -> StoreResult<Record>;

    /// Removes the record for `id` if its current version matches.
    ///
    /// Matching follows the same rules as [`Self::write_if_version_matches`].
    /// On a match, [`WriteOutcome::Applied`] carries the removed record.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable.
    fn remove_if_version_matches(
        &self,
        id: EntityId,
        expected: Option<Version>,
    ) -> StoreResult<WriteOutcome>;
}

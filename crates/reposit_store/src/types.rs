//! Shared record types for the store boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an entity.
///
/// Entity identifiers are 128-bit UUIDs that are:
/// - Immutable once assigned
/// - Unique within a store (an identifier addresses at most one record)
/// - Never reused
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId([u8; 16]);

impl EntityId {
    /// Creates an entity identifier from raw bytes.
    #[inline]
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Creates a new random entity identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().into_bytes())
    }

    /// Creates an entity identifier from a UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid.into_bytes())
    }

    /// Returns the raw bytes.
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Converts to a UUID.
    #[must_use]
    pub fn to_uuid(&self) -> Uuid {
        Uuid::from_bytes(self.0)
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.to_uuid())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uuid())
    }
}

impl From<Uuid> for EntityId {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl From<EntityId> for Uuid {
    fn from(id: EntityId) -> Self {
        id.to_uuid()
    }
}

/// Optimistic-locking version token.
///
/// Versions advance monotonically: the store assigns [`Version::FIRST`] to a
/// freshly inserted versioned record and increments on every applied write.
/// A record with no version is never version-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version(pub u64);

impl Version {
    /// The version assigned to a freshly inserted versioned record.
    pub const FIRST: Self = Self(1);

    /// Creates a version token.
    #[must_use]
    pub const fn new(version: u64) -> Self {
        Self(version)
    }

    /// Returns the raw version value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns the next version token.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v:{}", self.0)
    }
}

/// The store's materialized state for one entity identifier.
///
/// Records are owned exclusively by the store adapter. The version field is
/// authoritative; the opaque payload may carry a stale copy of the version
/// the entity held when it was encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// The entity identifier this record belongs to.
    pub id: EntityId,
    /// Store-assigned version, or `None` for unversioned records.
    pub version: Option<Version>,
    /// Opaque encoded entity state.
    pub payload: Vec<u8>,
}

impl Record {
    /// Creates a record.
    #[must_use]
    pub const fn new(id: EntityId, version: Option<Version>, payload: Vec<u8>) -> Self {
        Self {
            id,
            version,
            payload,
        }
    }

    /// Returns a copy of this record with a different version.
    #[must_use]
    pub fn with_version(mut self, version: Option<Version>) -> Self {
        self.version = version;
        self
    }
}

//! Error types for repository operations.

use reposit_store::{EntityId, StoreError};
use thiserror::Error;

/// Result type for repository operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in repository operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Store adapter error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Entity payload encoding or decoding failed.
    #[error("codec error: {message}")]
    Codec {
        /// Description of the failure.
        message: String,
    },

    /// No identifier could be determined for an entity.
    #[error("entity mapping failed: {message}")]
    Mapping {
        /// Description of what was missing.
        message: String,
    },

    /// An update-class write found no matching record, or the record's
    /// version did not match. The caller must resubmit with a fresh read;
    /// no automatic retry is performed.
    #[error("optimistic locking failure for {id}: no record with matching identifier and version")]
    OptimisticLock {
        /// The identifier that failed to match.
        id: EntityId,
    },

    /// An insert found an existing record for the identifier.
    #[error("entity already exists: {id}")]
    EntityExists {
        /// The colliding identifier.
        id: EntityId,
    },

    /// A method was declared with more than one lifecycle or query marker.
    /// Detected when the repository is built, never at call time.
    #[error("conflicting markers declared for method `{method}`")]
    MarkerConflict {
        /// The offending method name.
        method: String,
    },

    /// A method was invoked that was never declared on the repository.
    #[error("method `{method}` is not declared on this repository")]
    UnknownMethod {
        /// The undeclared method name.
        method: String,
    },

    /// Result projection invariant violated. This indicates a defect in the
    /// engine, not a recoverable condition.
    #[error("projection invariant violated: {message}")]
    Projection {
        /// Description of the violation.
        message: String,
    },
}

impl CoreError {
    /// Creates a codec error.
    pub fn codec(message: impl Into<String>) -> Self {
        Self::Codec {
            message: message.into(),
        }
    }

    /// Creates a mapping error.
    pub fn mapping(message: impl Into<String>) -> Self {
        Self::Mapping {
            message: message.into(),
        }
    }

    /// Creates an optimistic locking failure.
    #[must_use]
    pub const fn optimistic_lock(id: EntityId) -> Self {
        Self::OptimisticLock { id }
    }

    /// Creates an entity-exists error.
    #[must_use]
    pub const fn entity_exists(id: EntityId) -> Self {
        Self::EntityExists { id }
    }

    /// Creates a marker conflict error.
    pub fn marker_conflict(method: impl Into<String>) -> Self {
        Self::MarkerConflict {
            method: method.into(),
        }
    }

    /// Creates an unknown method error.
    pub fn unknown_method(method: impl Into<String>) -> Self {
        Self::UnknownMethod {
            method: method.into(),
        }
    }

    /// Creates a projection invariant error.
    pub fn projection(message: impl Into<String>) -> Self {
        Self::Projection {
            message: message.into(),
        }
    }
}

//! Error types for store operations.

use crate::types::EntityId;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record already exists for the identifier.
    #[error("record already exists for {id}")]
    AlreadyExists {
        /// The colliding identifier.
        id: EntityId,
    },

    /// The store cannot be reached or refused the operation.
    #[error("store unavailable: {message}")]
    Unavailable {
        /// Description of the failure.
        message: String,
    },
}

impl StoreError {
    /// Creates an already-exists error.
    #[must_use]
    pub const fn already_exists(id: EntityId) -> Self {
        Self::AlreadyExists { id }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

//! Per-entity operation outcomes.

use crate::error::{CoreError, CoreResult};
use reposit_store::{EntityId, Record, WriteOutcome};

/// The result of one entity's lifecycle write.
///
/// Outcomes are created by the engine as each entity is processed and
/// consumed immediately by the result projector; they are not retained.
///
/// For strict-consistency stores an entity's update moves
/// `Pending -> Applied`, or `Pending -> NotFound | VersionConflict`, both
/// of which terminate the whole call. There is no retry state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The write was applied; carries the stored record with all
    /// store-assigned values.
    Applied(Record),
    /// A record exists for the identifier but its version did not match.
    VersionConflict(EntityId),
    /// No record exists for the identifier.
    NotFound(EntityId),
}

impl Outcome {
    /// Converts a store-level write outcome for the given identifier.
    #[must_use]
    pub fn from_write(id: EntityId, outcome: WriteOutcome) -> Self {
        match outcome {
            WriteOutcome::Applied(record) => Self::Applied(record),
            WriteOutcome::VersionConflict => Self::VersionConflict(id),
            WriteOutcome::NotFound => Self::NotFound(id),
        }
    }

    /// Returns the identifier this outcome belongs to.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        match self {
            Self::Applied(record) => record.id,
            Self::VersionConflict(id) | Self::NotFound(id) => *id,
        }
    }

    /// Resolves the outcome into its applied record.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::OptimisticLock`] for the failure variants; the
    /// engine propagates this for the whole call with no partial success.
    pub fn into_applied(self) -> CoreResult<Record> {
        match self {
            Self::Applied(record) => Ok(record),
            Self::VersionConflict(id) | Self::NotFound(id) => {
                Err(CoreError::optimistic_lock(id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reposit_store::Version;

    #[test]
    fn applied_resolves_to_record() {
        let record = Record::new(EntityId::new(), Some(Version::FIRST), vec![1]);
        let outcome = Outcome::from_write(record.id, WriteOutcome::Applied(record.clone()));
        assert_eq!(outcome.id(), record.id);
        assert_eq!(outcome.into_applied().unwrap(), record);
    }

    #[test]
    fn conflict_resolves_to_optimistic_lock() {
        let id = EntityId::new();
        let outcome = Outcome::from_write(id, WriteOutcome::VersionConflict);
        let result = outcome.into_applied();
        assert!(matches!(result, Err(CoreError::OptimisticLock { id: e }) if e == id));
    }

    #[test]
    fn not_found_resolves_to_optimistic_lock() {
        let id = EntityId::new();
        let outcome = Outcome::from_write(id, WriteOutcome::NotFound);
        assert!(matches!(
            outcome.into_applied(),
            Err(CoreError::OptimisticLock { .. })
        ));
    }
}

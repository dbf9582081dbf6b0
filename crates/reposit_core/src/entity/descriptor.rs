//! Entity descriptor.

use crate::entity::EntityModel;
use crate::error::{CoreError, CoreResult};
use reposit_store::{EntityId, Version};

/// The addressable part of an entity: its identifier and, if versioned,
/// its current version token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityKey {
    /// The entity identifier.
    pub id: EntityId,
    /// The entity's version, or `None` for unversioned entities.
    pub version: Option<Version>,
}

/// Extracts the identifier and version from an entity.
///
/// Read-only; no side effects.
///
/// # Errors
///
/// Returns [`CoreError::Mapping`] if the entity carries no identifier.
pub fn describe<T: EntityModel>(entity: &T) -> CoreResult<EntityKey> {
    let id = entity
        .entity_id()
        .ok_or_else(|| CoreError::mapping("entity has no identifier"))?;

    Ok(EntityKey {
        id,
        version: entity.version(),
    })
}

//! Entity model trait.

use reposit_store::{EntityId, Version};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Contract an entity type must satisfy to be managed by a repository.
///
/// An entity is an opaque value with an identifier, an optional
/// optimistic-locking version, and arbitrary other attributes. The engine
/// reads the identifier and version through this trait; everything else is
/// carried through the serde representation.
///
/// # Version Stamping
///
/// The store's record version is authoritative. When an entity is decoded
/// from a record, [`EntityModel::set_version`] is called with the record's
/// version so the returned instance reflects the written state. Entities
/// without a version concept return `None` and ignore the setter.
///
/// # Example
///
/// ```rust
/// use reposit_core::EntityModel;
/// use reposit_store::{EntityId, Version};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Car {
///     id: Option<EntityId>,
///     version: Option<Version>,
///     plate: String,
/// }
///
/// impl EntityModel for Car {
///     fn entity_id(&self) -> Option<EntityId> {
///         self.id
///     }
///
///     fn version(&self) -> Option<Version> {
///         self.version
///     }
///
///     fn set_version(&mut self, version: Option<Version>) {
///         self.version = version;
///     }
/// }
/// ```
pub trait EntityModel: Serialize + DeserializeOwned {
    /// Returns the entity's identifier, or `None` if the instance carries
    /// no discoverable identifier.
    fn entity_id(&self) -> Option<EntityId>;

    /// Returns the entity's optimistic-locking version, or `None` for
    /// unversioned entities.
    fn version(&self) -> Option<Version>;

    /// Stamps the store-assigned version onto the entity.
    fn set_version(&mut self, version: Option<Version>);
}

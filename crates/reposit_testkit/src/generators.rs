//! Property-based test generators.

use crate::fixtures::Person;
use proptest::prelude::*;
use reposit_store::{EntityId, Version};

/// Strategy producing arbitrary entity identifiers.
pub fn entity_id_strategy() -> impl Strategy<Value = EntityId> {
    any::<[u8; 16]>().prop_map(EntityId::from_bytes)
}

/// Strategy producing version tokens in a realistic range.
pub fn version_strategy() -> impl Strategy<Value = Version> {
    (1u64..10_000).prop_map(Version::new)
}

/// Strategy producing a person with a fresh random identifier.
pub fn person_strategy() -> impl Strategy<Value = Person> {
    ("[a-z]{1,12}", 0i64..120).prop_map(|(name, age)| Person::new(&name, age))
}

/// Strategy producing a non-empty batch of people with distinct
/// identifiers.
pub fn person_batch_strategy(max: usize) -> impl Strategy<Value = Vec<Person>> {
    proptest::collection::vec(person_strategy(), 1..max)
}

//! Entity fixtures and repository helpers.
//!
//! Provides convenience types and constructors for setting up test
//! repositories and common scenarios.

use reposit_core::{EntityModel, Repository};
use reposit_store::{EntityId, InMemoryStore, Version};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A versioned test entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Entity identifier.
    pub id: Option<EntityId>,
    /// Optimistic-locking version.
    pub version: Option<Version>,
    /// Display name.
    pub name: String,
    /// Age in years.
    pub age: i64,
}

impl Person {
    /// Creates a person with a fresh identifier and an initial version.
    #[must_use]
    pub fn new(name: &str, age: i64) -> Self {
        Self {
            id: Some(EntityId::new()),
            version: Some(Version::FIRST),
            name: name.into(),
            age,
        }
    }
}

impl EntityModel for Person {
    fn entity_id(&self) -> Option<EntityId> {
        self.id
    }

    fn version(&self) -> Option<Version> {
        self.version
    }

    fn set_version(&mut self, version: Option<Version>) {
        self.version = version;
    }
}

/// An unversioned test entity; updates match on identifier alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sticker {
    /// Entity identifier.
    pub id: Option<EntityId>,
    /// Sticker label.
    pub label: String,
}

impl Sticker {
    /// Creates a sticker with a fresh identifier.
    #[must_use]
    pub fn new(label: &str) -> Self {
        Self {
            id: Some(EntityId::new()),
            label: label.into(),
        }
    }
}

impl EntityModel for Sticker {
    fn entity_id(&self) -> Option<EntityId> {
        self.id
    }

    fn version(&self) -> Option<Version> {
        None
    }

    fn set_version(&mut self, _version: Option<Version>) {
        // Unversioned entities ignore version stamping.
    }
}

/// Creates a repository over a fresh strict-consistency in-memory store,
/// with the conventional method declarations.
#[must_use]
pub fn strict_repository<T: EntityModel>() -> Repository<T, InMemoryStore> {
    Repository::with_defaults(Arc::new(InMemoryStore::new()))
}

/// Creates a repository over a fresh append-model in-memory store.
#[must_use]
pub fn append_repository<T: EntityModel>() -> Repository<T, InMemoryStore> {
    Repository::with_defaults(Arc::new(InMemoryStore::append_model()))
}

/// Inserts `count` distinct people and returns the stored instances, in
/// insertion order.
pub fn seeded_people(repo: &Repository<Person, InMemoryStore>, count: usize) -> Vec<Person> {
    let people: Vec<Person> = (0..count)
        .map(|i| Person::new(&format!("person{i}"), i as i64))
        .collect();
    repo.insert_all(people).expect("failed to seed people")
}

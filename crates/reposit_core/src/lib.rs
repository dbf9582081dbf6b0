//! # Reposit Core
//!
//! Lifecycle operation engine and typed repository facade for Reposit.
//!
//! A repository method is declared once with a lifecycle marker (`Insert`,
//! `Update`, `Delete`, `Save`) or the query marker (`Find`); the engine
//! executes the corresponding store operation without the caller writing
//! imperative data-manipulation code.
//!
//! This crate provides:
//! - The [`EntityModel`] contract and entity descriptor
//! - A CBOR codec for opaque entity payloads
//! - The declared-method registry with eager marker-exclusivity validation
//! - The [`LifecycleEngine`] implementing update/insert/delete/save
//!   semantics with optimistic locking
//! - A shape-preserving result projector
//! - The typed [`Repository`] facade
//!
//! ## Update Semantics
//!
//! Updates match on the entity's identifier; versioned entities are also
//! checked for version consistency. If no record matches, the call fails
//! with [`CoreError::OptimisticLock`] - there is no partial silent success
//! and no automatic retry. On a BASE/append-model store, update behaves
//! identically to insert.
//!
//! ## Example
//!
//! ```rust,ignore
//! use reposit_core::{EntityModel, Repository};
//! use reposit_store::InMemoryStore;
//! use std::sync::Arc;
//!
//! let repo: Repository<Car, _> = Repository::with_defaults(Arc::new(InMemoryStore::new()));
//! let car = repo.insert(car)?;
//! let car = repo.update(Car { plate: "CD-456".into(), ..car })?;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod codec;
mod engine;
mod entity;
mod error;
mod marker;
mod project;
mod repository;

pub use engine::{LifecycleEngine, Outcome};
pub use entity::{describe, EntityKey, EntityModel};
pub use error::{CoreError, CoreResult};
pub use marker::{Marker, MethodSpec, MethodTable, ReturnShape};
pub use project::{Input, Output, Shape};
pub use repository::{Repository, RepositoryBuilder};

// Store boundary types, re-exported for downstream convenience.
pub use reposit_store::{
    ConsistencyModel, EntityId, InMemoryStore, Record, StoreAdapter, StoreConfig, StoreError,
    StoreResult, Version, WriteOutcome,
};

pub use codec::{decode_record, encode_entity};

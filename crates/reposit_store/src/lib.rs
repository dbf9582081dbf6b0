//! # Reposit Store
//!
//! Store adapter boundary and reference implementation for Reposit.
//!
//! This crate defines the capability set a backing store must satisfy for
//! the lifecycle engine to run against it. Stores are **record stores**:
//! they hold one opaque record per entity identifier and expose
//! identifier-based lookup, version-guarded writes, and inserts. All file
//! formats, indexing, and query machinery live behind this boundary - the
//! engine never touches persisted state except through a [`StoreAdapter`].
//!
//! ## Design Principles
//!
//! - Adapters are keyed byte stores (lookup, guarded write, insert, remove)
//! - The consistency model (strict vs append) is declared configuration,
//!   never inferred from behavior
//! - Adapters must be `Send + Sync` for concurrent access
//! - The adapter is the sole mutator of persisted state
//!
//! ## Available Stores
//!
//! - [`InMemoryStore`] - For testing and ephemeral repositories
//!
//! ## Example
//!
//! ```rust
//! use reposit_store::{EntityId, InMemoryStore, Record, StoreAdapter, Version};
//!
//! let store = InMemoryStore::new();
//! let id = EntityId::new();
//! let stored = store
//!     .insert(Record::new(id, Some(Version::FIRST), vec![1, 2, 3]))
//!     .unwrap();
//! assert_eq!(stored.version, Some(Version::FIRST));
//! assert_eq!(store.lookup(id).unwrap(), Some(stored));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod adapter;
mod config;
mod error;
mod memory;
mod types;

pub use adapter::{ConsistencyModel, StoreAdapter, WriteOutcome};
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryStore;
pub use types::{EntityId, Record, Version};

//! # Reposit Testkit
//!
//! Test utilities for Reposit.
//!
//! This crate provides:
//! - Entity fixtures and repository helpers
//! - A chaos store wrapper for fault injection and call-order recording
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust
//! use reposit_testkit::prelude::*;
//!
//! let repo = strict_repository::<Person>();
//! let alice = repo.insert(Person::new("alice", 30)).unwrap();
//! assert!(repo.find(alice.id.unwrap()).unwrap().is_some());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod chaos;
pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::chaos::*;
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use chaos::*;
pub use fixtures::*;
pub use generators::*;

//! Lifecycle markers and the declared-method registry.
//!
//! A repository method is declared once with exactly one marker. The table
//! is populated when the repository is built and is read-only afterwards;
//! declaring two markers for the same method is rejected eagerly, never
//! deferred to call time.

use crate::error::{CoreError, CoreResult};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Marker identifying what a declared repository method does.
///
/// Lifecycle markers (`Insert`, `Update`, `Delete`, `Save`) and the query
/// marker (`Find`) are mutually exclusive per method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Insert a new entity.
    Insert,
    /// Update an entity already held in the store.
    Update,
    /// Delete an entity from the store.
    Delete,
    /// Insert or update, depending on whether the entity exists.
    Save,
    /// Retrieve an entity by identifier.
    Find,
}

impl Marker {
    /// Returns the marker's declaration name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Save => "save",
            Self::Find => "find",
        }
    }
}

/// Declared return shape of a repository method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnShape {
    /// The method returns nothing; outcomes are discarded after the
    /// operation succeeds. Failures still surface as errors.
    Unit,
    /// The method returns a value of the same shape as its parameter.
    Matching,
}

/// What one declared method does: its marker and its return shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodSpec {
    /// The method's single marker.
    pub marker: Marker,
    /// The method's declared return shape.
    pub returns: ReturnShape,
}

impl MethodSpec {
    /// Creates a method spec with a matching return shape.
    #[must_use]
    pub const fn new(marker: Marker) -> Self {
        Self {
            marker,
            returns: ReturnShape::Matching,
        }
    }

    /// Creates a method spec with a unit return shape.
    #[must_use]
    pub const fn unit(marker: Marker) -> Self {
        Self {
            marker,
            returns: ReturnShape::Unit,
        }
    }
}

/// Registry of declared repository methods.
///
/// Populated once at repository build time; lookups at call time are
/// read-only.
#[derive(Debug, Default)]
pub struct MethodTable {
    methods: HashMap<String, MethodSpec>,
}

impl MethodTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table with the five conventional method declarations:
    /// `insert`, `update`, `delete` (unit return), `save`, and `find`.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut methods = HashMap::new();
        methods.insert("insert".to_string(), MethodSpec::new(Marker::Insert));
        methods.insert("update".to_string(), MethodSpec::new(Marker::Update));
        methods.insert("delete".to_string(), MethodSpec::unit(Marker::Delete));
        methods.insert("save".to_string(), MethodSpec::new(Marker::Save));
        methods.insert("find".to_string(), MethodSpec::new(Marker::Find));
        Self { methods }
    }

    /// Declares a method.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MarkerConflict`] if the method already carries
    /// a marker. A method has at most one lifecycle or query marker.
    pub fn declare(&mut self, method: impl Into<String>, spec: MethodSpec) -> CoreResult<()> {
        let method = method.into();
        match self.methods.entry(method) {
            Entry::Occupied(entry) => Err(CoreError::marker_conflict(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(spec);
                Ok(())
            }
        }
    }

    /// Returns the spec declared for `method`, if any.
    #[must_use]
    pub fn spec(&self, method: &str) -> Option<MethodSpec> {
        self.methods.get(method).copied()
    }

    /// Returns the number of declared methods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Returns `true` if no methods are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

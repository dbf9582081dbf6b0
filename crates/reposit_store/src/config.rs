//! Store configuration.

use crate::adapter::ConsistencyModel;

/// Configuration for a store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Declared consistency model.
    pub consistency: ConsistencyModel,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            consistency: ConsistencyModel::Strict,
        }
    }
}

impl StoreConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration for a strictly consistent store.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            consistency: ConsistencyModel::Strict,
        }
    }

    /// Creates a configuration for a BASE/append-model store.
    #[must_use]
    pub fn append() -> Self {
        Self {
            consistency: ConsistencyModel::Append,
        }
    }

    /// Sets the consistency model.
    #[must_use]
    pub const fn consistency(mut self, model: ConsistencyModel) -> Self {
        self.consistency = model;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_strict() {
        assert_eq!(StoreConfig::new().consistency, ConsistencyModel::Strict);
    }

    #[test]
    fn builder_sets_model() {
        let config = StoreConfig::new().consistency(ConsistencyModel::Append);
        assert_eq!(config.consistency, ConsistencyModel::Append);
        assert_eq!(StoreConfig::append().consistency, ConsistencyModel::Append);
    }
}

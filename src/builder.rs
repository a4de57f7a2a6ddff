//! Index builder
//!
//! Collects index settings one at a time and validates them once, when the
//! index is built over a store.

use crate::config::IndexConfig;
use crate::error::Result;
use crate::index::GeoIndex;
use crate::storage::GeoStore;

/// Builder for [`GeoIndex`].
///
/// ```rust
/// use geoddb::{GeoIndexBuilder, MemoryStore};
///
/// let index = GeoIndexBuilder::new()
///     .partition_field("geo_pk")
///     .precision(6)
///     .prefix("shops#")
///     .build(MemoryStore::new("geo_pk"))?;
///
/// assert_eq!(index.partition_key("ezs42q"), "shops#ezs42q");
/// # Ok::<(), geoddb::GeoError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct GeoIndexBuilder {
    config: IndexConfig,
}

impl GeoIndexBuilder {
    /// Create a builder starting from the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: IndexConfig) -> Self {
        self.config = config;
        self
    }

    pub fn partition_field(mut self, field: impl Into<String>) -> Self {
        self.config = self.config.with_partition_field(field);
        self
    }

    pub fn precision(mut self, precision: usize) -> Self {
        self.config = self.config.with_precision(precision);
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config = self.config.with_prefix(prefix);
        self
    }

    /// Validate the configuration and bind it to `store`.
    pub fn build<S: GeoStore>(self, store: S) -> Result<GeoIndex<S>> {
        GeoIndex::new(store, self.config)
    }
}

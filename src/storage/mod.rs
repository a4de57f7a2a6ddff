//! Storage backend abstraction for geoddb
//!
//! The index never talks to a concrete database. It reads and writes
//! through [`GeoStore`], a narrow trait over a partitioned key-value table:
//! write one item, query one partition, fetch the next page of that query.
//! Backend failures are reported as [`GeoError::StoreWrite`] and
//! [`GeoError::StoreQuery`] and travel back to the caller untouched.
//!
//! [`GeoError::StoreWrite`]: crate::GeoError::StoreWrite
//! [`GeoError::StoreQuery`]: crate::GeoError::StoreQuery

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

mod condition;
mod memory;

pub use condition::KeyCondition;
pub use memory::{MemoryStore, StoreStats};

/// A stored item: field name to JSON value.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Opaque handle to the next page of a partition query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContinuationToken(serde_json::Value);

impl ContinuationToken {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

/// One page of a partition query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Records on this page, in store order
    pub items: Vec<Record>,
    /// Present while more pages remain
    pub next: Option<ContinuationToken>,
}

impl Page {
    pub fn new(items: Vec<Record>, next: Option<ContinuationToken>) -> Self {
        Self { items, next }
    }

    /// A page with no continuation.
    pub fn last(items: Vec<Record>) -> Self {
        Self { items, next: None }
    }

    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }
}

/// Acknowledgment of a single-item write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteAck {
    /// The item previously stored under the same key, if the backend replaced one
    pub replaced: Option<Record>,
}

/// Trait for partitioned key-value store backends.
///
/// Implementations own the name of the partition attribute: `query` selects
/// the records whose partition attribute equals `partition_key` and that also
/// satisfy `filter`, if one is given.
pub trait GeoStore: Send + Sync {
    /// Write a single item.
    fn put_item(&self, record: Record) -> Result<WriteAck>;

    /// First page of the records in one partition.
    fn query(&self, partition_key: &str, filter: Option<&KeyCondition>) -> Result<Page>;

    /// Page following `token` for the same partition and filter.
    fn query_next_page(
        &self,
        partition_key: &str,
        filter: Option<&KeyCondition>,
        token: &ContinuationToken,
    ) -> Result<Page>;

    /// Name of the attribute `query` matches partition keys against, when the
    /// backend knows it. [`GeoIndex::new`](crate::GeoIndex::new) rejects a
    /// configuration that writes the key to a different field.
    fn partition_attribute(&self) -> Option<&str> {
        None
    }
}

impl<S: GeoStore + ?Sized> GeoStore for &S {
    fn put_item(&self, record: Record) -> Result<WriteAck> {
        (**self).put_item(record)
    }

    fn query(&self, partition_key: &str, filter: Option<&KeyCondition>) -> Result<Page> {
        (**self).query(partition_key, filter)
    }

    fn query_next_page(
        &self,
        partition_key: &str,
        filter: Option<&KeyCondition>,
        token: &ContinuationToken,
    ) -> Result<Page> {
        (**self).query_next_page(partition_key, filter, token)
    }

    fn partition_attribute(&self) -> Option<&str> {
        (**self).partition_attribute()
    }
}

impl<S: GeoStore + ?Sized> GeoStore for Arc<S> {
    fn put_item(&self, record: Record) -> Result<WriteAck> {
        (**self).put_item(record)
    }

    fn query(&self, partition_key: &str, filter: Option<&KeyCondition>) -> Result<Page> {
        (**self).query(partition_key, filter)
    }

    fn query_next_page(
        &self,
        partition_key: &str,
        filter: Option<&KeyCondition>,
        token: &ContinuationToken,
    ) -> Result<Page> {
        (**self).query_next_page(partition_key, filter, token)
    }

    fn partition_attribute(&self) -> Option<&str> {
        (**self).partition_attribute()
    }
}

//! In-memory store backend.

use super::condition::compare_numbers;
use super::{ContinuationToken, GeoStore, KeyCondition, Page, Record, WriteAck};
use crate::error::{GeoError, Result};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde_json::{Value, json};
use std::cmp::Ordering;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

/// In-memory partitioned table.
///
/// Records are grouped by the string value of the partition field. With a
/// sort field configured, each partition is kept ordered by that field and a
/// write with an existing sort value replaces the old item; without one,
/// items are appended in write order. Sort values must be numbers or
/// strings.
///
/// With a page size set, each page scans at most that many stored items and
/// applies the filter afterwards, so a page can come back empty while more
/// pages remain.
#[derive(Debug)]
pub struct MemoryStore {
    partition_field: String,
    sort_field: Option<String>,
    page_size: Option<usize>,
    partitions: RwLock<FxHashMap<String, Vec<Record>>>,
    writes: AtomicU64,
    queries: AtomicU64,
}

/// Store statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Total number of stored items
    pub item_count: usize,
    /// Number of non-empty partitions
    pub partition_count: usize,
    /// Number of `put_item` calls
    pub write_count: u64,
    /// Number of page requests (first pages and continuations)
    pub query_count: u64,
}

impl MemoryStore {
    /// Create a store keyed by `partition_field`, without sort key or paging.
    pub fn new(partition_field: impl Into<String>) -> Self {
        Self {
            partition_field: partition_field.into(),
            sort_field: None,
            page_size: None,
            partitions: RwLock::new(FxHashMap::default()),
            writes: AtomicU64::new(0),
            queries: AtomicU64::new(0),
        }
    }

    pub fn with_sort_field(mut self, field: impl Into<String>) -> Self {
        self.sort_field = Some(field.into());
        self
    }

    /// Limit the number of stored items scanned per page.
    ///
    /// # Panics
    ///
    /// Panics if `page_size` is zero.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        assert!(page_size > 0, "Page size must be greater than zero");
        self.page_size = Some(page_size);
        self
    }

    pub fn partition_field(&self) -> &str {
        &self.partition_field
    }

    pub fn sort_field(&self) -> Option<&str> {
        self.sort_field.as_deref()
    }

    pub fn page_size(&self) -> Option<usize> {
        self.page_size
    }

    /// Total number of stored items.
    pub fn len(&self) -> usize {
        self.partitions.read().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Partition keys currently holding items, sorted.
    pub fn partition_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.partitions.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Remove all items. Counters are kept.
    pub fn clear(&self) {
        self.partitions.write().clear();
    }

    pub fn stats(&self) -> StoreStats {
        let partitions = self.partitions.read();
        StoreStats {
            item_count: partitions.values().map(Vec::len).sum(),
            partition_count: partitions.len(),
            write_count: self.writes.load(AtomicOrdering::Relaxed),
            query_count: self.queries.load(AtomicOrdering::Relaxed),
        }
    }

    fn scan(
        &self,
        partition_key: &str,
        filter: Option<&KeyCondition>,
        offset: usize,
    ) -> Result<Page> {
        self.queries.fetch_add(1, AtomicOrdering::Relaxed);

        let partitions = self.partitions.read();
        let Some(items) = partitions.get(partition_key) else {
            return Ok(Page::default());
        };

        let start = offset.min(items.len());
        let end = match self.page_size {
            Some(size) => start.saturating_add(size).min(items.len()),
            None => items.len(),
        };

        let page_items = items[start..end]
            .iter()
            .filter(|record| filter.is_none_or(|condition| condition.matches(record)))
            .cloned()
            .collect();

        let next = (end < items.len()).then(|| {
            ContinuationToken::new(json!({ "partition": partition_key, "offset": end }))
        });

        Ok(Page::new(page_items, next))
    }
}

impl GeoStore for MemoryStore {
    fn put_item(&self, record: Record) -> Result<WriteAck> {
        self.writes.fetch_add(1, AtomicOrdering::Relaxed);

        let partition = record
            .get(&self.partition_field)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                GeoError::store_write(format!(
                    "record has no string partition field '{}'",
                    self.partition_field
                ))
            })?
            .to_owned();

        let Some(sort_field) = &self.sort_field else {
            self.partitions
                .write()
                .entry(partition)
                .or_default()
                .push(record);
            return Ok(WriteAck::default());
        };

        let sort_value = match record.get(sort_field) {
            Some(value @ (Value::Number(_) | Value::String(_))) => value.clone(),
            Some(other) => {
                return Err(GeoError::store_write(format!(
                    "sort field '{}' must be a number or a string, got {}",
                    sort_field, other
                )));
            }
            None => {
                return Err(GeoError::store_write(format!(
                    "record has no sort field '{}'",
                    sort_field
                )));
            }
        };

        let mut partitions = self.partitions.write();
        let items = partitions.entry(partition).or_default();
        let position = items.binary_search_by(|item| {
            sort_order(item.get(sort_field).unwrap_or(&Value::Null), &sort_value)
        });

        match position {
            Ok(index) => {
                let replaced = std::mem::replace(&mut items[index], record);
                Ok(WriteAck {
                    replaced: Some(replaced),
                })
            }
            Err(index) => {
                items.insert(index, record);
                Ok(WriteAck::default())
            }
        }
    }

    fn query(&self, partition_key: &str, filter: Option<&KeyCondition>) -> Result<Page> {
        self.scan(partition_key, filter, 0)
    }

    fn partition_attribute(&self) -> Option<&str> {
        Some(&self.partition_field)
    }

    fn query_next_page(
        &self,
        partition_key: &str,
        filter: Option<&KeyCondition>,
        token: &ContinuationToken,
    ) -> Result<Page> {
        let value = token.as_value();
        let offset = value.get("offset").and_then(Value::as_u64);
        let partition = value.get("partition").and_then(Value::as_str);

        match (partition, offset) {
            (Some(partition), Some(offset)) if partition == partition_key => {
                let offset = usize::try_from(offset).map_err(GeoError::store_query)?;
                self.scan(partition_key, filter, offset)
            }
            _ => Err(GeoError::store_query(format!(
                "continuation token {} does not belong to partition '{}'",
                value, partition_key
            ))),
        }
    }
}

/// Order of sort values within a partition: numbers before strings.
///
/// Only numbers and strings are ever stored as sort values.
fn sort_order(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            compare_numbers(x, y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Number(_), _) => Ordering::Less,
        (_, Value::Number(_)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

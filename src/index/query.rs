//! Neighbor fan-out over a [`GeoStore`].

use crate::error::Result;
use crate::storage::{GeoStore, KeyCondition, Record};

/// Options for [`GeoIndex::query`](super::GeoIndex::query).
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOptions {
    /// Also query the eight cells around the center cell (default: true)
    pub include_neighbors: bool,
    /// Follow continuation tokens until each cell is exhausted (default: true)
    pub include_all_pages: bool,
    /// Extra condition ANDed with the partition key equality
    pub filter: Option<KeyCondition>,
    /// Query the cells on scoped threads instead of one after another (default: false)
    pub concurrent: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            include_neighbors: true,
            include_all_pages: true,
            filter: None,
            concurrent: false,
        }
    }
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_neighbors(mut self, include: bool) -> Self {
        self.include_neighbors = include;
        self
    }

    pub fn with_all_pages(mut self, include: bool) -> Self {
        self.include_all_pages = include;
        self
    }

    pub fn with_filter(mut self, filter: KeyCondition) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_concurrency(mut self, concurrent: bool) -> Self {
        self.concurrent = concurrent;
        self
    }
}

/// Every record of one partition, or only its first page.
pub(crate) fn fetch_cell<S: GeoStore + ?Sized>(
    store: &S,
    partition_key: &str,
    filter: Option<&KeyCondition>,
    all_pages: bool,
) -> Result<Vec<Record>> {
    let mut page = store.query(partition_key, filter)?;
    let mut records = std::mem::take(&mut page.items);
    let mut pages = 1;

    if all_pages {
        while let Some(token) = page.next.take() {
            page = store.query_next_page(partition_key, filter, &token)?;
            records.append(&mut page.items);
            pages += 1;
        }
    }

    log::trace!(
        "Fetched {} records in {} page(s) from partition {}",
        records.len(),
        pages,
        partition_key
    );

    Ok(records)
}

/// Query each partition and concatenate the results in `partition_keys` order.
///
/// The first failure, in partition order, aborts the whole fan-out and no
/// records are returned.
pub(crate) fn fan_out<S: GeoStore + ?Sized>(
    store: &S,
    partition_keys: &[String],
    options: &QueryOptions,
) -> Result<Vec<Record>> {
    let filter = options.filter.as_ref();
    let all_pages = options.include_all_pages;

    if !options.concurrent || partition_keys.len() < 2 {
        let mut results = Vec::new();
        for partition_key in partition_keys {
            results.extend(fetch_cell(store, partition_key, filter, all_pages)?);
        }
        return Ok(results);
    }

    std::thread::scope(|scope| {
        let handles: Vec<_> = partition_keys
            .iter()
            .map(|partition_key| {
                scope.spawn(move || fetch_cell(store, partition_key, filter, all_pages))
            })
            .collect();

        // Joined in spawn order so the output order matches the serial path.
        let mut results = Vec::new();
        for handle in handles {
            let records = handle
                .join()
                .unwrap_or_else(|payload| std::panic::resume_unwind(payload))?;
            results.extend(records);
        }
        Ok(results)
    })
}

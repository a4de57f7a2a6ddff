//! Geohash-partitioned index over a [`GeoStore`].
//!
//! Writes tag each record with a partition key derived from the geohash of
//! its point. Proximity queries compute the geohash of the query point,
//! optionally add its eight neighbors, and read every matching partition.
//! The result is a superset: callers that need an exact radius filter the
//! returned records themselves.

use crate::config::IndexConfig;
use crate::error::{GeoError, Result};
use crate::geohash::{encode, neighbors};
use crate::storage::{GeoStore, Record, WriteAck};
use geoddb_types::Coordinate;
use smallvec::SmallVec;

mod query;

pub use query::QueryOptions;

/// Cell hashes visited by one query: the center plus up to eight neighbors.
pub type CellList = SmallVec<[String; 9]>;

/// A geohash index bound to one store and one configuration.
///
/// # Examples
///
/// ```rust
/// use geoddb::{GeoIndex, IndexConfig, MemoryStore, QueryOptions};
/// use serde_json::json;
///
/// let store = MemoryStore::new("PK").with_sort_field("SK");
/// let index = GeoIndex::new(store, IndexConfig::default().with_precision(5))?;
///
/// let cafe = json!({ "SK": "cafe#1", "name": "Café Central" });
/// index.put_point(40.4168, -3.7038, cafe.as_object().unwrap().clone())?;
///
/// let nearby = index.query(40.4170, -3.7040, &QueryOptions::default())?;
/// assert_eq!(nearby.len(), 1);
/// assert_eq!(nearby[0]["PK"], "ezjmg");
/// # Ok::<(), geoddb::GeoError>(())
/// ```
#[derive(Debug)]
pub struct GeoIndex<S> {
    store: S,
    config: IndexConfig,
}

impl<S: GeoStore> GeoIndex<S> {
    /// Create an index after validating `config`.
    ///
    /// Writes put the partition key in `config.partition_field`, while the
    /// store queries its own partition attribute. The two must name the same
    /// field or written records are never found. Stores that report their
    /// attribute through [`GeoStore::partition_attribute`] are checked here;
    /// for other stores keeping them aligned is up to the caller.
    pub fn new(store: S, config: IndexConfig) -> Result<Self> {
        config.validate()?;

        if let Some(attribute) = store.partition_attribute() {
            if attribute != config.partition_field {
                return Err(GeoError::InvalidConfig(format!(
                    "Index writes partition keys to '{}' but the store queries '{}'",
                    config.partition_field, attribute
                )));
            }
        }

        Ok(Self { store, config })
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn precision(&self) -> usize {
        self.config.precision
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Partition key for a geohash: the configured prefix followed by the hash.
    pub fn partition_key(&self, hash: &str) -> String {
        format!("{}{}", self.config.partition_key_prefix, hash)
    }

    /// Geohash of a point at the index precision.
    pub fn geohash(&self, lat: f64, lon: f64) -> String {
        encode(lat, lon, self.config.precision)
    }

    /// Cell hashes a query at this point visits: center first, then
    /// N, NE, E, SE, S, SW, W, NW when `include_neighbors` is set.
    pub fn cells(&self, lat: f64, lon: f64, include_neighbors: bool) -> Result<CellList> {
        let center = self.geohash(lat, lon);
        let mut cells = CellList::new();

        if include_neighbors {
            let around = neighbors(&center)?;
            cells.push(center);
            cells.extend(around.into_array());
        } else {
            cells.push(center);
        }

        Ok(cells)
    }

    /// Write `record` tagged with the partition key of `(lat, lon)`.
    ///
    /// The partition field is set after the caller's fields, so a field of
    /// the same name already in `record` is overwritten.
    pub fn put_point(&self, lat: f64, lon: f64, mut record: Record) -> Result<WriteAck> {
        warn_out_of_range("write", lat, lon);

        let hash = self.geohash(lat, lon);
        let partition_key = self.partition_key(&hash);
        record.insert(
            self.config.partition_field.clone(),
            serde_json::Value::String(partition_key),
        );

        self.store.put_item(record)
    }

    /// Records in the cell containing `(lat, lon)` and, by default, its neighbors.
    ///
    /// Results are concatenated per cell in [`cells`](Self::cells) order with
    /// no deduplication or distance ordering. Any store error aborts the
    /// query and is returned as-is.
    pub fn query(&self, lat: f64, lon: f64, options: &QueryOptions) -> Result<Vec<Record>> {
        warn_out_of_range("query", lat, lon);

        let partition_keys: Vec<String> = self
            .cells(lat, lon, options.include_neighbors)?
            .iter()
            .map(|hash| self.partition_key(hash))
            .collect();

        log::debug!(
            "Querying {} cell(s) around ({}, {}), center partition {}",
            partition_keys.len(),
            lat,
            lon,
            partition_keys[0]
        );

        query::fan_out(&self.store, &partition_keys, options)
    }

    /// [`query`](Self::query) with default options: neighbors and all pages.
    pub fn query_near(&self, lat: f64, lon: f64) -> Result<Vec<Record>> {
        self.query(lat, lon, &QueryOptions::default())
    }

    /// [`put_point`](Self::put_point) taking a [`Coordinate`] or a `geo::Point`.
    pub fn put_at(&self, at: impl Into<Coordinate>, record: Record) -> Result<WriteAck> {
        let at = at.into();
        self.put_point(at.lat, at.lon, record)
    }

    /// [`query`](Self::query) taking a [`Coordinate`] or a `geo::Point`.
    pub fn query_at(
        &self,
        at: impl Into<Coordinate>,
        options: &QueryOptions,
    ) -> Result<Vec<Record>> {
        let at = at.into();
        self.query(at.lat, at.lon, options)
    }
}

fn warn_out_of_range(operation: &str, lat: f64, lon: f64) {
    if !Coordinate::new(lat, lon).is_in_range() {
        log::warn!(
            "Coordinate ({}, {}) outside the valid domain on {}; the cell will be skewed",
            lat,
            lon,
            operation
        );
    }
}

//! Geohash partition keys and neighbor fan-out queries over flat key-value stores.
//!
//! Records are tagged with the geohash of their point, optionally behind a
//! prefix, and stored under that partition key. A proximity query reads the
//! partition of the query point's cell and, by default, the eight cells
//! around it, following every page, and returns the records center cell
//! first.
//!
//! ```rust
//! use geoddb::{GeoIndex, IndexConfig, KeyCondition, MemoryStore, QueryOptions};
//! use serde_json::json;
//!
//! let store = MemoryStore::new("PK").with_sort_field("SK").with_page_size(25);
//! let index = GeoIndex::new(store, IndexConfig::default().with_precision(6))?;
//!
//! let record = |sk: &str| json!({ "SK": sk }).as_object().cloned().unwrap();
//! index.put_point(51.5007, -0.1246, record("landmark#big-ben"))?;
//! index.put_point(51.5014, -0.1419, record("landmark#palace"))?;
//! index.put_point(48.8584, 2.2945, record("landmark#eiffel"))?;
//!
//! let options = QueryOptions::default().with_filter(KeyCondition::begins_with("SK", "landmark#"));
//! let nearby = index.query(51.5010, -0.1250, &options)?;
//! assert!(nearby.iter().all(|r| r["SK"] != "landmark#eiffel"));
//! # Ok::<(), geoddb::GeoError>(())
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod geohash;
pub mod index;
pub mod storage;

pub use builder::GeoIndexBuilder;
pub use config::IndexConfig;
pub use error::{BoxError, GeoError, Result};
pub use index::{CellList, GeoIndex, QueryOptions};

pub use geo::{Point, Rect};
pub use geoddb_types::{BoundingBox, Coordinate};

pub use geohash::{Direction, Neighbors};

pub use storage::{
    ContinuationToken, GeoStore, KeyCondition, MemoryStore, Page, Record, StoreStats, WriteAck,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{GeoError, GeoIndex, GeoIndexBuilder, IndexConfig, QueryOptions, Result};

    pub use crate::{BoundingBox, Coordinate};

    pub use crate::geohash::{bounds, decode, encode, neighbors};

    pub use crate::{GeoStore, KeyCondition, MemoryStore, Page, Record};
}

//! # geoddb-types
//!
//! Value types shared by the geoddb codec and its callers.
//!
//! - **Point types**: `Coordinate`
//! - **Bounding box types**: `BoundingBox`
//!
//! Both are small `Copy` values, serializable with Serde and convertible to
//! the `geo` crate's primitives.
//!
//! ## Examples
//!
//! ```rust
//! use geoddb_types::bbox::BoundingBox;
//! use geoddb_types::point::Coordinate;
//!
//! let madrid = Coordinate::new(40.4168, -3.7038);
//! let iberia = BoundingBox::from_ranges((36.0, 43.8), (-9.5, 3.3));
//! assert!(iberia.contains(&madrid));
//! ```

pub mod bbox;
pub mod point;

pub use bbox::BoundingBox;
pub use point::Coordinate;

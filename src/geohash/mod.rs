//! Geohash encoding, decoding and neighbor lookup.
//!
//! A geohash interleaves binary bisections of longitude and latitude
//! (longitude first) and writes every five bits as one symbol of the
//! base-32 alphabet `0123456789bcdefghjkmnpqrstuvwxyz`. Longer hashes
//! denote smaller cells, and a prefix of a hash is the hash of the cell
//! that contains it.
//!
//! ```rust
//! use geoddb::geohash::{bounds, decode, encode, neighbors};
//!
//! let hash = encode(42.6, -5.6, 5);
//! assert_eq!(hash, "ezs42");
//!
//! let cell = bounds(&hash)?;
//! let center = decode(&hash)?;
//! assert!(cell.contains(&center));
//!
//! let around = neighbors(&hash)?;
//! assert_eq!(around.iter().count(), 8);
//! # Ok::<(), geoddb::GeoError>(())
//! ```

mod codec;
mod neighbors;

pub use codec::{ALPHABET, BITS_PER_CHAR, MAX_PRECISION, bounds, decode, encode, symbol_index};
pub use neighbors::{Direction, Neighbors, neighbor, neighbors};

//! Error types for geoddb.

use thiserror::Error;

/// Boxed error produced by a store backend.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by the codec, the index and store backends.
#[derive(Error, Debug)]
pub enum GeoError {
    /// A geohash contained a character outside the base-32 alphabet.
    #[error("Invalid geohash character {character:?} at position {position}")]
    InvalidHashCharacter { character: char, position: usize },

    /// Geohash precision outside the supported range.
    #[error("Invalid geohash precision {0}: must be between 1 and {max}", max = crate::geohash::MAX_PRECISION)]
    InvalidPrecision(usize),

    /// Configuration rejected by validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration text could not be deserialized.
    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    /// The store failed to write an item.
    #[error("Store write failed: {0}")]
    StoreWrite(#[source] BoxError),

    /// The store failed to answer a query or page request.
    #[error("Store query failed: {0}")]
    StoreQuery(#[source] BoxError),
}

impl GeoError {
    pub fn store_write<E: Into<BoxError>>(err: E) -> Self {
        Self::StoreWrite(err.into())
    }

    pub fn store_query<E: Into<BoxError>>(err: E) -> Self {
        Self::StoreQuery(err.into())
    }
}

/// Result type for geoddb operations.
pub type Result<T> = std::result::Result<T, GeoError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_store_errors_keep_source() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "throttled");
        let err = GeoError::store_query(io);
        assert_eq!(err.to_string(), "Store query failed: throttled");

        let source = err.source().expect("source is kept");
        let io = source
            .downcast_ref::<std::io::Error>()
            .expect("source is the original io error");
        assert_eq!(io.kind(), std::io::ErrorKind::TimedOut);
    }

    #[test]
    fn test_invalid_character_message() {
        let err = GeoError::InvalidHashCharacter {
            character: 'a',
            position: 3,
        };
        assert_eq!(
            err.to_string(),
            "Invalid geohash character 'a' at position 3"
        );
    }

    #[test]
    fn test_invalid_precision_message() {
        assert_eq!(
            GeoError::InvalidPrecision(0).to_string(),
            "Invalid geohash precision 0: must be between 1 and 20"
        );
    }
}

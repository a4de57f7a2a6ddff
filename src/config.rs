//! Index configuration
//!
//! The three settings here fully determine partition key derivation and
//! hash length, so they must stay fixed for the lifetime of an index:
//! records written under one precision or prefix are invisible to queries
//! made under another.

use crate::error::{GeoError, Result};
use crate::geohash::MAX_PRECISION;
use serde::{Deserialize, Serialize};

/// Geohash index configuration
///
/// # Example
///
/// ```rust
/// use geoddb::IndexConfig;
///
/// let config = IndexConfig::default().with_precision(6).with_prefix("poi#");
/// assert_eq!(config.partition_field, "PK");
///
/// let json = r#"{
///     "partition_field": "geo_pk",
///     "precision": 7
/// }"#;
/// let config = IndexConfig::from_json(json).unwrap();
/// assert_eq!(config.partition_key_prefix, "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexConfig {
    /// Record field that receives the partition key on writes
    #[serde(default = "IndexConfig::default_partition_field")]
    pub partition_field: String,

    /// Geohash length (1-20, default: 8)
    #[serde(default = "IndexConfig::default_precision")]
    pub precision: usize,

    /// Prepended to every geohash to form the partition key, so several
    /// logical indexes can share one table
    #[serde(default)]
    pub partition_key_prefix: String,
}

impl IndexConfig {
    fn default_partition_field() -> String {
        "PK".to_string()
    }

    const fn default_precision() -> usize {
        8
    }

    pub fn with_partition_field(mut self, field: impl Into<String>) -> Self {
        self.partition_field = field.into();
        self
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        if precision > 12 {
            log::warn!(
                "Geohash precision {} gives cells well under a metre across; \
                neighbor queries will only cover a tiny area",
                precision
            );
        }

        self.precision = precision;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.partition_key_prefix = prefix.into();
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_PRECISION).contains(&self.precision) {
            return Err(GeoError::InvalidPrecision(self.precision));
        }

        if self.partition_field.is_empty() {
            return Err(GeoError::InvalidConfig(
                "Partition field name cannot be empty".into(),
            ));
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: IndexConfig =
            serde_json::from_str(json).map_err(|e| GeoError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| GeoError::ConfigParse(e.to_string()))
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: IndexConfig =
            toml::from_str(toml_str).map_err(|e| GeoError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| GeoError::ConfigParse(e.to_string()))
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            partition_field: Self::default_partition_field(),
            precision: Self::default_precision(),
            partition_key_prefix: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IndexConfig::default();
        assert_eq!(config.partition_field, "PK");
        assert_eq!(config.precision, 8);
        assert!(config.partition_key_prefix.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_precision_bounds() {
        assert!(matches!(
            IndexConfig::default().with_precision(0).validate(),
            Err(GeoError::InvalidPrecision(0))
        ));
        assert!(matches!(
            IndexConfig::default().with_precision(21).validate(),
            Err(GeoError::InvalidPrecision(21))
        ));
        assert!(IndexConfig::default().with_precision(1).validate().is_ok());
        assert!(IndexConfig::default().with_precision(20).validate().is_ok());
    }

    #[test]
    fn test_empty_partition_field_rejected() {
        let config = IndexConfig::default().with_partition_field("");
        assert!(matches!(config.validate(), Err(GeoError::InvalidConfig(_))));
    }

    #[test]
    fn test_json_round_trip() {
        let config = IndexConfig::default()
            .with_partition_field("geo")
            .with_precision(5)
            .with_prefix("stores#");
        let json = config.to_json().unwrap();
        assert_eq!(IndexConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_json_rejects_unknown_and_invalid() {
        assert!(matches!(
            IndexConfig::from_json(r#"{ "precision": 5, "ttl": 3 }"#),
            Err(GeoError::ConfigParse(_))
        ));
        assert!(matches!(
            IndexConfig::from_json(r#"{ "precision": 0 }"#),
            Err(GeoError::InvalidPrecision(0))
        ));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_toml_config() {
        let config = IndexConfig::from_toml(
            r#"
            partition_field = "pk"
            precision = 6
            partition_key_prefix = "geo#"
            "#,
        )
        .unwrap();
        assert_eq!(config.precision, 6);
        assert_eq!(config.partition_key_prefix, "geo#");
        assert_eq!(IndexConfig::from_toml(&config.to_toml().unwrap()).unwrap(), config);
    }
}

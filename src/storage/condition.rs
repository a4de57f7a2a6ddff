//! Extra key conditions combined with the partition equality of a query.

use super::Record;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::cmp::Ordering;
use std::ops::BitAnd;

/// Predicate over a record's fields, typically its sort key.
///
/// Numbers compare numerically and strings lexicographically. A comparison
/// between different JSON types, or against a missing field, never matches.
///
/// ```rust
/// use geoddb::KeyCondition;
/// use serde_json::json;
///
/// let recent = KeyCondition::begins_with("SK", "2024-") & KeyCondition::gt("rating", json!(3));
///
/// let record = json!({ "SK": "2024-05-01#cafe", "rating": 4 });
/// assert!(recent.matches(record.as_object().unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum KeyCondition {
    Eq { field: String, value: Value },
    Lt { field: String, value: Value },
    Le { field: String, value: Value },
    Gt { field: String, value: Value },
    Ge { field: String, value: Value },
    Between { field: String, low: Value, high: Value },
    BeginsWith { field: String, prefix: String },
    And {
        left: Box<KeyCondition>,
        right: Box<KeyCondition>,
    },
}

impl KeyCondition {
    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Self::Eq {
            field: field.into(),
            value,
        }
    }

    pub fn lt(field: impl Into<String>, value: Value) -> Self {
        Self::Lt {
            field: field.into(),
            value,
        }
    }

    pub fn le(field: impl Into<String>, value: Value) -> Self {
        Self::Le {
            field: field.into(),
            value,
        }
    }

    pub fn gt(field: impl Into<String>, value: Value) -> Self {
        Self::Gt {
            field: field.into(),
            value,
        }
    }

    pub fn ge(field: impl Into<String>, value: Value) -> Self {
        Self::Ge {
            field: field.into(),
            value,
        }
    }

    /// Inclusive on both ends.
    pub fn between(field: impl Into<String>, low: Value, high: Value) -> Self {
        Self::Between {
            field: field.into(),
            low,
            high,
        }
    }

    pub fn begins_with(field: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self::BeginsWith {
            field: field.into(),
            prefix: prefix.into(),
        }
    }

    /// Both conditions must hold.
    pub fn and(self, other: KeyCondition) -> Self {
        Self::And {
            left: Box::new(self),
            right: Box::new(other),
        }
    }

    /// Evaluate against a record.
    pub fn matches(&self, record: &Record) -> bool {
        let ordering = |field: &String, value: &Value| {
            record.get(field).and_then(|actual| compare(actual, value))
        };

        match self {
            Self::Eq { field, value } => ordering(field, value) == Some(Ordering::Equal),
            Self::Lt { field, value } => ordering(field, value) == Some(Ordering::Less),
            Self::Le { field, value } => matches!(
                ordering(field, value),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Self::Gt { field, value } => ordering(field, value) == Some(Ordering::Greater),
            Self::Ge { field, value } => matches!(
                ordering(field, value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Self::Between { field, low, high } => {
                matches!(
                    ordering(field, low),
                    Some(Ordering::Greater | Ordering::Equal)
                ) && matches!(
                    ordering(field, high),
                    Some(Ordering::Less | Ordering::Equal)
                )
            }
            Self::BeginsWith { field, prefix } => record
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|s| s.starts_with(prefix.as_str())),
            Self::And { left, right } => left.matches(record) && right.matches(record),
        }
    }
}

impl BitAnd for KeyCondition {
    type Output = KeyCondition;

    fn bitand(self, rhs: KeyCondition) -> KeyCondition {
        self.and(rhs)
    }
}

fn compare(actual: &Value, expected: &Value) -> Option<Ordering> {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) if a == b => Some(Ordering::Equal),
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        _ => None,
    }
}

/// Numeric order that stays exact for integers beyond 2^53.
///
/// Integers are compared as integers; only when a float is involved do both
/// sides go through `f64`.
pub(super) fn compare_numbers(a: &Number, b: &Number) -> Option<Ordering> {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return Some(x.cmp(&y));
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return Some(x.cmp(&y));
    }
    if !a.is_f64() && !b.is_f64() {
        // A negative integer against one above i64::MAX.
        return Some(if a.is_u64() {
            Ordering::Greater
        } else {
            Ordering::Less
        });
    }
    a.as_f64()?.partial_cmp(&b.as_f64()?)
}

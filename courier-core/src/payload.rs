//! # Payload value model
//!
//! Messages carry an optional structured payload: a tree of primitives,
//! nulls, arrays of primitives, and nested string-keyed objects. The shape
//! is modelled as a sum type so the codec can match it exhaustively;
//! binary blobs, dates, and cyclic references are unrepresentable by
//! construction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single primitive payload value.
///
/// Untagged on the wire: each variant maps directly onto the corresponding
/// JSON primitive. Integers decode as [`Scalar::Int`] before falling back
/// to [`Scalar::Float`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// A boolean.
    Bool(bool),
    /// A 64-bit signed integer.
    Int(i64),
    /// A double-precision float.
    Float(f64),
    /// A UTF-8 string.
    Str(String),
}

/// A structured payload value.
///
/// Lists hold primitives only; maps nest arbitrarily. Any wire value
/// outside these shapes fails to decode and the enclosing envelope is
/// treated as malformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    /// An explicit null.
    Null,
    /// A single primitive.
    Scalar(Scalar),
    /// An array of primitives.
    List(Vec<Scalar>),
    /// String-keyed mapping of further payload values.
    Map(BTreeMap<String, Payload>),
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Str(value.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Str(value)
    }
}

impl From<Scalar> for Payload {
    fn from(value: Scalar) -> Self {
        Payload::Scalar(value)
    }
}

impl From<bool> for Payload {
    fn from(value: bool) -> Self {
        Payload::Scalar(value.into())
    }
}

impl From<i32> for Payload {
    fn from(value: i32) -> Self {
        Payload::Scalar(value.into())
    }
}

impl From<i64> for Payload {
    fn from(value: i64) -> Self {
        Payload::Scalar(value.into())
    }
}

impl From<f64> for Payload {
    fn from(value: f64) -> Self {
        Payload::Scalar(value.into())
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Payload::Scalar(value.into())
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Payload::Scalar(value.into())
    }
}

impl From<Vec<Scalar>> for Payload {
    fn from(value: Vec<Scalar>) -> Self {
        Payload::List(value)
    }
}

// Map literals: `Payload::from([("x", 5), ("y", 7)])`.
impl<K: Into<String>, V: Into<Payload>, const N: usize> From<[(K, V); N]> for Payload {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<Payload>> FromIterator<(K, V)> for Payload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(entries: I) -> Self {
        Payload::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

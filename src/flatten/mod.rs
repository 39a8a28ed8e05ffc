//! API response flattening
//!
//! Converts typed API model nodes into attribute trees keyed by the
//! attribute names a data source schema declares.
//!
//! # Module Structure
//!
//! - [`reference`] - one flattener per concrete reference shape
//! - [`target`] - dispatch over the polymorphic virtual network interface target
//! - [`collection`] - container shapes (0/1 blocks, lists, string maps)
//!
//! # Absence
//!
//! An absent optional scalar is never emitted. An absent nested object is
//! bound to an empty list, a present one to a one-element list. Lists and
//! maps are always bound, empty when the source is absent.
//!
//! Attribute maps are `BTreeMap`s: keys serialize in lexicographic order,
//! which is also the order every schema declares them in.

pub mod collection;
pub mod reference;
pub mod target;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

pub use collection::{nested_block, nested_list, string_map};

/// One flattened record
pub type AttributeMap = BTreeMap<String, AttributeValue>;

/// Value bound to an attribute name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    String(String),
    Bool(bool),
    Int(i64),
    /// Nested blocks; 0/1 elements for a single nested object, 0..N for lists
    List(Vec<AttributeMap>),
    /// Opaque string map
    Map(BTreeMap<String, String>),
}

impl AttributeValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[AttributeMap]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

/// Errors raised while flattening a model graph
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlattenError {
    /// The value's discriminant is not one of the known variants
    #[error(
        "unrecognized {interface} subtype encountered (resource_type: {})",
        .discriminant.as_deref().unwrap_or("<none>")
    )]
    UnrecognizedVariant {
        interface: &'static str,
        discriminant: Option<String>,
    },

    /// A field the API guarantees was absent
    #[error("required field `{field}` missing from {model}")]
    MissingField {
        model: &'static str,
        field: &'static str,
    },
}

/// Conversion of one model node into one attribute record
pub trait Flatten {
    fn flatten(&self) -> Result<AttributeMap, FlattenError>;
}

/// Bind `key` only when the source value is present
pub fn set_opt<V>(map: &mut AttributeMap, key: &str, value: Option<V>)
where
    V: Into<AttributeValue>,
{
    if let Some(value) = value {
        map.insert(key.to_string(), value.into());
    }
}

/// Unwrap a field the API contract requires
pub fn required<'a, T: ?Sized>(
    value: Option<&'a T>,
    model: &'static str,
    field: &'static str,
) -> Result<&'a T, FlattenError> {
    value.ok_or(FlattenError::MissingField { model, field })
}

/// Render a timestamp the way the API reports it, e.g. `2024-01-15T10:30:00.000Z`
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

//! Data source schema registry
//!
//! Data source schemas (attribute names, kinds and descriptions) are
//! declared in embedded JSON files and loaded once on first access. The
//! flatteners do not read them; they are the static contract a produced
//! attribute tree is checked against.

use crate::flatten::{AttributeMap, AttributeValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;
use thiserror::Error;

/// Embedded schema JSON files (compiled into the binary)
const SCHEMA_FILES: &[&str] = &[
    include_str!("resources/vpc.json"),
    include_str!("resources/power.json"),
];

/// Kind of value an attribute holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    String,
    Bool,
    Int,
    /// Sequence of nested blocks
    List,
    /// String to string map
    Map,
}

impl AttributeKind {
    pub fn is_container(self) -> bool {
        matches!(self, Self::List | Self::Map)
    }

    fn matches(self, value: &AttributeValue) -> bool {
        matches!(
            (self, value),
            (Self::String, AttributeValue::String(_))
                | (Self::Bool, AttributeValue::Bool(_))
                | (Self::Int, AttributeValue::Int(_))
                | (Self::List, AttributeValue::List(_))
                | (Self::Map, AttributeValue::Map(_))
        )
    }
}

/// Attribute definition from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeDef {
    pub name: String,
    pub kind: AttributeKind,
    pub description: String,
    /// Block attributes, for `list` kinds
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeDef>,
}

/// Data source definition from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSourceSchema {
    pub description: String,
    #[serde(default)]
    pub arguments: Vec<AttributeDef>,
    #[serde(default)]
    pub attributes: Vec<AttributeDef>,
}

/// Root structure of resources/*.json
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SchemaConfig {
    #[serde(default)]
    pub data_sources: BTreeMap<String, DataSourceSchema>,
}

/// A place where an attribute tree breaks its schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("attribute `{0}` is not declared")]
    Undeclared(String),
    #[error("attribute `{path}` should be {expected:?}")]
    KindMismatch { path: String, expected: AttributeKind },
    #[error("container attribute `{0}` is not bound")]
    Unbound(String),
}

impl DataSourceSchema {
    /// Check a read result's attributes against this schema.
    ///
    /// Every key must be declared with a matching kind, at any depth, and
    /// every top-level container attribute must be bound. Scalars may be
    /// absent; nested blocks may leave out keys their variant lacks.
    pub fn validate(&self, tree: &AttributeMap) -> Vec<Violation> {
        let mut violations = Vec::new();

        for def in &self.attributes {
            if def.kind.is_container() && !tree.contains_key(&def.name) {
                violations.push(Violation::Unbound(def.name.clone()));
            }
        }

        let declared: Vec<&AttributeDef> =
            self.arguments.iter().chain(self.attributes.iter()).collect();
        check_record(&declared, tree, "", &mut violations);
        violations
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeDef> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

fn check_record(
    declared: &[&AttributeDef],
    record: &AttributeMap,
    prefix: &str,
    violations: &mut Vec<Violation>,
) {
    for (key, value) in record {
        let path = format!("{}{}", prefix, key);
        let Some(def) = declared.iter().find(|d| d.name == *key) else {
            violations.push(Violation::Undeclared(path));
            continue;
        };

        if !def.kind.matches(value) {
            violations.push(Violation::KindMismatch {
                path,
                expected: def.kind,
            });
            continue;
        }

        if let AttributeValue::List(blocks) = value {
            let nested: Vec<&AttributeDef> = def.attributes.iter().collect();
            for (idx, block) in blocks.iter().enumerate() {
                check_record(&nested, block, &format!("{}.{}.", path, idx), violations);
            }
        }
    }
}

/// Global registry loaded from JSON
static REGISTRY: OnceLock<SchemaConfig> = OnceLock::new();

/// Get the schema registry (loads from embedded JSON on first access)
pub fn get_registry() -> &'static SchemaConfig {
    REGISTRY.get_or_init(|| {
        let mut final_config = SchemaConfig::default();

        for content in SCHEMA_FILES {
            let partial: SchemaConfig = serde_json::from_str(content)
                .unwrap_or_else(|e| panic!("Failed to parse embedded schema JSON: {}", e));
            final_config.data_sources.extend(partial.data_sources);
        }

        final_config
    })
}

/// Get a data source schema by name
pub fn get_data_source(name: &str) -> Option<&'static DataSourceSchema> {
    get_registry().data_sources.get(name)
}

/// Get all data source names (sorted)
pub fn get_all_data_source_names() -> Vec<&'static str> {
    get_registry()
        .data_sources
        .keys()
        .map(|s| s.as_str())
        .collect()
}

//! Shared types used across all pipeline stages.
//!
//! [`Page`] is what the scan stage produces, what `pages.json` stores, and what
//! the feed stage reads back, so the JSON shape here is the on-disk contract:
//!
//! ```text
//! [{ "metadata": { "slug": "negroni", ... }, "content": "<p>...</p>" }]
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum MetadataError {
    #[error("missing required field `{0}`")]
    Missing(String),
    #[error("field `{field}` must be a {expected}, found {found}")]
    WrongType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// One processed Markdown document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub metadata: Metadata,
    /// Rendered HTML body.
    pub content: String,
}

/// Open key/value metadata for a page.
///
/// Front matter can carry any YAML mapping, so values stay as tagged
/// [`serde_json::Value`]s. Keys are kept sorted, which also keeps
/// `pages.json` diffs stable between builds. Known fields are read through
/// the typed accessors rather than by matching on values at call sites.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, Value>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// The value under `key` if it is a string.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// The string value under `key`, or a typed error saying why not.
    pub fn require_str(&self, key: &str) -> Result<&str, MetadataError> {
        match self.0.get(key) {
            None => Err(MetadataError::Missing(key.to_string())),
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(MetadataError::WrongType {
                field: key.to_string(),
                expected: "string",
                found: value_kind(other),
            }),
        }
    }

    /// String entries of a list field. Non-string entries are dropped, and a
    /// missing or non-list field yields an empty list.
    pub fn string_list(&self, key: &str) -> Vec<&str> {
        match self.0.get(key) {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    pub fn slug(&self) -> Option<&str> {
        self.str_field("slug")
    }

    pub fn category(&self) -> Option<&str> {
        self.str_field("category")
    }

    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    pub fn read_time(&self) -> Option<u64> {
        self.0.get("read_time").and_then(Value::as_u64)
    }
}

impl From<BTreeMap<String, Value>> for Metadata {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}

//! Wire data model.
//!
//! A serialized component instance is a `Descriptor { tag, version, data }`.
//! Data fields are `Value`s: primitives, sequences, or nested descriptors.
//! The tag field is spelled `tag` on both the serialize and deserialize
//! paths; `tagName` is accepted as a deserialize-input alias for legacy
//! payloads.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::WireError;

/// The wire record for one serialized component instance.
///
/// Descriptors are immutable snapshots. Each descriptor owns its `data` map
/// exclusively — sibling descriptors never share substructure, so the
/// deserializer can consume them by value without defensive copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
    #[serde(alias = "tagName")]
    pub tag: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub data: BTreeMap<String, Value>,
}

impl Descriptor {
    pub fn new(tag: impl Into<String>, version: impl Into<String>) -> Self {
        Descriptor {
            tag: tag.into(),
            version: version.into(),
            data: BTreeMap::new(),
        }
    }

    /// Builder-style field insertion, for pattern handlers.
    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.data.insert(name.into(), value);
        self
    }
}

/// One field value inside a descriptor's data map.
///
/// Untagged: the JSON shape itself selects the variant. Arrays become
/// sequences, objects carrying a string `tag` become nested descriptors, and
/// everything else (including plain objects and opaque markup text) stays a
/// primitive that passes through the engine untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Sequence(Vec<Value>),
    Descriptor(Box<Descriptor>),
    Primitive(serde_json::Value),
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::Primitive(serde_json::Value::String(s.into()))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Primitive(p) => p.as_str(),
            _ => None,
        }
    }
}

impl From<Descriptor> for Value {
    fn from(descriptor: Descriptor) -> Self {
        Value::Descriptor(Box::new(descriptor))
    }
}

impl From<serde_json::Value> for Value {
    fn from(primitive: serde_json::Value) -> Self {
        Value::Primitive(primitive)
    }
}

/// Parsed wire text: either a single descriptor or a multi-root array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Wire {
    Many(Vec<Descriptor>),
    One(Descriptor),
}

/// Parse wire text into descriptors. Any failure — malformed JSON or JSON
/// that is not descriptor-shaped — aborts with `InvalidInput`.
pub fn parse_wire(text: &str) -> Result<Wire, WireError> {
    serde_json::from_str(text).map_err(|e| WireError::InvalidInput(e.to_string()))
}

/// Render a descriptor to its canonical text form. `BTreeMap` data gives a
/// stable key order, so equal descriptors render to equal text.
pub fn render_wire(descriptor: &Descriptor) -> Result<String, WireError> {
    serde_json::to_string(descriptor).map_err(|e| WireError::InvalidInput(e.to_string()))
}

/// Render a multi-root descriptor array.
pub fn render_wire_many(descriptors: &[Descriptor]) -> Result<String, WireError> {
    serde_json::to_string(descriptors).map_err(|e| WireError::InvalidInput(e.to_string()))
}

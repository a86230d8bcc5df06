//! Wire text / descriptor tree → live tree.
//!
//! Descriptor-shaped fields in `data` are resolved depth-first into live
//! instances before the kind's `from_data` runs — this is what lets a
//! container kind (a section) receive ready child instances (buttons)
//! instead of raw wire data. Failures are fatal to the triggering call:
//! no partial tree is ever returned.

use crate::component::{Component, Resolved, ResolvedData};
use crate::descriptor::{parse_wire, Descriptor, Value, Wire};
use crate::error::WireError;
use crate::registry::Registry;

/// Result of deserializing wire text, mirroring its single/multi-root shape.
#[derive(Debug)]
pub enum Deserialized {
    One(Box<dyn Component>),
    Many(Vec<Box<dyn Component>>),
}

impl Deserialized {
    pub fn into_one(self) -> Option<Box<dyn Component>> {
        match self {
            Deserialized::One(instance) => Some(instance),
            Deserialized::Many(_) => None,
        }
    }

    pub fn into_many(self) -> Vec<Box<dyn Component>> {
        match self {
            Deserialized::One(instance) => vec![instance],
            Deserialized::Many(instances) => instances,
        }
    }
}

/// Deserialize wire text into live instances.
pub fn deserialize(registry: &Registry, text: &str) -> Result<Deserialized, WireError> {
    match parse_wire(text)? {
        Wire::One(descriptor) => Ok(Deserialized::One(from_descriptor(registry, descriptor)?)),
        Wire::Many(descriptors) => Ok(Deserialized::Many(from_descriptors(
            registry,
            descriptors,
        )?)),
    }
}

/// Reconstruct one live instance from a parsed descriptor.
pub fn from_descriptor(
    registry: &Registry,
    descriptor: Descriptor,
) -> Result<Box<dyn Component>, WireError> {
    let kind = registry
        .component(&descriptor.tag)
        .ok_or_else(|| WireError::UnknownComponent(descriptor.tag.clone()))?;

    let mut data = ResolvedData::with_capacity(descriptor.data.len());
    for (name, value) in descriptor.data {
        data.insert(name, resolve_value(registry, value)?);
    }

    kind.from_data(data)
}

/// Reconstruct each descriptor independently, preserving order and length.
pub fn from_descriptors(
    registry: &Registry,
    descriptors: Vec<Descriptor>,
) -> Result<Vec<Box<dyn Component>>, WireError> {
    descriptors
        .into_iter()
        .map(|descriptor| from_descriptor(registry, descriptor))
        .collect()
}

fn resolve_value(registry: &Registry, value: Value) -> Result<Resolved, WireError> {
    match value {
        Value::Descriptor(descriptor) => Ok(Resolved::Instance(from_descriptor(
            registry,
            *descriptor,
        )?)),
        Value::Sequence(items) => items
            .into_iter()
            .map(|item| resolve_value(registry, item))
            .collect::<Result<Vec<_>, _>>()
            .map(Resolved::Many),
        Value::Primitive(primitive) => Ok(Resolved::Value(primitive)),
    }
}

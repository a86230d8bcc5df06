//! Live tree → descriptor tree → wire text.
//!
//! A pure function of the input tree and the registry's current `to_data`
//! implementations: each node's kind is found by the node's own tag, its
//! fields are snapshotted, and component-valued fields are serialized in
//! place. The live tree is assumed acyclic with exclusive child ownership;
//! cycles are not detected.

use std::collections::BTreeMap;

use crate::component::{Component, Field};
use crate::descriptor::{render_wire, render_wire_many, Descriptor, Value};
use crate::error::WireError;
use crate::registry::Registry;

/// Serialize one live instance to wire text.
pub fn serialize(registry: &Registry, instance: &dyn Component) -> Result<String, WireError> {
    let descriptor = to_descriptor(registry, instance)?;
    render_wire(&descriptor)
}

/// Serialize a multi-root tree to wire text (a descriptor array).
pub fn serialize_many(
    registry: &Registry,
    instances: &[&dyn Component],
) -> Result<String, WireError> {
    let descriptors = instances
        .iter()
        .map(|instance| to_descriptor(registry, *instance))
        .collect::<Result<Vec<_>, _>>()?;
    render_wire_many(&descriptors)
}

/// Snapshot one live instance into its descriptor.
pub fn to_descriptor(
    registry: &Registry,
    instance: &dyn Component,
) -> Result<Descriptor, WireError> {
    let tag = instance.tag();
    let kind = registry
        .component(tag)
        .ok_or_else(|| WireError::UnknownComponent(tag.to_string()))?;

    let mut data = BTreeMap::new();
    for (name, field) in kind.to_data(instance)? {
        data.insert(name, serialize_field(registry, field)?);
    }

    Ok(Descriptor {
        tag: tag.to_string(),
        version: kind.version().to_string(),
        data,
    })
}

fn serialize_field(registry: &Registry, field: Field<'_>) -> Result<Value, WireError> {
    match field {
        Field::Value(value) => Ok(value),
        Field::Child(child) => Ok(Value::from(to_descriptor(registry, child)?)),
        Field::Many(items) => items
            .into_iter()
            .map(|item| serialize_field(registry, item))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Sequence),
    }
}

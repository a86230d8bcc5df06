//! Collaborator seams between the engine and concrete view kinds.
//!
//! Concrete components (buttons, sections, forms) live outside this crate.
//! They plug in through two traits: `Component` for live instances and
//! `ComponentKind` for the registry entry that knows how to snapshot and
//! reconstruct them. The `Field`/`Resolved` enums are the typed boundary the
//! engine recurses over — serialize/deserialize are structural recursion over
//! these variants, never shape-sniffing of parsed JSON.

use std::any::Any;
use std::collections::HashMap;

use crate::descriptor::Value;
use crate::error::WireError;
use crate::registry::Registry;

/// A live component instance.
///
/// Instances know their own tag so the serializer can find their kind, and
/// expose `as_any` so the kind can recover its concrete type in `to_data`.
pub trait Component: Any + Send {
    fn tag(&self) -> &str;
    fn as_any(&self) -> &dyn Any;
}

impl std::fmt::Debug for dyn Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Component")
            .field("tag", &self.tag())
            .finish_non_exhaustive()
    }
}

/// One field produced by `ComponentKind::to_data`.
///
/// `Value` passes through to the wire unchanged; `Child`/`Many` mark live
/// substructure the serializer must recurse into. Children are borrowed:
/// the live tree is acyclic with exclusive ownership, so a snapshot never
/// needs to clone instances.
pub enum Field<'a> {
    Value(Value),
    Child(&'a dyn Component),
    Many(Vec<Field<'a>>),
}

/// One resolved field handed to `ComponentKind::from_data`.
///
/// By the time `from_data` runs, every descriptor-shaped field has already
/// been reconstructed into a live instance, so container kinds receive ready
/// children instead of raw wire data.
pub enum Resolved {
    Value(serde_json::Value),
    Instance(Box<dyn Component>),
    Many(Vec<Resolved>),
}

impl Resolved {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Resolved::Value(v) => v.as_str(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Resolved::Value(v) => v.as_f64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Resolved::Value(v) => v.as_bool(),
            _ => None,
        }
    }

    pub fn into_instance(self) -> Option<Box<dyn Component>> {
        match self {
            Resolved::Instance(c) => Some(c),
            _ => None,
        }
    }

    /// Flatten a resolved sequence into its live instances, dropping
    /// non-instance entries. A single instance counts as a one-element list.
    pub fn into_instances(self) -> Vec<Box<dyn Component>> {
        match self {
            Resolved::Instance(c) => vec![c],
            Resolved::Many(items) => items
                .into_iter()
                .flat_map(Resolved::into_instances)
                .collect(),
            Resolved::Value(_) => Vec::new(),
        }
    }
}

/// Resolved data map passed to `from_data`.
pub type ResolvedData = HashMap<String, Resolved>;

/// Take a required string field out of resolved data.
pub fn take_string(data: &mut ResolvedData, name: &str) -> Result<String, WireError> {
    match data.remove(name) {
        Some(Resolved::Value(serde_json::Value::String(s))) => Ok(s),
        Some(_) => Err(WireError::component(format!(
            "field {:?} is not a string",
            name
        ))),
        None => Err(WireError::component(format!("missing field {:?}", name))),
    }
}

/// A registry entry describing one component kind.
///
/// Exactly one kind is registered per tag at any time. The engine never
/// validates the shape of the data a kind produces or consumes — field-level
/// validation is the kind's own job.
pub trait ComponentKind: Send + Sync {
    fn tag(&self) -> &str;

    fn version(&self) -> &str;

    /// Reconstruct a live instance from resolved wire data.
    fn from_data(&self, data: ResolvedData) -> Result<Box<dyn Component>, WireError>;

    /// Snapshot a live instance into named fields. The instance is guaranteed
    /// to carry this kind's tag; downcast through `as_any`.
    fn to_data<'a>(
        &self,
        instance: &'a dyn Component,
    ) -> Result<Vec<(String, Field<'a>)>, WireError>;

    /// Invoked once when the kind is registered, so a kind can install the
    /// markup patterns it recognizes.
    fn register_patterns(&self, _registry: &mut Registry) -> Result<(), WireError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_string() {
        let mut data: ResolvedData = HashMap::new();
        data.insert(
            "label".into(),
            Resolved::Value(serde_json::Value::String("Go".into())),
        );
        assert_eq!(take_string(&mut data, "label").unwrap(), "Go");
        assert!(take_string(&mut data, "label").is_err()); // consumed
        assert!(take_string(&mut data, "missing").is_err());
    }

    #[test]
    fn test_into_instances_drops_primitives() {
        let many = Resolved::Many(vec![
            Resolved::Value(serde_json::Value::Null),
            Resolved::Value(serde_json::json!(3)),
        ]);
        assert!(many.into_instances().is_empty());
    }
}

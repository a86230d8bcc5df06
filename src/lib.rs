//! # viewwire — component serialization & markup recognition
//!
//! Converts live view-component trees into a portable tagged wire format and
//! back, and recognizes raw markup fragments against a pattern registry.
//!
//! ## Wire Format Invariants
//!
//! 1. **Descriptor shape**: `{ "tag": string, "version": string, "data": object }`,
//!    or an array of these for multi-root trees. The tag field is spelled
//!    `tag` on both paths; `tagName` is accepted as a deserialize-input alias.
//! 2. **Version carried, never compared**: compatibility between wire data
//!    and a kind's current version is not this engine's concern.
//! 3. **Exclusive ownership**: descriptors own their data maps; live trees
//!    are acyclic with one parent per child. Neither is checked at runtime.
//! 4. **No partial trees**: `InvalidInput` and `UnknownComponent` abort the
//!    whole deserialize call that raised them.
//! 5. **Registration is last-write-wins**: re-registering a tag or selector
//!    overwrites the previous entry with a warning, never an error.
//! 6. **Pattern priority**: registration order, first match wins. Handler
//!    failures are recovered to a null result for that element only.
//!
//! The registry is an explicit value — construct one per application (or per
//! test), populate it during start-up, then hand it by reference to
//! [`serialize`], [`deserialize`], and [`transform_html`]. Registration is
//! not internally synchronized; finish it before concurrent reads begin.

mod component;
mod descriptor;
mod deserialize;
mod error;
mod markup;
mod registry;
mod selector;
mod serialize;
mod transform;

pub use component::{take_string, Component, ComponentKind, Field, Resolved, ResolvedData};
pub use descriptor::{parse_wire, render_wire, render_wire_many, Descriptor, Value, Wire};
pub use deserialize::{deserialize, from_descriptor, from_descriptors, Deserialized};
pub use error::WireError;
pub use markup::{Element, Html5Parser, MarkupParser};
pub use registry::{PatternHandler, PatternRule, Registry};
pub use selector::{Selector, SimpleSelector};
pub use serialize::{serialize, serialize_many, to_descriptor};
pub use transform::{transform_element, transform_html};

#[cfg(test)]
mod testkit;

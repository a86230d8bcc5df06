//! Shared fixture kinds for the test suites: a leaf `Button`, a container
//! `Section` that reconstructs its children recursively, and a `CodeBlock`
//! recognized from markup via a self-registered pattern.

use std::any::Any;
use std::sync::Arc;

use crate::component::{take_string, Component, ComponentKind, Field, Resolved, ResolvedData};
use crate::descriptor::{Descriptor, Value};
use crate::error::WireError;
use crate::registry::Registry;

#[derive(Debug, PartialEq)]
pub struct Button {
    pub label: String,
}

impl Component for Button {
    fn tag(&self) -> &str {
        "Button"
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub struct ButtonKind;

impl ComponentKind for ButtonKind {
    fn tag(&self) -> &str {
        "Button"
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn from_data(&self, mut data: ResolvedData) -> Result<Box<dyn Component>, WireError> {
        let label = take_string(&mut data, "label")?;
        Ok(Box::new(Button { label }))
    }

    fn to_data<'a>(
        &self,
        instance: &'a dyn Component,
    ) -> Result<Vec<(String, Field<'a>)>, WireError> {
        let button = instance
            .as_any()
            .downcast_ref::<Button>()
            .ok_or_else(|| WireError::component("expected a Button instance"))?;
        Ok(vec![(
            "label".to_string(),
            Field::Value(Value::string(button.label.clone())),
        )])
    }
}

pub struct Section {
    pub title: Option<String>,
    pub children: Vec<Box<dyn Component>>,
}

impl Component for Section {
    fn tag(&self) -> &str {
        "Section"
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub struct SectionKind;

impl ComponentKind for SectionKind {
    fn tag(&self) -> &str {
        "Section"
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn from_data(&self, mut data: ResolvedData) -> Result<Box<dyn Component>, WireError> {
        let title = data
            .remove("title")
            .and_then(|t| t.as_str().map(str::to_string));
        let children = data
            .remove("children")
            .map(Resolved::into_instances)
            .unwrap_or_default();
        Ok(Box::new(Section { title, children }))
    }

    fn to_data<'a>(
        &self,
        instance: &'a dyn Component,
    ) -> Result<Vec<(String, Field<'a>)>, WireError> {
        let section = instance
            .as_any()
            .downcast_ref::<Section>()
            .ok_or_else(|| WireError::component("expected a Section instance"))?;
        let mut fields = Vec::new();
        if let Some(title) = &section.title {
            fields.push((
                "title".to_string(),
                Field::Value(Value::string(title.clone())),
            ));
        }
        fields.push((
            "children".to_string(),
            Field::Many(
                section
                    .children
                    .iter()
                    .map(|child| Field::Child(child.as_ref()))
                    .collect(),
            ),
        ));
        Ok(fields)
    }
}

#[derive(Debug, PartialEq)]
pub struct CodeBlock {
    pub language: Option<String>,
    pub code: String,
}

impl Component for CodeBlock {
    fn tag(&self) -> &str {
        "CodeBlock"
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub struct CodeBlockKind;

impl ComponentKind for CodeBlockKind {
    fn tag(&self) -> &str {
        "CodeBlock"
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn from_data(&self, mut data: ResolvedData) -> Result<Box<dyn Component>, WireError> {
        let code = take_string(&mut data, "code")?;
        let language = data
            .remove("language")
            .and_then(|l| l.as_str().map(str::to_string));
        Ok(Box::new(CodeBlock { language, code }))
    }

    fn to_data<'a>(
        &self,
        instance: &'a dyn Component,
    ) -> Result<Vec<(String, Field<'a>)>, WireError> {
        let block = instance
            .as_any()
            .downcast_ref::<CodeBlock>()
            .ok_or_else(|| WireError::component("expected a CodeBlock instance"))?;
        let mut fields = vec![(
            "code".to_string(),
            Field::Value(Value::string(block.code.clone())),
        )];
        if let Some(language) = &block.language {
            fields.push((
                "language".to_string(),
                Field::Value(Value::string(language.clone())),
            ));
        }
        Ok(fields)
    }

    /// Recognizes `<pre>` blocks, declining when the required nested
    /// `<code>` child is absent.
    fn register_patterns(&self, registry: &mut Registry) -> Result<(), WireError> {
        registry.register_pattern(
            "pre",
            Box::new(|element| {
                let code = match element.find("code") {
                    Some(code) => code,
                    None => return Ok(None),
                };
                let language = code
                    .classes
                    .iter()
                    .find_map(|c| c.strip_prefix("language-"))
                    .map(str::to_string);
                let mut descriptor = Descriptor::new("CodeBlock", "1.0.0")
                    .with("code", Value::string(code.text_content()));
                if let Some(language) = language {
                    descriptor = descriptor.with("language", Value::string(language));
                }
                Ok(Some(descriptor))
            }),
        )
    }
}

/// A registry populated with all fixture kinds.
pub fn fixture_registry() -> Registry {
    let mut registry = Registry::new();
    registry
        .register_component(Arc::new(ButtonKind))
        .expect("register Button");
    registry
        .register_component(Arc::new(SectionKind))
        .expect("register Section");
    registry
        .register_component(Arc::new(CodeBlockKind))
        .expect("register CodeBlock");
    registry
}

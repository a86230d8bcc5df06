//! Element node model and markup-parsing capability.
//!
//! The transformer never parses HTML itself — it consumes `Element` nodes
//! produced by whatever `MarkupParser` the host injects. `Html5Parser` is the
//! bundled implementation, built on html5ever. Synthetic `html`/`head`/`body`
//! wrappers that the HTML5 algorithm adds around fragments are flattened so
//! callers get the fragment's own roots back.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::collections::HashMap;

use crate::error::WireError;
use crate::selector::Selector;

/// One parsed markup element.
#[derive(Debug, Clone, Default)]
pub struct Element {
    /// Lowercased tag name.
    pub tag: String,
    /// Class list, split from the `class` attribute.
    pub classes: Vec<String>,
    /// Remaining attributes, lowercased names.
    pub attributes: HashMap<String, String>,
    /// Text directly inside this element (not descendants).
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    /// Match a selector against this element alone. Descendant selectors
    /// require ancestry context and therefore never match here; the
    /// transformer's tree walk supplies the ancestor chain.
    pub fn matches(&self, selector: &Selector) -> bool {
        selector.matches(self, &[])
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Concatenated text of this element and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        out.push_str(&self.text);
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// First descendant (depth-first) matching the selector text, or None —
    /// including when the selector text itself is unsupported. Handlers use
    /// this to probe for required children (e.g. a `code` inside a `pre`).
    pub fn find(&self, selector: &str) -> Option<&Element> {
        let parsed = Selector::parse(selector).ok()?;
        self.find_parsed(&parsed)
    }

    fn find_parsed(&self, selector: &Selector) -> Option<&Element> {
        for child in &self.children {
            if child.matches(selector) {
                return Some(child);
            }
            if let Some(found) = child.find_parsed(selector) {
                return Some(found);
            }
        }
        None
    }
}

/// Injected markup-parsing capability.
pub trait MarkupParser {
    /// Parse markup text into its root elements, in document order.
    fn parse(&self, markup: &str) -> Result<Vec<Element>, WireError>;
}

/// The bundled html5ever-backed parser.
#[derive(Debug, Default)]
pub struct Html5Parser;

impl Html5Parser {
    pub fn new() -> Self {
        Html5Parser
    }
}

impl MarkupParser for Html5Parser {
    fn parse(&self, markup: &str) -> Result<Vec<Element>, WireError> {
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut markup.as_bytes())
            .map_err(|e| WireError::InvalidInput(format!("Failed to parse HTML: {}", e)))?;

        let mut roots = Vec::new();
        collect_roots(&dom.document, &mut roots);
        Ok(roots)
    }
}

/// Collect fragment roots, flattening the html/head/body wrappers html5ever
/// always synthesizes around the input.
fn collect_roots(handle: &Handle, roots: &mut Vec<Element>) {
    match &handle.data {
        NodeData::Document => {
            for child in handle.children.borrow().iter() {
                collect_roots(child, roots);
            }
        }
        NodeData::Element { name, .. } => {
            let tag = name.local.to_string().to_ascii_lowercase();
            if tag == "html" || tag == "head" || tag == "body" {
                for child in handle.children.borrow().iter() {
                    collect_roots(child, roots);
                }
            } else if let Some(element) = convert_element(handle) {
                roots.push(element);
            }
        }
        _ => {}
    }
}

fn convert_element(handle: &Handle) -> Option<Element> {
    let (name, attrs) = match &handle.data {
        NodeData::Element { name, attrs, .. } => (name, attrs),
        _ => return None,
    };

    let tag = name.local.to_string().to_ascii_lowercase();
    let mut classes = Vec::new();
    let mut attributes = HashMap::new();
    for attr in attrs.borrow().iter() {
        let attr_name = attr.name.local.to_string().to_ascii_lowercase();
        let attr_value = attr.value.to_string();
        if attr_name == "class" {
            classes = attr_value
                .split_whitespace()
                .map(|c| c.to_string())
                .collect();
        } else {
            attributes.insert(attr_name, attr_value);
        }
    }

    let mut text = String::new();
    let mut children = Vec::new();
    for child in handle.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => text.push_str(&contents.borrow()),
            NodeData::Element { .. } => {
                if let Some(element) = convert_element(child) {
                    children.push(element);
                }
            }
            // Comments, doctypes, PIs carry nothing the matcher consumes
            _ => {}
        }
    }

    Some(Element {
        tag,
        classes,
        attributes,
        text,
        children,
    })
}

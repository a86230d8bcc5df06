//! Selector sublanguage for pattern rules.
//!
//! Deliberately tiny: a simple selector is a tag (`code`), a class
//! (`.highlight`), or a tag with one class (`div.highlight`); two simple
//! selectors separated by whitespace form a descendant pair (`pre code`).
//! No other CSS semantics are implied or accepted — unsupported text is a
//! registration-time error, never a rule that silently matches nothing.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::WireError;
use crate::markup::Element;

lazy_static! {
    /// tag, .class, or tag.class — one optional tag, one optional class.
    static ref SIMPLE_SELECTOR_RE: Regex =
        Regex::new(r"^([a-zA-Z][a-zA-Z0-9-]*)?(?:\.([a-zA-Z_][a-zA-Z0-9_-]*))?$").unwrap();
}

/// Tag and/or class test against a single element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleSelector {
    pub tag: Option<String>,
    pub class: Option<String>,
}

impl SimpleSelector {
    fn parse(text: &str) -> Result<Self, WireError> {
        let caps = SIMPLE_SELECTOR_RE
            .captures(text)
            .ok_or_else(|| WireError::InvalidSelector(text.to_string()))?;
        let tag = caps.get(1).map(|m| m.as_str().to_ascii_lowercase());
        let class = caps.get(2).map(|m| m.as_str().to_string());
        if tag.is_none() && class.is_none() {
            return Err(WireError::InvalidSelector(text.to_string()));
        }
        Ok(SimpleSelector { tag, class })
    }

    pub fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if !element.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(class) = &self.class {
            if !element.classes.iter().any(|c| c == class) {
                return false;
            }
        }
        true
    }
}

/// A parsed pattern selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Simple(SimpleSelector),
    /// `A B`: the element matches B and some ancestor matches A.
    Descendant(SimpleSelector, SimpleSelector),
}

impl Selector {
    pub fn parse(text: &str) -> Result<Self, WireError> {
        let parts: Vec<&str> = text.split_whitespace().collect();
        match parts.as_slice() {
            [single] => Ok(Selector::Simple(SimpleSelector::parse(single)?)),
            [ancestor, descendant] => Ok(Selector::Descendant(
                SimpleSelector::parse(ancestor)?,
                SimpleSelector::parse(descendant)?,
            )),
            _ => Err(WireError::InvalidSelector(text.to_string())),
        }
    }

    /// Match against an element given the ancestor chain above it
    /// (outermost first). A bare element has an empty chain, so descendant
    /// selectors can never match it.
    pub fn matches(&self, element: &Element, ancestors: &[&Element]) -> bool {
        match self {
            Selector::Simple(s) => s.matches(element),
            Selector::Descendant(ancestor, descendant) => {
                descendant.matches(element) && ancestors.iter().any(|a| ancestor.matches(a))
            }
        }
    }
}

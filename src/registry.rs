//! Component and pattern registry.
//!
//! An explicit value, not process-global state: hosts construct one registry
//! per application (or per test), populate it during start-up, and pass it by
//! reference into the serializer, deserializer, and transformer. There is no
//! internal locking — complete registration before concurrent reads begin.
//!
//! Key rules:
//! 1. Exactly one kind per tag and one rule per selector at any time.
//! 2. Re-registering an existing key overwrites and warns; never an error.
//! 3. Pattern rules match in registration order, first match wins. An
//!    overwritten selector keeps its original position; only the handler
//!    changes.
//! 4. `clear()` empties both stores unconditionally.

use std::collections::HashMap;
use std::sync::Arc;

use crate::component::ComponentKind;
use crate::descriptor::Descriptor;
use crate::error::WireError;
use crate::markup::Element;
use crate::selector::Selector;

/// Handler invoked when a pattern's selector matches an element. Returns the
/// descriptor to deserialize, `None` to decline (e.g. a required child is
/// absent), or an error — which the transformer recovers to `None`.
pub type PatternHandler =
    Box<dyn Fn(&Element) -> Result<Option<Descriptor>, WireError> + Send + Sync>;

/// A registered markup-recognition rule.
pub struct PatternRule {
    selector_text: String,
    selector: Selector,
    handler: PatternHandler,
}

impl PatternRule {
    pub fn selector_text(&self) -> &str {
        &self.selector_text
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn invoke(&self, element: &Element) -> Result<Option<Descriptor>, WireError> {
        (self.handler)(element)
    }
}

/// Mutable store of tag→kind and selector→pattern associations.
#[derive(Default)]
pub struct Registry {
    components: HashMap<String, Arc<dyn ComponentKind>>,
    patterns: Vec<PatternRule>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// Register a component kind under its own tag, then run its pattern
    /// hook. Last write wins on tag collision.
    pub fn register_component(&mut self, kind: Arc<dyn ComponentKind>) -> Result<(), WireError> {
        let tag = kind.tag().to_string();
        if self.components.insert(tag.clone(), kind.clone()).is_some() {
            tracing::warn!(tag = %tag, "component kind overwritten");
        }
        kind.register_patterns(self)
    }

    /// Register a pattern rule. The selector is parsed eagerly; text outside
    /// the supported grammar is rejected here rather than installed as a
    /// rule that can never match.
    pub fn register_pattern(
        &mut self,
        selector_text: impl Into<String>,
        handler: PatternHandler,
    ) -> Result<(), WireError> {
        let selector_text = selector_text.into();
        let selector = Selector::parse(&selector_text)?;

        if let Some(existing) = self
            .patterns
            .iter_mut()
            .find(|rule| rule.selector_text == selector_text)
        {
            tracing::warn!(selector = %selector_text, "pattern rule overwritten");
            existing.handler = handler;
            return Ok(());
        }

        self.patterns.push(PatternRule {
            selector_text,
            selector,
            handler,
        });
        Ok(())
    }

    pub fn has_component(&self, tag: &str) -> bool {
        self.components.contains_key(tag)
    }

    pub fn has_pattern(&self, selector_text: &str) -> bool {
        self.patterns
            .iter()
            .any(|rule| rule.selector_text == selector_text)
    }

    pub fn component(&self, tag: &str) -> Option<&Arc<dyn ComponentKind>> {
        self.components.get(tag)
    }

    /// Registered tags, sorted for stable listing.
    pub fn registered_components(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.components.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Registered selectors in match order.
    pub fn registered_patterns(&self) -> Vec<&str> {
        self.patterns
            .iter()
            .map(|rule| rule.selector_text.as_str())
            .collect()
    }

    pub(crate) fn patterns(&self) -> &[PatternRule] {
        &self.patterns
    }

    /// Empty both stores. Total and unconditional.
    pub fn clear(&mut self) {
        self.components.clear();
        self.patterns.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_handler() -> PatternHandler {
        Box::new(|_| Ok(None))
    }

    #[test]
    fn test_pattern_overwrite_keeps_order() {
        let mut registry = Registry::new();
        registry.register_pattern("div.test", noop_handler()).unwrap();
        registry.register_pattern("code", noop_handler()).unwrap();
        registry
            .register_pattern(
                "div.test",
                Box::new(|_| Ok(Some(Descriptor::new("Second", "1.0.0")))),
            )
            .unwrap();

        assert!(registry.has_pattern("div.test"));
        assert_eq!(registry.registered_patterns(), ["div.test", "code"]);

        // Only the second handler remains active
        let rule = &registry.patterns()[0];
        let result = rule.invoke(&Element::default()).unwrap().unwrap();
        assert_eq!(result.tag, "Second");
    }

    #[test]
    fn test_invalid_selector_rejected() {
        let mut registry = Registry::new();
        let err = registry
            .register_pattern("div > code", noop_handler())
            .unwrap_err();
        assert!(matches!(err, WireError::InvalidSelector(_)));
        assert!(!registry.has_pattern("div > code"));
    }

    #[test]
    fn test_clear_is_total() {
        let mut registry = Registry::new();
        registry.register_pattern("div.test", noop_handler()).unwrap();
        registry.register_pattern("pre code", noop_handler()).unwrap();
        registry.clear();
        assert!(!registry.has_pattern("div.test"));
        assert!(!registry.has_pattern("pre code"));
        assert!(registry.registered_patterns().is_empty());
        assert!(registry.registered_components().is_empty());
    }

    #[test]
    fn test_unregistered_lookups_are_negative() {
        let registry = Registry::new();
        assert!(!registry.has_component("Ghost"));
        assert!(!registry.has_pattern("div.ghost"));
        assert!(registry.component("Ghost").is_none());
    }
}

//! Markup transformer / pattern matcher.
//!
//! Walks parsed element trees in document order, matching each element
//! against the registry's pattern rules in registration order (first match
//! wins). A matched element is consumed — its subtree belongs to the handler.
//! Unmatched elements (and elements whose handler declined or failed) are
//! descended into, so recognizable fragments nested in unrecognized wrappers
//! are still found.
//!
//! Handler failures are recovered locally: logged with the offending
//! selector, treated as null for that element, and never allowed to disturb
//! siblings. Deserializer failures on a handler's descriptor stay fatal.

use crate::component::Component;
use crate::deserialize::from_descriptor;
use crate::error::WireError;
use crate::markup::{Element, MarkupParser};
use crate::registry::Registry;

/// Transform markup text into live instances. Empty or whitespace-only
/// markup yields an empty result, not an error.
pub fn transform_html(
    registry: &Registry,
    parser: &dyn MarkupParser,
    markup: &str,
) -> Result<Vec<Box<dyn Component>>, WireError> {
    if markup.trim().is_empty() {
        return Ok(Vec::new());
    }

    let roots = parser.parse(markup)?;
    let mut instances = Vec::new();
    let mut ancestors = Vec::new();
    for root in &roots {
        walk(registry, root, &mut ancestors, &mut instances)?;
    }
    Ok(instances)
}

/// Transform a single element (no ancestry context). Returns `None` when no
/// pattern matches or the matching handler declines — never an error for
/// those cases.
pub fn transform_element(
    registry: &Registry,
    element: &Element,
) -> Result<Option<Box<dyn Component>>, WireError> {
    match_element(registry, element, &[])
}

fn walk<'a>(
    registry: &Registry,
    element: &'a Element,
    ancestors: &mut Vec<&'a Element>,
    instances: &mut Vec<Box<dyn Component>>,
) -> Result<(), WireError> {
    if let Some(instance) = match_element(registry, element, ancestors)? {
        instances.push(instance);
        return Ok(());
    }

    ancestors.push(element);
    for child in &element.children {
        walk(registry, child, ancestors, instances)?;
    }
    ancestors.pop();
    Ok(())
}

/// First matching pattern wins; its handler decides. A handler error is
/// downgraded to a null result for this element only.
fn match_element(
    registry: &Registry,
    element: &Element,
    ancestors: &[&Element],
) -> Result<Option<Box<dyn Component>>, WireError> {
    let rule = registry
        .patterns()
        .iter()
        .find(|rule| rule.selector().matches(element, ancestors));

    let rule = match rule {
        Some(rule) => rule,
        None => return Ok(None),
    };

    let descriptor = match rule.invoke(element) {
        Ok(Some(descriptor)) => descriptor,
        Ok(None) => return Ok(None),
        Err(e) => {
            tracing::warn!(
                selector = %rule.selector_text(),
                error = %e,
                "pattern handler failed, skipping element"
            );
            return Ok(None);
        }
    };

    from_descriptor(registry, descriptor).map(Some)
}

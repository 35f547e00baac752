//! Capabilities a host document provides to the helpers.
//!
//! Each helper asks only for what it reads: element identity, resolved style, or
//! layout geometry. All of them build on [`ElementAdapter`], which also drives the
//! bundled selector engine.

use css_selectors::{
    ElementAdapter, SelectorError, matches_selector_list, parse_selector_list, query_first,
};
use std::collections::HashMap;

/// Node identity and selector matching.
pub trait NodeTree: ElementAdapter {
    /// True if `node` is an element (as opposed to a document, text or comment node).
    fn is_element(&self, node: Self::Handle) -> bool;

    /// Whether `element` matches `selector`, like `Element.matches`.
    ///
    /// The default evaluates the selector with `css_selectors`. Hosts with their own
    /// selector engine override this and [`NodeTree::query_selector`] to accept the
    /// full selector grammar.
    ///
    /// # Errors
    /// Returns a `SelectorError` when the selector cannot be evaluated.
    fn matches(&self, element: Self::Handle, selector: &str) -> Result<bool, SelectorError>
    where
        Self: Sized,
    {
        let list = parse_selector_list(selector)?;
        Ok(matches_selector_list(self, element, &list))
    }

    /// First descendant of `root` in document order matching `selector`, like
    /// `Element.querySelector`. `root` itself is not a candidate.
    ///
    /// # Errors
    /// Returns a `SelectorError` when the selector cannot be evaluated.
    fn query_selector(
        &self,
        root: Self::Handle,
        selector: &str,
    ) -> Result<Option<Self::Handle>, SelectorError>
    where
        Self: Sized,
    {
        let list = parse_selector_list(selector)?;
        Ok(query_first(self, root, &list))
    }
}

/// Resolved (computed) style lookup.
pub trait StyleResolver: NodeTree {
    /// Snapshot of the element's resolved style at the time of the call.
    fn computed_style(&self, element: Self::Handle) -> ComputedStyle;
}

/// Layout geometry. Reading any of these may force the host to bring layout up to date.
pub trait LayoutGeometry: NodeTree {
    /// Border-box height (content + padding + border, no margin) in CSS pixels.
    fn offset_height(&self, element: Self::Handle) -> f64;

    /// Border-box width (content + padding + border, no margin) in CSS pixels.
    fn offset_width(&self, element: Self::Handle) -> f64;

    /// Nearest ancestor establishing the element's offset context; `None` when the
    /// element is detached or not rendered.
    fn offset_parent(&self, element: Self::Handle) -> Option<Self::Handle>;
}

/// Resolved property values keyed by CSS property name (`padding-top`, `border-left-width`, ...).
///
/// Values are kept as text, exactly as a resolved style declaration reports them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComputedStyle {
    properties: HashMap<String, String>,
}

impl ComputedStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(property.into(), value.into());
    }

    /// The property's value, or an empty string when the property is unknown.
    pub fn property_value(&self, property: &str) -> &str {
        self.properties.get(property).map_or("", String::as_str)
    }

}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ComputedStyle {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut style = Self::new();
        for (property, value) in iter {
            style.set(property, value);
        }
        style
    }
}

//! Selectors Level 3 — Element matching and subtree search.
//! Spec: <https://www.w3.org/TR/selectors-3/>
//!
//! This module implements the subset needed by the DOM helpers:
//! - Type, universal, class, id and attribute selectors (all six value operators)
//! - Structural pseudo-classes (`:root`, `:first-child`, `:last-child`, `:only-child`,
//!   `:first-of-type`, `:last-of-type`) and `:not()`
//! - Combinators: descendant, child, adjacent sibling, general sibling
//! - Strict parsing: malformed selectors are syntax errors, while valid selectors using
//!   features outside this subset report `SelectorError::UnsupportedFeature`
//! - `querySelector`-style search of a subtree in document order
//!
//! Each function includes a reference to its corresponding section in the spec.

mod error;
mod matcher;
mod parser;

// Re-export public API
pub use error::SelectorError;
pub use matcher::{matches_selector_list, query_first};
pub use parser::parse_selector_list;

/// An adapter that abstracts DOM access for selector matching.
/// Implement this for your DOM layer.
///
/// Spec references:
/// - Section 3: Selectors overview and element matching
pub trait ElementAdapter {
    type Handle: Copy + Eq;

    /// Parent element if any.
    /// Spec: Section 11 — Combinators (for tree relationships)
    fn parent(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// Previous sibling element (skip non-elements if your DOM has mixed nodes).
    /// Spec: Section 11 — Sibling combinators
    fn previous_sibling_element(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// Next sibling element, used to walk a subtree in document order.
    fn next_sibling_element(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// First child that is an element.
    fn first_element_child(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// Tag name in ASCII lowercase (per HTML parsing conventions).
    /// Spec: Section 5 — Type selectors
    fn tag_name(&self, element: Self::Handle) -> &str;

    /// Returns Some(id) if the element has an id attribute, else None.
    /// Spec: Section 7 — ID selectors
    fn element_id(&self, element: Self::Handle) -> Option<&str>;

    /// True if the element has the given class token.
    /// Spec: Section 6 — Class selectors
    fn has_class(&self, element: Self::Handle, class: &str) -> bool;

    /// Returns the attribute value if present.
    /// Spec: Section 8 — Attribute selectors
    fn attr(&self, element: Self::Handle, name: &str) -> Option<&str>;
}

/// Simple selectors (subset).
/// Spec: Section 5, 6, 7, 8
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimpleSelector {
    /// Spec: Section 5 — Type selectors
    Type(String),
    /// Spec: Section 6 — Class selectors
    Class(String),
    /// Spec: Section 7 — ID selectors
    IdSelector(String),
    /// Spec: Section 8 — Attribute selectors [attr]
    AttrExists(String),
    /// Spec: Section 8 — Attribute selectors [attr=value], [attr~=value], [attr^=value], ...
    AttrMatch {
        name: String,
        operator: AttrOperator,
        value: String,
    },
    /// Spec: Section 5 — Universal selector
    Universal,
    /// Spec: Section 6.6.5 — Structural pseudo-classes
    PseudoClass(PseudoClass),
    /// Spec: Section 6.6.7 — Negation pseudo-class. Accepts a selector list.
    Not(SelectorList),
}

/// Attribute value comparison.
/// Spec: Section 6.3.1, 6.3.2
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttrOperator {
    /// `[attr=value]`
    Equals,
    /// `[attr~=value]`: one of the whitespace-separated words.
    Includes,
    /// `[attr|=value]`: exactly `value` or starting with `value-`.
    DashMatch,
    /// `[attr^=value]`
    Prefix,
    /// `[attr$=value]`
    Suffix,
    /// `[attr*=value]`
    Substring,
}

/// Pseudo-classes answered from tree structure alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PseudoClass {
    Root,
    FirstChild,
    LastChild,
    OnlyChild,
    FirstOfType,
    LastOfType,
}

impl PseudoClass {
    /// Look up a non-functional pseudo-class by its lowercase name.
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "root" => Self::Root,
            "first-child" => Self::FirstChild,
            "last-child" => Self::LastChild,
            "only-child" => Self::OnlyChild,
            "first-of-type" => Self::FirstOfType,
            "last-of-type" => Self::LastOfType,
            _ => return None,
        })
    }
}

/// A compound selector is a sequence of simple selectors (no combinators).
/// Spec: Section 5 — Simple selector sequences
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CompoundSelector {
    pub simples: Vec<SimpleSelector>,
}

/// Combinators between compounds.
/// Spec: Section 11 — Combinators
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
    AdjacentSibling,
    GeneralSibling,
}

/// A complex selector is one or more compounds separated by combinators.
/// Spec: Section 3, 11
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ComplexSelector {
    pub first: CompoundSelector,
    pub rest: Vec<(Combinator, CompoundSelector)>,
}

/// A selector list separated by commas.
/// Spec: Section 4 — Groups of selectors
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

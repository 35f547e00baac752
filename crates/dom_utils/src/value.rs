//! Arbitrary values handed across the host boundary.

use std::collections::BTreeMap;

/// A value as the host scripting layer sees it.
///
/// `Node` carries a handle the host can resolve. `Object` is a plain structural
/// object: a bag of named fields with no host identity behind it.
#[derive(Clone, Debug, PartialEq)]
pub enum HostValue<H> {
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Node(H),
    Object(PlainObject<H>),
}

impl<H> From<Option<H>> for HostValue<H> {
    fn from(node: Option<H>) -> Self {
        node.map_or(Self::Null, Self::Node)
    }
}

/// A plain object with named fields.
#[derive(Clone, Debug, PartialEq)]
pub struct PlainObject<H> {
    fields: BTreeMap<String, HostValue<H>>,
}

impl<H> Default for PlainObject<H> {
    fn default() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }
}

impl<H> PlainObject<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: HostValue<H>) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&HostValue<H>> {
        self.fields.get(name)
    }
}

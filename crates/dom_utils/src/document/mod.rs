//! In-memory document implementing every host capability.
//!
//! Nodes live in maps keyed by [`NodeId`], with parent and child relations stored
//! separately from node data. Style comes from a small user-agent default table plus
//! inline `style` declarations; geometry comes from layout boxes assigned with
//! [`Document::set_layout`].

mod html;
mod layout;
mod style;

pub use layout::LayoutBox;

use crate::host::NodeTree;
use css_selectors::ElementAdapter;
use css_style_attr::{Declaration, expand_shorthand, parse_style_attribute_into_map};
use css_values_units::Viewport;
use std::collections::HashMap;

/// Stable identifier of a node within one [`Document`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// The document node, present in every document.
    pub const DOCUMENT: Self = Self(0);

    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Data stored for each node.
#[derive(Debug, Clone)]
pub enum NodeData {
    Document,
    Element(ElementData),
    Text(String),
    Comment(String),
}

/// Data for an element node.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    /// Tag name, ASCII lowercase.
    pub tag_name: String,
    pub attributes: HashMap<String, String>,
    /// Inline style longhands, kept in sync with the `style` attribute.
    pub inline_style: HashMap<String, String>,
    pub layout: Option<LayoutBox>,
}

impl ElementData {
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            ..Self::default()
        }
    }
}

/// A document tree with style and layout information.
#[derive(Debug, Clone)]
pub struct Document {
    next_id: u64,
    node_data: HashMap<NodeId, NodeData>,
    parents: HashMap<NodeId, NodeId>,
    children: HashMap<NodeId, Vec<NodeId>>,
    viewport: Viewport,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document with an 800x600 viewport.
    pub fn new() -> Self {
        let mut node_data = HashMap::new();
        node_data.insert(NodeId::DOCUMENT, NodeData::Document);
        Self {
            next_id: 1,
            node_data,
            parents: HashMap::new(),
            children: HashMap::new(),
            viewport: Viewport {
                width_px: 800,
                height_px: 600,
            },
        }
    }

    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn insert_node(&mut self, data: NodeData) -> NodeId {
        let id = NodeId::from_raw(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.node_data.insert(id, data);
        id
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.insert_node(NodeData::Element(ElementData::new(tag_name)))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.insert_node(NodeData::Text(text.into()))
    }

    /// Create a detached comment node.
    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.insert_node(NodeData::Comment(text.into()))
    }

    /// Get data for a node.
    pub fn get_node_data(&self, node: NodeId) -> Option<&NodeData> {
        self.node_data.get(&node)
    }

    pub(crate) fn element_data(&self, node: NodeId) -> Option<&ElementData> {
        match self.node_data.get(&node) {
            Some(NodeData::Element(data)) => Some(data),
            _ => None,
        }
    }

    fn element_data_mut(&mut self, node: NodeId) -> Option<&mut ElementData> {
        match self.node_data.get_mut(&node) {
            Some(NodeData::Element(data)) => Some(data),
            _ => None,
        }
    }

    /// Append `child` as the last child of `parent`, moving it out of its current parent.
    ///
    /// Returns `false` and leaves the tree unchanged when the move would create a cycle:
    /// `child` is `parent` or one of its ancestors, or `child` is the document node.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if child == NodeId::DOCUMENT || self.is_inclusive_ancestor(child, parent) {
            log::debug!(
                target: "dom_utils",
                "append_child: refusing to insert {child:?} under {parent:?}"
            );
            return false;
        }
        self.detach(child);
        self.parents.insert(child, parent);
        self.children.entry(parent).or_default().push(child);
        true
    }

    /// True if `ancestor` is `node` or appears on its parent chain.
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if candidate == ancestor {
                return true;
            }
            current = self.parent_node(candidate);
        }
        false
    }

    /// Remove `node` (and its subtree) from its parent. The subtree stays intact.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.parents.remove(&node)
            && let Some(siblings) = self.children.get_mut(&parent)
        {
            siblings.retain(|sibling| *sibling != node);
        }
    }

    /// Get parent of a node.
    pub fn parent_node(&self, node: NodeId) -> Option<NodeId> {
        self.parents.get(&node).copied()
    }

    /// Get children of a node.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.children.get(&node).map_or(&[][..], Vec::as_slice)
    }

    /// True if following parents from `node` reaches the document node.
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.is_inclusive_ancestor(NodeId::DOCUMENT, node)
    }

    /// The root element (usually `html`).
    pub fn document_element(&self) -> Option<NodeId> {
        self.first_element_child(NodeId::DOCUMENT)
    }

    /// The `body` child of the root element.
    pub fn body(&self) -> Option<NodeId> {
        let root = self.document_element()?;
        self.children(root)
            .iter()
            .copied()
            .find(|&child| self.tag_name(child) == "body")
    }

    /// Set an attribute. Setting `style` replaces the inline style.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        let value = value.into();
        let Some(element) = self.element_data_mut(node) else {
            return;
        };
        let name = name.to_ascii_lowercase();
        if name == "style" {
            element.inline_style = parse_style_attribute_into_map(&value);
        }
        element.attributes.insert(name, value);
    }

    /// Set one inline style property. Shorthands (`padding`, `border`, ...) expand to longhands.
    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        let Some(element) = self.element_data_mut(node) else {
            return;
        };
        let declaration = Declaration::new(property.trim().to_ascii_lowercase(), value.trim());
        for longhand in expand_shorthand(&declaration) {
            element.inline_style.insert(longhand.property, longhand.value);
        }
    }

    /// Remove one inline style longhand.
    pub fn remove_style(&mut self, node: NodeId, property: &str) {
        if let Some(element) = self.element_data_mut(node) {
            element.inline_style.remove(&property.to_ascii_lowercase());
        }
    }

    /// Assign the element's border box as computed by layout.
    pub fn set_layout(&mut self, node: NodeId, layout: LayoutBox) {
        if let Some(element) = self.element_data_mut(node) {
            element.layout = Some(layout);
        }
    }

    /// Element siblings of `element` paired with the index of `element` among them.
    fn sibling_elements(&self, element: NodeId) -> Option<(Vec<NodeId>, usize)> {
        let parent = self.parent_node(element)?;
        let siblings: Vec<NodeId> = self
            .children(parent)
            .iter()
            .copied()
            .filter(|&sibling| self.is_element(sibling))
            .collect();
        let position = siblings.iter().position(|&sibling| sibling == element)?;
        Some((siblings, position))
    }
}

impl ElementAdapter for Document {
    type Handle = NodeId;

    fn parent(&self, element: NodeId) -> Option<NodeId> {
        self.parent_node(element)
            .filter(|&parent| self.is_element(parent))
    }

    fn previous_sibling_element(&self, element: NodeId) -> Option<NodeId> {
        let (siblings, position) = self.sibling_elements(element)?;
        siblings.get(position.checked_sub(1)?).copied()
    }

    fn next_sibling_element(&self, element: NodeId) -> Option<NodeId> {
        let (siblings, position) = self.sibling_elements(element)?;
        siblings.get(position.saturating_add(1)).copied()
    }

    fn first_element_child(&self, element: NodeId) -> Option<NodeId> {
        self.children(element)
            .iter()
            .copied()
            .find(|&child| self.is_element(child))
    }

    fn tag_name(&self, element: NodeId) -> &str {
        self.element_data(element)
            .map_or("", |data| data.tag_name.as_str())
    }

    fn element_id(&self, element: NodeId) -> Option<&str> {
        self.attr(element, "id")
    }

    fn has_class(&self, element: NodeId, class: &str) -> bool {
        self.attr(element, "class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|token| token == class))
    }

    fn attr(&self, element: NodeId, name: &str) -> Option<&str> {
        self.element_data(element)?
            .attributes
            .get(name)
            .map(String::as_str)
    }
}

impl NodeTree for Document {
    fn is_element(&self, node: NodeId) -> bool {
        self.element_data(node).is_some()
    }
}

//! Layout geometry and offset parents for [`Document`] elements.
//! Spec: <https://drafts.csswg.org/cssom-view/#extensions-to-the-htmlelement-interface>

use super::{Document, NodeId};
use crate::host::{LayoutGeometry, NodeTree};
use css_selectors::ElementAdapter;

/// Border-box size of an element as produced by layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutBox {
    pub width: f64,
    pub height: f64,
}

impl LayoutBox {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Document {
    /// True if `element` is connected and neither it nor an ancestor is `display: none`.
    pub fn is_rendered(&self, element: NodeId) -> bool {
        if !self.is_element(element) || !self.is_connected(element) {
            return false;
        }
        let mut current = Some(element);
        while let Some(node) = current {
            if self.display_of(node) == "none" {
                return false;
            }
            current = self.parent(node);
        }
        true
    }

    /// The element's layout box, if it is rendered and has one.
    fn rendered_box(&self, element: NodeId) -> Option<LayoutBox> {
        if !self.is_rendered(element) {
            return None;
        }
        self.element_data(element)?.layout
    }
}

impl LayoutGeometry for Document {
    /// Rounded to whole pixels, like `offsetHeight`. Zero for unrendered elements.
    fn offset_height(&self, element: NodeId) -> f64 {
        self.rendered_box(element)
            .map_or(0.0, |layout| layout.height.round())
    }

    /// Rounded to whole pixels, like `offsetWidth`. Zero for unrendered elements.
    fn offset_width(&self, element: NodeId) -> f64 {
        self.rendered_box(element)
            .map_or(0.0, |layout| layout.width.round())
    }

    fn offset_parent(&self, element: NodeId) -> Option<NodeId> {
        if !self.is_rendered(element) || self.display_of(element) == "contents" {
            log::trace!(target: "dom_utils", "offset_parent({element:?}): not rendered");
            return None;
        }
        if self.document_element() == Some(element) || self.tag_name(element) == "body" {
            return None;
        }
        let own_position = self.position_of(element);
        if own_position == "fixed" {
            return None;
        }
        let positioned = own_position != "static";
        let mut ancestor = self.parent(element);
        while let Some(candidate) = ancestor {
            let tag = self.tag_name(candidate);
            if self.position_of(candidate) != "static"
                || tag == "body"
                || (!positioned && matches!(tag, "td" | "th" | "table"))
            {
                log::trace!(target: "dom_utils", "offset_parent({element:?}) -> {candidate:?}");
                return Some(candidate);
            }
            ancestor = self.parent(candidate);
        }
        None
    }
}

//! Building a [`Document`] from HTML markup with html5ever.

use super::{Document, NodeId};
use anyhow::{Context as _, Result};
use html5ever::tendril::TendrilSink as _;
use html5ever::{ParseOpts, parse_document};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

impl Document {
    /// Parse an HTML document. `style` attributes become inline style; no layout boxes
    /// are assigned, so offset sizes stay zero until [`Document::set_layout`] is called.
    ///
    /// # Errors
    /// Returns an error if the markup cannot be read by the parser.
    pub fn from_html(markup: &str) -> Result<Self> {
        let dom: RcDom = parse_document(RcDom::default(), ParseOpts::default())
            .from_utf8()
            .read_from(&mut markup.as_bytes())
            .context("failed to parse HTML document")?;

        let mut document = Self::new();
        document.convert_children(&dom.document, NodeId::DOCUMENT);
        log::debug!(
            target: "dom_utils",
            "parsed {} bytes of HTML into {} nodes",
            markup.len(),
            document.node_data.len()
        );
        Ok(document)
    }

    fn convert_children(&mut self, rc_node: &Handle, parent: NodeId) {
        for child in rc_node.children.borrow().iter() {
            self.convert_node(child, parent);
        }
    }

    /// Convert an html5ever node and its subtree, appending it under `parent`.
    fn convert_node(&mut self, rc_node: &Handle, parent: NodeId) {
        match &rc_node.data {
            RcNodeData::Document => self.convert_children(rc_node, parent),
            RcNodeData::Doctype { .. } | RcNodeData::ProcessingInstruction { .. } => {}
            RcNodeData::Text { contents } => {
                let text = contents.borrow().to_string();
                // Skip whitespace-only text nodes
                if text.trim().is_empty() {
                    return;
                }
                let node = self.create_text(text);
                self.append_child(parent, node);
            }
            RcNodeData::Comment { contents } => {
                let node = self.create_comment(contents.to_string());
                self.append_child(parent, node);
            }
            RcNodeData::Element { name, attrs, .. } => {
                let node = self.create_element(&name.local);
                for attr in attrs.borrow().iter() {
                    self.set_attribute(node, &attr.name.local, attr.value.to_string());
                }
                self.append_child(parent, node);
                self.convert_children(rc_node, node);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NodeTree as _;
    use anyhow::Context as _;
    use css_selectors::ElementAdapter as _;

    #[test]
    fn builds_html_head_and_body() -> Result<()> {
        let doc = Document::from_html("<!DOCTYPE html><p class='a b'>x</p>")?;
        let html = doc.document_element().context("no root")?;
        assert_eq!(doc.tag_name(html), "html");
        let body = doc.body().context("no body")?;
        let paragraph = doc.first_element_child(body).context("no paragraph")?;
        assert!(doc.has_class(paragraph, "b"));
        let text = doc.children(paragraph).first().copied().context("no text")?;
        assert!(!doc.is_element(text));
        Ok(())
    }

    #[test]
    fn style_attribute_becomes_inline_style() -> Result<()> {
        let doc = Document::from_html(r#"<div id="x" style="padding: 4px">y</div>"#)?;
        let body = doc.body().context("no body")?;
        let div = doc.first_element_child(body).context("no div")?;
        let data = doc.element_data(div).context("not an element")?;
        assert_eq!(
            data.inline_style.get("padding-bottom").map(String::as_str),
            Some("4px")
        );
        Ok(())
    }
}

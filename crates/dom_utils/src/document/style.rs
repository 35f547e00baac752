//! Computed style for [`Document`] elements.
//!
//! Resolution is deliberately small: user-agent defaults for `display` and `position`,
//! inline declarations on top, lengths resolved to pixels. Border widths collapse to
//! zero when the matching border style is `none` or `hidden`.

use super::{Document, NodeId};
use crate::host::{ComputedStyle, StyleResolver};
use css_selectors::ElementAdapter;
use css_style_attr::BOX_SIDES;
use css_values_units::{compute_length_px, format_px, parse_leading_number, parse_length_text};

/// Initial `font-size`, also the root font size for detached trees.
const DEFAULT_FONT_SIZE_PX: f32 = 16.0;

/// Elements the user-agent stylesheet never renders.
pub(crate) const UA_HIDDEN_TAGS: [&str; 7] =
    ["head", "script", "style", "meta", "link", "title", "base"];

/// Elements that are `display: block` in the user-agent stylesheet.
const BLOCK_TAGS: [&str; 28] = [
    "html", "body", "div", "p", "section", "article", "aside", "header", "footer", "nav", "main",
    "ul", "ol", "dl", "dd", "dt", "form", "fieldset", "figure", "blockquote", "pre", "hr", "h1",
    "h2", "h3", "h4", "h5", "h6",
];

/// `display` value from the user-agent stylesheet.
fn default_display(tag: &str) -> &'static str {
    if UA_HIDDEN_TAGS.contains(&tag) {
        return "none";
    }
    match tag {
        "li" => "list-item",
        "table" => "table",
        "thead" => "table-header-group",
        "tbody" => "table-row-group",
        "tfoot" => "table-footer-group",
        "tr" => "table-row",
        "td" | "th" => "table-cell",
        _ if BLOCK_TAGS.contains(&tag) => "block",
        _ => "inline",
    }
}

/// Used value of a `<line-width>` keyword.
fn line_width_keyword_px(keyword: &str) -> Option<f32> {
    match keyword {
        "thin" => Some(1.0),
        "medium" => Some(3.0),
        "thick" => Some(5.0),
        _ => None,
    }
}

/// Font sizes lengths on one element resolve against.
#[derive(Clone, Copy, Debug)]
struct FontContext {
    font_size: f32,
    root_font_size: f32,
}

impl Document {
    /// Inline declaration for `property`, if any.
    fn inline_value(&self, element: NodeId, property: &str) -> Option<&str> {
        self.element_data(element)?
            .inline_style
            .get(property)
            .map(String::as_str)
    }

    /// Computed `display`, lowercased.
    pub(crate) fn display_of(&self, element: NodeId) -> String {
        if let Some(display) = self.inline_value(element, "display") {
            return display.to_ascii_lowercase();
        }
        if self.attr(element, "hidden").is_some() {
            return String::from("none");
        }
        default_display(self.tag_name(element)).to_owned()
    }

    /// Computed `position`, lowercased.
    pub(crate) fn position_of(&self, element: NodeId) -> String {
        self.inline_value(element, "position")
            .map_or_else(|| String::from("static"), str::to_ascii_lowercase)
    }

    /// Resolve a `font-size` declaration against the parent's font size.
    fn resolve_font_size(&self, declared: Option<&str>, parent: f32, root: f32) -> f32 {
        let Some(text) = declared else {
            return parent;
        };
        if let Some(percent) = text.trim().strip_suffix('%') {
            let factor = parse_leading_number(percent) as f32;
            return if factor.is_finite() {
                parent * factor / 100.0
            } else {
                parent
            };
        }
        parse_length_text(text)
            .ok()
            .and_then(|length| compute_length_px(length, parent, root, Some(self.viewport)))
            .unwrap_or(parent)
    }

    /// Computed font size of `element` and of the root element.
    fn font_context(&self, element: NodeId) -> FontContext {
        let mut chain = vec![element];
        let mut current = element;
        while let Some(parent) = self.parent(current) {
            chain.push(parent);
            current = parent;
        }
        chain.reverse();

        let root_font_size = match (self.document_element(), chain.first()) {
            (Some(root), Some(&top)) if root == top => self.resolve_font_size(
                self.inline_value(root, "font-size"),
                DEFAULT_FONT_SIZE_PX,
                DEFAULT_FONT_SIZE_PX,
            ),
            _ => DEFAULT_FONT_SIZE_PX,
        };
        let font_size = chain.iter().fold(DEFAULT_FONT_SIZE_PX, |parent_size, &node| {
            self.resolve_font_size(
                self.inline_value(node, "font-size"),
                parent_size,
                root_font_size,
            )
        });
        FontContext {
            font_size,
            root_font_size,
        }
    }

    /// Resolve a length or percentage to pixels. Percentages refer to the parent's width.
    fn resolve_length_px(&self, element: NodeId, text: &str, fonts: FontContext) -> Option<f32> {
        if let Some(percent) = text.trim().strip_suffix('%') {
            let factor = parse_leading_number(percent) as f32;
            let basis = self
                .parent(element)
                .and_then(|parent| self.element_data(parent)?.layout)
                .map_or(0.0, |layout| layout.width as f32);
            return factor.is_finite().then(|| basis * factor / 100.0);
        }
        let length = parse_length_text(text).ok()?;
        compute_length_px(
            length,
            fonts.font_size,
            fonts.root_font_size,
            Some(self.viewport),
        )
    }

    /// Computed `padding-<side>` in pixels. Invalid and negative values fall back to zero.
    fn padding_px(&self, element: NodeId, side: &str, fonts: FontContext) -> f32 {
        self.inline_value(element, &format!("padding-{side}"))
            .and_then(|text| self.resolve_length_px(element, text, fonts))
            .filter(|value| *value >= 0.0)
            .unwrap_or(0.0)
    }

    /// Computed `border-<side>-style`, lowercased.
    fn border_style(&self, element: NodeId, side: &str) -> String {
        self.inline_value(element, &format!("border-{side}-style"))
            .map_or_else(|| String::from("none"), str::to_ascii_lowercase)
    }

    /// Computed `border-<side>-width` in pixels.
    fn border_width_px(&self, element: NodeId, side: &str, style: &str, fonts: FontContext) -> f32 {
        if matches!(style, "none" | "hidden") {
            return 0.0;
        }
        let declared = self
            .inline_value(element, &format!("border-{side}-width"))
            .unwrap_or("medium")
            .to_ascii_lowercase();
        line_width_keyword_px(&declared)
            .or_else(|| {
                parse_length_text(&declared)
                    .ok()
                    .and_then(|length| {
                        compute_length_px(
                            length,
                            fonts.font_size,
                            fonts.root_font_size,
                            Some(self.viewport),
                        )
                    })
                    .filter(|value| *value >= 0.0)
            })
            .unwrap_or(3.0)
    }
}

impl StyleResolver for Document {
    fn computed_style(&self, element: NodeId) -> ComputedStyle {
        let Some(data) = self.element_data(element) else {
            return ComputedStyle::new();
        };
        let mut style: ComputedStyle = data
            .inline_style
            .iter()
            .map(|(property, value)| (property.clone(), value.clone()))
            .collect();

        let fonts = self.font_context(element);
        style.set("display", self.display_of(element));
        style.set("position", self.position_of(element));
        style.set("font-size", format_px(fonts.font_size));
        for side in BOX_SIDES {
            style.set(
                format!("padding-{side}"),
                format_px(self.padding_px(element, side, fonts)),
            );
            let border_style = self.border_style(element, side);
            style.set(
                format!("border-{side}-width"),
                format_px(self.border_width_px(element, side, &border_style, fonts)),
            );
            style.set(format!("border-{side}-style"), border_style);
        }
        style
    }
}

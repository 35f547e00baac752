//! CSS Style Attributes — style="..." attribute processing.
//! Spec: <https://www.w3.org/TR/css-style-attr/>

#![forbid(unsafe_code)]

mod shorthands;

pub use shorthands::{BOX_SIDES, expand_shorthand};

use std::collections::HashMap;

/// A single CSS declaration parsed from a style attribute.
///
/// Spec: <https://www.w3.org/TR/css-style-attr/#interpreting>
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// Property name normalized to ASCII lowercase as per CSS case-insensitivity.
    pub property: String,
    /// Raw value slice trimmed of surrounding ASCII whitespace. May contain spaces.
    pub value: String,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// Parse the value of a `style` attribute into a list of declarations.
///
/// This performs a minimal, resilient parse:
/// - Splits on semicolons (`;`) into declaration items.
/// - For each item, splits on the first colon (`:`) into property and value.
/// - Trims ASCII whitespace and lowercases the property name.
/// - Drops a trailing `!important`; inline declarations all come from one origin.
/// - Skips empty or invalid items (no colon, empty property, or empty value after trimming).
///
/// Spec: <https://www.w3.org/TR/css-style-attr/#interpreting>
pub fn parse_style_attribute(input: &str) -> Vec<Declaration> {
    let mut out: Vec<Declaration> = Vec::new();
    for raw_item in input.split(';') {
        let item = raw_item.trim_matches(is_ascii_whitespace);
        let Some((raw_prop, raw_value)) = item.split_once(':') else {
            continue;
        };
        let property_text = raw_prop.trim_matches(is_ascii_whitespace);
        let mut value_text = raw_value.trim_matches(is_ascii_whitespace);
        if let Some(important_at) = value_text.to_ascii_lowercase().rfind("!important") {
            value_text = value_text
                .get(..important_at)
                .unwrap_or_default()
                .trim_matches(is_ascii_whitespace);
        }
        if property_text.is_empty() || value_text.is_empty() {
            continue;
        }
        out.push(Declaration::new(
            property_text.to_ascii_lowercase(),
            value_text,
        ));
    }
    out
}

/// Parse into a map keyed by longhand property name.
///
/// Shorthands are expanded first. If a property appears multiple times, the last one
/// wins, matching standard source-order behavior for duplicate declarations within
/// the same block.
///
/// Spec: <https://www.w3.org/TR/css-style-attr/#interpreting>
pub fn parse_style_attribute_into_map(input: &str) -> HashMap<String, String> {
    let mut map: HashMap<String, String> = HashMap::new();
    for decl in parse_style_attribute(input) {
        for longhand in expand_shorthand(&decl) {
            map.insert(longhand.property, longhand.value);
        }
    }
    map
}

/// ASCII whitespace per CSS Syntax (TAB, LF, FF, CR, SPACE).
///
/// Spec: <https://www.w3.org/TR/css-syntax-3/#whitespace>
const fn is_ascii_whitespace(character: char) -> bool {
    matches!(
        character,
        '\u{0009}' | '\u{000A}' | '\u{000C}' | '\u{000D}' | '\u{0020}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_normalizes_declarations() {
        let parsed = parse_style_attribute(" Display : none ;; color:red; bogus; width: ; ");
        assert_eq!(
            parsed,
            vec![
                Declaration::new("display", "none"),
                Declaration::new("color", "red"),
            ]
        );
    }

    #[test]
    fn strips_important() {
        let parsed = parse_style_attribute("padding-top: 4px !IMPORTANT");
        assert_eq!(parsed, vec![Declaration::new("padding-top", "4px")]);
    }

    #[test]
    fn later_declarations_win_over_shorthand() {
        let map = parse_style_attribute_into_map("padding: 10px; padding-left: 3px");
        assert_eq!(map.get("padding-top").map(String::as_str), Some("10px"));
        assert_eq!(map.get("padding-left").map(String::as_str), Some("3px"));
        assert_eq!(map.get("padding"), None);
    }
}

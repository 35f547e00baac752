//! Box shorthand expansion for `padding`, `border-width`, `border-style` and `border`.
//! Spec: <https://www.w3.org/TR/css-box-3/#padding-physical>,
//! <https://www.w3.org/TR/css-backgrounds-3/#border-shorthands>

use crate::Declaration;

/// Physical sides in shorthand order.
pub const BOX_SIDES: [&str; 4] = ["top", "right", "bottom", "left"];

/// `<line-style>` keywords.
const LINE_STYLES: [&str; 10] = [
    "none", "hidden", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset", "outset",
];

/// Expand a declaration into longhands. Declarations that are not a known shorthand,
/// or whose value does not fit the shorthand grammar, come back unchanged.
pub fn expand_shorthand(decl: &Declaration) -> Vec<Declaration> {
    let parts: Vec<&str> = decl.value.split_ascii_whitespace().collect();
    let expanded = match decl.property.as_str() {
        "padding" => expand_sides(&parts, |side| format!("padding-{side}")),
        "margin" => expand_sides(&parts, |side| format!("margin-{side}")),
        "border-width" => expand_sides(&parts, |side| format!("border-{side}-width")),
        "border-style" => expand_sides(&parts, |side| format!("border-{side}-style")),
        "border-color" => expand_sides(&parts, |side| format!("border-{side}-color")),
        "border" => expand_border(&parts, &BOX_SIDES),
        "border-top" => expand_border(&parts, &["top"]),
        "border-right" => expand_border(&parts, &["right"]),
        "border-bottom" => expand_border(&parts, &["bottom"]),
        "border-left" => expand_border(&parts, &["left"]),
        _ => None,
    };
    expanded.unwrap_or_else(|| vec![decl.clone()])
}

/// 1–4 value box syntax: `a` / `a b` / `a b c` / `a b c d` for top, right, bottom, left.
fn expand_sides(
    parts: &[&str],
    longhand: impl Fn(&str) -> String,
) -> Option<Vec<Declaration>> {
    let values: [&str; 4] = match *parts {
        [all] => [all, all, all, all],
        [vertical, horizontal] => [vertical, horizontal, vertical, horizontal],
        [top, horizontal, bottom] => [top, horizontal, bottom, horizontal],
        [top, right, bottom, left] => [top, right, bottom, left],
        _ => return None,
    };
    Some(
        BOX_SIDES
            .iter()
            .zip(values)
            .map(|(side, value)| Declaration::new(longhand(side), value))
            .collect(),
    )
}

/// `border` / `border-<side>`: width, style and color in any order, each at most once.
/// Omitted components reset to their initial values.
fn expand_border(parts: &[&str], sides: &[&str]) -> Option<Vec<Declaration>> {
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }
    let mut width = None;
    let mut style = None;
    let mut color = None;
    for &part in parts {
        let lower = part.to_ascii_lowercase();
        let slot = if LINE_STYLES.contains(&lower.as_str()) {
            &mut style
        } else if is_line_width(&lower) {
            &mut width
        } else {
            &mut color
        };
        if slot.replace(part).is_some() {
            return None;
        }
    }
    let mut out = Vec::with_capacity(sides.len() * 3);
    for side in sides {
        out.push(Declaration::new(
            format!("border-{side}-width"),
            width.unwrap_or("medium"),
        ));
        out.push(Declaration::new(
            format!("border-{side}-style"),
            style.unwrap_or("none"),
        ));
        out.push(Declaration::new(
            format!("border-{side}-color"),
            color.unwrap_or("currentcolor"),
        ));
    }
    Some(out)
}

/// `<line-width>`: a keyword or something that starts like a number.
fn is_line_width(lower: &str) -> bool {
    matches!(lower, "thin" | "medium" | "thick")
        || lower
            .bytes()
            .next()
            .is_some_and(|byte| byte.is_ascii_digit() || matches!(byte, b'.' | b'+' | b'-'))
}

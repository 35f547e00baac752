//! Content-box metrics.
//!
//! The content box is the offset (border-box) size minus padding and border on one axis.
//! Style values are read as text and parsed by their leading number, so a value that is
//! not numeric turns the whole result into NaN. That is reported as-is, not clamped.

use crate::host::{LayoutGeometry, StyleResolver};
use css_values_units::parse_leading_number;

/// Resolved-style properties subtracted on each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    Vertical,
    Horizontal,
}

impl Axis {
    const fn edge_properties(self) -> [&'static str; 4] {
        match self {
            Self::Vertical => [
                "padding-top",
                "padding-bottom",
                "border-top-width",
                "border-bottom-width",
            ],
            Self::Horizontal => [
                "padding-left",
                "padding-right",
                "border-left-width",
                "border-right-width",
            ],
        }
    }
}

/// Content-box height of `element` in CSS pixels; `0.0` when there is no element.
pub fn get_height<T>(host: &T, element: Option<T::Handle>) -> f64
where
    T: LayoutGeometry + StyleResolver,
{
    element.map_or(0.0, |handle| {
        content_size(host, handle, host.offset_height(handle), Axis::Vertical)
    })
}

/// Content-box width of `element` in CSS pixels; `0.0` when there is no element.
pub fn get_width<T>(host: &T, element: Option<T::Handle>) -> f64
where
    T: LayoutGeometry + StyleResolver,
{
    element.map_or(0.0, |handle| {
        content_size(host, handle, host.offset_width(handle), Axis::Horizontal)
    })
}

/// Subtract the axis' padding and border widths from an offset size.
fn content_size<T: StyleResolver>(host: &T, element: T::Handle, offset: f64, axis: Axis) -> f64 {
    let style = host.computed_style(element);
    let [padding_start, padding_end, border_start, border_end] =
        axis.edge_properties().map(|property| parse_leading_number(style.property_value(property)));
    let size = offset - (padding_start + padding_end + border_start + border_end);
    log::trace!(
        target: "dom_utils",
        "{axis:?} content size: offset={offset} padding=({padding_start}, {padding_end}) border=({border_start}, {border_end}) -> {size}"
    );
    size
}

//! DOM convenience helpers.
//!
//! Four independent, stateless operations over a host document:
//! - [`is_element`]: classify an arbitrary host value as an element.
//! - [`find_single`]: the root itself if it matches a selector, else its first matching descendant.
//! - [`get_height`] / [`get_width`]: content-box size (offset size minus padding and border).
//! - [`is_visible`]: whether an element is attached and rendered (has an offset parent).
//!
//! The host is never read from a global. Callers pass something implementing the
//! capability traits in [`host`]; [`Document`] is an in-memory implementation that
//! follows browser rules for computed style and offset parents.

#![forbid(unsafe_code)]

pub mod document;
mod element;
pub mod host;
mod metrics;
mod select;
mod value;
mod visibility;

pub use css_selectors::{ElementAdapter, SelectorError};
pub use document::{Document, ElementData, LayoutBox, NodeData, NodeId};
pub use element::{is_element, is_element_shape};
pub use host::{ComputedStyle, LayoutGeometry, NodeTree, StyleResolver};
pub use metrics::{get_height, get_width};
pub use select::find_single;
pub use value::{HostValue, PlainObject};
pub use visibility::is_visible;

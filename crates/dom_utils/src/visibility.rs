//! Rendered-ness check.

use crate::host::LayoutGeometry;

/// True if `element` is present and has an offset parent.
///
/// This is a coarse test. It is false for detached elements and for elements inside
/// a `display: none` subtree, but an element that is zero-sized, clipped, scrolled out
/// of view or covered by another element still counts as visible. Elements that never
/// have an offset parent (the root element, `body`, `position: fixed` boxes) are
/// reported as not visible.
pub fn is_visible<T: LayoutGeometry>(host: &T, element: Option<T::Handle>) -> bool {
    element.is_some_and(|handle| host.offset_parent(handle).is_some())
}

//! Single-element lookup.

use crate::element::is_element;
use crate::host::NodeTree;
use crate::value::HostValue;
use css_selectors::SelectorError;

/// The first element matching `selector`: `root` itself when it matches, otherwise its
/// first matching descendant in document order.
///
/// A `root` that is not an element gives `Ok(None)` without looking at the selector.
/// Matching goes through [`NodeTree::matches`] and [`NodeTree::query_selector`], so a
/// host with its own selector engine decides which selectors it accepts.
///
/// # Errors
/// Returns the host's `SelectorError`. With the bundled engine that is a syntax error
/// for malformed text, or `SelectorError::UnsupportedFeature` for valid selectors the
/// engine does not evaluate (`:hover`, `::before`, namespaces, ...).
pub fn find_single<T: NodeTree>(
    host: &T,
    root: &HostValue<T::Handle>,
    selector: &str,
) -> Result<Option<T::Handle>, SelectorError> {
    let element = match root {
        HostValue::Node(node) if is_element(Some(host), root) => *node,
        _ => {
            log::trace!(target: "dom_utils", "find_single: root is not an element");
            return Ok(None);
        }
    };
    let log_rejection = |error: &SelectorError| {
        log::debug!(target: "dom_utils", "find_single: rejected selector {selector:?}: {error}");
    };
    if host.matches(element, selector).inspect_err(log_rejection)? {
        return Ok(Some(element));
    }
    host.query_selector(element, selector).inspect_err(log_rejection)
}

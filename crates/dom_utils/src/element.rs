//! Element detection.

use crate::host::NodeTree;
use crate::value::HostValue;

/// `nodeType` of an element node.
const ELEMENT_NODE: f64 = 1.0;

/// True if `value` represents an element.
///
/// With a host available, only a node handle the host identifies as an element counts;
/// structural look-alikes do not. Without one (`host` is `None`), the value is judged by
/// shape alone through [`is_element_shape`].
///
/// Never fails: undefined, null, primitives and plain objects all give `false`.
pub fn is_element<T: NodeTree>(host: Option<&T>, value: &HostValue<T::Handle>) -> bool {
    match host {
        Some(tree) => matches!(value, HostValue::Node(node) if tree.is_element(*node)),
        None => is_element_shape(value),
    }
}

/// Structural check: an object whose `nodeType` is the number 1 and whose `nodeName`
/// is a string. Node handles have no readable fields here and never pass.
pub fn is_element_shape<H>(value: &HostValue<H>) -> bool {
    let HostValue::Object(object) = value else {
        return false;
    };
    let node_type_matches = matches!(
        object.get("nodeType"),
        Some(&HostValue::Number(node_type)) if node_type == ELEMENT_NODE
    );
    node_type_matches && matches!(object.get("nodeName"), Some(HostValue::String(_)))
}

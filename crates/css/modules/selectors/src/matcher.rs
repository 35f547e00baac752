//! CSS selector matching engine.
//! Spec: <https://www.w3.org/TR/selectors-3/>

use crate::{
    AttrOperator, Combinator, ComplexSelector, CompoundSelector, ElementAdapter, PseudoClass,
    SelectorList, SimpleSelector,
};
use core::iter::from_fn;

/// Match a selector list against an element.
/// Spec: Section 3, 4
pub fn matches_selector_list<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    list: &SelectorList,
) -> bool {
    list.selectors
        .iter()
        .any(|selector_item| matches_complex(adapter, element, selector_item))
}

/// Match a complex selector against an element.
/// Spec: Section 3, 11 — Right-to-left matching strategy
fn matches_complex<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    sel: &ComplexSelector,
) -> bool {
    matches_from(adapter, element, sel, sel.rest.len())
}

/// Match compound `position` (0 = `sel.first`, n = `sel.rest[n - 1]`) against `element`,
/// then relate everything to its left through the combinators.
///
/// Candidates for each combinator are tried in turn, so a failed relation further left
/// backtracks to the next ancestor or sibling instead of giving up.
fn matches_from<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    sel: &ComplexSelector,
    position: usize,
) -> bool {
    let Some(index) = position.checked_sub(1) else {
        return matches_compound(adapter, element, &sel.first);
    };
    let Some((combinator, compound)) = sel.rest.get(index) else {
        return false;
    };
    if !matches_compound(adapter, element, compound) {
        return false;
    }
    match combinator {
        Combinator::Descendant => {
            let mut current_parent = adapter.parent(element);
            while let Some(ancestor_element) = current_parent {
                if matches_from(adapter, ancestor_element, sel, index) {
                    return true;
                }
                current_parent = adapter.parent(ancestor_element);
            }
            false
        }
        Combinator::Child => adapter
            .parent(element)
            .is_some_and(|parent_el| matches_from(adapter, parent_el, sel, index)),
        Combinator::AdjacentSibling => adapter
            .previous_sibling_element(element)
            .is_some_and(|prev_el| matches_from(adapter, prev_el, sel, index)),
        Combinator::GeneralSibling => {
            let mut current_sibling = adapter.previous_sibling_element(element);
            while let Some(sibling_element) = current_sibling {
                if matches_from(adapter, sibling_element, sel, index) {
                    return true;
                }
                current_sibling = adapter.previous_sibling_element(sibling_element);
            }
            false
        }
    }
}

/// Match a compound selector against a single element.
/// Spec: Section 5–8
fn matches_compound<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    compound: &CompoundSelector,
) -> bool {
    compound.simples.iter().all(|simple| match simple {
        SimpleSelector::Universal => true,
        SimpleSelector::Type(type_name) => {
            adapter.tag_name(element).eq_ignore_ascii_case(type_name)
        }
        SimpleSelector::Class(class_name) => adapter.has_class(element, class_name),
        SimpleSelector::IdSelector(id_value) => adapter
            .element_id(element)
            .is_some_and(|value| value == id_value),
        SimpleSelector::AttrExists(name) => adapter.attr(element, name).is_some(),
        SimpleSelector::AttrMatch {
            name,
            operator,
            value,
        } => adapter
            .attr(element, name)
            .is_some_and(|attr_value| matches_attr_value(*operator, attr_value, value)),
        SimpleSelector::PseudoClass(pseudo) => matches_pseudo_class(adapter, element, *pseudo),
        SimpleSelector::Not(list) => !matches_selector_list(adapter, element, list),
    })
}

/// Compare an attribute's value against a selector value.
/// Spec: Section 6.3.1, 6.3.2 — the substring operators never match an empty value
fn matches_attr_value(operator: AttrOperator, actual: &str, expected: &str) -> bool {
    match operator {
        AttrOperator::Equals => actual == expected,
        AttrOperator::Includes => {
            !expected.is_empty()
                && !expected.contains(|ch: char| ch.is_ascii_whitespace())
                && actual.split_ascii_whitespace().any(|word| word == expected)
        }
        AttrOperator::DashMatch => {
            actual == expected
                || actual
                    .strip_prefix(expected)
                    .is_some_and(|rest| rest.starts_with('-'))
        }
        AttrOperator::Prefix => !expected.is_empty() && actual.starts_with(expected),
        AttrOperator::Suffix => !expected.is_empty() && actual.ends_with(expected),
        AttrOperator::Substring => !expected.is_empty() && actual.contains(expected),
    }
}

/// Structural pseudo-classes, read from sibling and parent links.
/// Spec: Section 6.6.5 — an element without a parent element is not a child here
fn matches_pseudo_class<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    pseudo: PseudoClass,
) -> bool {
    let has_parent = adapter.parent(element).is_some();
    let first = || adapter.previous_sibling_element(element).is_none();
    let last = || adapter.next_sibling_element(element).is_none();
    let tag = adapter.tag_name(element);
    let same_type = |sibling: A::Handle| adapter.tag_name(sibling).eq_ignore_ascii_case(tag);
    match pseudo {
        PseudoClass::Root => !has_parent,
        PseudoClass::FirstChild => has_parent && first(),
        PseudoClass::LastChild => has_parent && last(),
        PseudoClass::OnlyChild => has_parent && first() && last(),
        PseudoClass::FirstOfType => {
            has_parent
                && !siblings(adapter, element, A::previous_sibling_element).any(same_type)
        }
        PseudoClass::LastOfType => {
            has_parent && !siblings(adapter, element, A::next_sibling_element).any(same_type)
        }
    }
}

/// Sibling elements of `element` in the direction given by `step`.
fn siblings<'tree, A: ElementAdapter>(
    adapter: &'tree A,
    element: A::Handle,
    step: fn(&A, A::Handle) -> Option<A::Handle>,
) -> impl Iterator<Item = A::Handle> + 'tree {
    let mut current = step(adapter, element);
    from_fn(move || {
        let sibling = current?;
        current = step(adapter, sibling);
        Some(sibling)
    })
}

/// Find the first descendant of `root`, in document order, that matches `list`.
///
/// `root` itself is never returned. Combinators are evaluated against the whole tree,
/// so ancestors of `root` may satisfy the left-hand side of a selector.
pub fn query_first<A: ElementAdapter>(
    adapter: &A,
    root: A::Handle,
    list: &SelectorList,
) -> Option<A::Handle> {
    let mut next = adapter.first_element_child(root);
    while let Some(element) = next {
        if matches_selector_list(adapter, element, list) {
            return Some(element);
        }
        next = next_in_subtree(adapter, root, element);
    }
    None
}

/// Pre-order successor of `element` restricted to the subtree of `root`.
fn next_in_subtree<A: ElementAdapter>(
    adapter: &A,
    root: A::Handle,
    element: A::Handle,
) -> Option<A::Handle> {
    if let Some(child) = adapter.first_element_child(element) {
        return Some(child);
    }
    let mut current = element;
    while current != root {
        if let Some(sibling) = adapter.next_sibling_element(current) {
            return Some(sibling);
        }
        current = adapter.parent(current)?;
    }
    None
}

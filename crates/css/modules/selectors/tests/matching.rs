//! Matching and subtree search against a small in-memory tree.

use css_selectors::{
    ElementAdapter, SelectorError, matches_selector_list, parse_selector_list, query_first,
};

struct Node {
    tag: &'static str,
    id: Option<&'static str>,
    classes: Vec<&'static str>,
    attrs: Vec<(&'static str, &'static str)>,
    parent: Option<usize>,
    children: Vec<usize>,
}

#[derive(Default)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn add(
        &mut self,
        parent: Option<usize>,
        tag: &'static str,
        id: Option<&'static str>,
        classes: &[&'static str],
    ) -> usize {
        let index = self.nodes.len();
        self.nodes.push(Node {
            tag,
            id,
            classes: classes.to_vec(),
            attrs: Vec::new(),
            parent,
            children: Vec::new(),
        });
        if let Some(parent_index) = parent {
            self.nodes[parent_index].children.push(index);
        }
        index
    }

    fn sibling(&self, element: usize, step: isize) -> Option<usize> {
        let parent = self.nodes[element].parent?;
        let siblings = &self.nodes[parent].children;
        let position = siblings.iter().position(|&child| child == element)?;
        let target = position.checked_add_signed(step)?;
        siblings.get(target).copied()
    }
}

impl ElementAdapter for Tree {
    type Handle = usize;

    fn parent(&self, element: usize) -> Option<usize> {
        self.nodes[element].parent
    }

    fn previous_sibling_element(&self, element: usize) -> Option<usize> {
        self.sibling(element, -1)
    }

    fn next_sibling_element(&self, element: usize) -> Option<usize> {
        self.sibling(element, 1)
    }

    fn first_element_child(&self, element: usize) -> Option<usize> {
        self.nodes[element].children.first().copied()
    }

    fn tag_name(&self, element: usize) -> &str {
        self.nodes[element].tag
    }

    fn element_id(&self, element: usize) -> Option<&str> {
        self.nodes[element].id
    }

    fn has_class(&self, element: usize, class: &str) -> bool {
        self.nodes[element].classes.contains(&class)
    }

    fn attr(&self, element: usize, name: &str) -> Option<&str> {
        self.nodes[element]
            .attrs
            .iter()
            .find(|(attr_name, _)| *attr_name == name)
            .map(|(_, value)| *value)
    }
}

/// ```text
/// section#root.outer
///   div.a
///     span.x          (2)
///       b             (6)
///   ul
///     li.x            (4)
///     li.y[data-k=v]  (5)
/// ```
fn sample() -> Tree {
    let mut tree = Tree::default();
    let root = tree.add(None, "section", Some("root"), &["outer"]);
    let div = tree.add(Some(root), "div", None, &["a"]);
    tree.add(Some(div), "span", None, &["x"]);
    let list = tree.add(Some(root), "ul", None, &[]);
    tree.add(Some(list), "li", None, &["x"]);
    let item = tree.add(Some(list), "li", None, &["y"]);
    tree.nodes[item].attrs.push(("data-k", "v"));
    tree.add(Some(2), "b", None, &[]);
    tree
}

#[test]
fn query_first_walks_in_document_order() {
    let tree = sample();
    let list = parse_selector_list(".x").unwrap();
    assert_eq!(query_first(&tree, 0, &list), Some(2));
}

#[test]
fn query_first_excludes_the_root() {
    let tree = sample();
    let list = parse_selector_list("section").unwrap();
    assert_eq!(query_first(&tree, 0, &list), None);
}

#[test]
fn query_first_stays_inside_the_subtree() {
    let tree = sample();
    let list = parse_selector_list("li").unwrap();
    assert_eq!(query_first(&tree, 1, &list), None);
    assert_eq!(query_first(&tree, 3, &list), Some(4));
}

#[test]
fn combinators_may_reach_outside_the_subtree() {
    let tree = sample();
    let list = parse_selector_list("section.outer li.y").unwrap();
    assert_eq!(query_first(&tree, 3, &list), Some(5));
}

#[test]
fn sibling_combinators_and_attributes() {
    let tree = sample();
    let adjacent = parse_selector_list("li.x + li[data-k='v']").unwrap();
    assert!(matches_selector_list(&tree, 5, &adjacent));
    let general = parse_selector_list("div ~ ul").unwrap();
    assert!(matches_selector_list(&tree, 3, &general));
    let missing = parse_selector_list("[data-k=w]").unwrap();
    assert!(!matches_selector_list(&tree, 5, &missing));
}

#[test]
fn descendant_matching_backtracks_over_ancestors() {
    let tree = sample();
    // The nearest ancestor matching `*` is `span`, whose parent is not `#root`; the
    // match has to continue up to `div`.
    let list = parse_selector_list("#root > * b").unwrap();
    assert!(matches_selector_list(&tree, 6, &list));
}

#[test]
fn selector_list_matches_any_member() {
    let tree = sample();
    let list = parse_selector_list("ul, .nope").unwrap();
    assert!(matches_selector_list(&tree, 3, &list));
    assert!(!matches_selector_list(&tree, 4, &list));
}

#[test]
fn class_and_id_are_case_sensitive_but_type_is_not() {
    let tree = sample();
    assert!(matches_selector_list(
        &tree,
        0,
        &parse_selector_list("SECTION#root").unwrap()
    ));
    assert!(!matches_selector_list(
        &tree,
        0,
        &parse_selector_list("#ROOT").unwrap()
    ));
    assert!(!matches_selector_list(
        &tree,
        1,
        &parse_selector_list(".A").unwrap()
    ));
}

#[test]
fn invalid_selectors_are_errors() {
    assert!(matches!(
        parse_selector_list("div >> span"),
        Err(SelectorError::DanglingCombinator)
    ));
    assert!(matches!(
        parse_selector_list("div:"),
        Err(SelectorError::MissingIdentifier { position: 4 })
    ));
    assert!(matches!(
        parse_selector_list("svg|rect"),
        Err(SelectorError::UnsupportedFeature { .. })
    ));
}

#[test]
fn structural_pseudo_classes() {
    let tree = sample();
    let first = parse_selector_list("li:first-child").unwrap();
    assert_eq!(query_first(&tree, 0, &first), Some(4));
    let last = parse_selector_list("li:last-child").unwrap();
    assert_eq!(query_first(&tree, 0, &last), Some(5));
    let only = parse_selector_list(":only-child").unwrap();
    assert_eq!(query_first(&tree, 0, &only), Some(2));
    let root = parse_selector_list(":root").unwrap();
    assert!(matches_selector_list(&tree, 0, &root));
    assert!(!matches_selector_list(&tree, 1, &root));
    // The root has no parent element, so it is nobody's first child.
    assert!(!matches_selector_list(&tree, 0, &first));
}

#[test]
fn of_type_pseudo_classes_compare_tag_names() {
    let tree = sample();
    let first_of_type = parse_selector_list(":first-of-type").unwrap();
    let last_of_type = parse_selector_list(":last-of-type").unwrap();
    assert!(matches_selector_list(&tree, 1, &first_of_type));
    assert!(matches_selector_list(&tree, 3, &first_of_type));
    assert!(matches_selector_list(&tree, 4, &first_of_type));
    assert!(!matches_selector_list(&tree, 5, &first_of_type));
    assert!(matches_selector_list(&tree, 5, &last_of_type));
    assert!(!matches_selector_list(&tree, 4, &last_of_type));
}

#[test]
fn negation_excludes_any_listed_selector() {
    let tree = sample();
    let list = parse_selector_list("li:not(.x)").unwrap();
    assert_eq!(query_first(&tree, 0, &list), Some(5));
    let nested = parse_selector_list(":not(div, div *, section)").unwrap();
    assert_eq!(query_first(&tree, 0, &nested), Some(3));
}

#[test]
fn attribute_value_operators() {
    let mut tree = sample();
    tree.nodes[4].attrs.push(("lang", "en-US"));
    tree.nodes[4].attrs.push(("rel", "noopener  external"));
    tree.nodes[4].attrs.push(("href", "https://example.com/a.pdf"));
    let matches = |selector: &str| {
        let list = parse_selector_list(selector).unwrap();
        matches_selector_list(&tree, 4, &list)
    };
    assert!(matches("[lang|=en]"));
    assert!(!matches("[lang|=e]"));
    assert!(matches("[rel~=external]"));
    assert!(!matches("[rel~=ext]"));
    assert!(matches("[href^='https:']"));
    assert!(matches("[href$='.pdf']"));
    assert!(matches("[href*=example]"));
    assert!(!matches("[href^='']"));
}

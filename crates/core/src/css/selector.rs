//! Selector scoring and matching.
//!
//! Both work on the raw selector text. Only the first whitespace-separated
//! token of a selector takes part in matching, so `nav a` behaves like `nav`.

use crate::dom::NodeRef;

/// Score a selector for cascade ordering.
///
/// `#` occurrences count 100 each, `.` occurrences 10 each, and every
/// whitespace-separated token not starting with `#` or `.` counts 1. A token
/// like `div.note` therefore scores both as a class and as an element.
pub fn specificity(selector: &str) -> u32 {
    let ids = selector.split('#').count() as u32 - 1;
    let classes = selector.split('.').count() as u32 - 1;
    let elements = selector
        .split_whitespace()
        .filter(|token| !token.starts_with('#') && !token.starts_with('.'))
        .count() as u32;
    ids * 100 + classes * 10 + elements
}

/// Whether `selector` applies to `node`. Non-element nodes never match.
pub fn matches(selector: &str, node: &NodeRef<'_>) -> bool {
    let Some(tag) = node.tag_name() else {
        return false;
    };
    let Some(token) = selector.split_whitespace().next() else {
        return false;
    };

    if let Some(id) = token.strip_prefix('#') {
        node.element_id() == Some(id)
    } else if let Some(class) = token.strip_prefix('.') {
        node.classes().any(|c| c == class)
    } else if token.contains('[') {
        // Attribute selectors are accepted by the parser but never match.
        false
    } else {
        token.eq_ignore_ascii_case(tag)
    }
}

//! Cascade resolution: matching rules in specificity order, then the inline
//! `style` attribute, then inherited values from the parent.

use super::parser::parse_declarations;
use super::{ComputedStyle, PropertyMap, Rule, Stylesheet, DEFAULT_STYLESHEET};
use crate::dom::{Node, NodeRef};
use log::debug;

/// Properties a node takes from its parent when it does not set them.
pub const INHERITED_PROPERTIES: &[&str] = &[
    "color",
    "font-size",
    "font-weight",
    "font-style",
    "font-family",
    "line-height",
    "text-align",
    "visibility",
    "white-space",
];

/// Parse a flat `prop: value; prop: value` list, as found in a `style`
/// attribute.
pub fn parse_inline_style(style: &str) -> PropertyMap {
    let mut map = PropertyMap::new();
    parse_declarations(style, &mut map);
    map
}

/// Holds the running rule list and resolves styles against it.
#[derive(Debug, Clone)]
pub struct Stylist {
    stylesheet: Stylesheet,
}

impl Default for Stylist {
    fn default() -> Self {
        Self::new()
    }
}

impl Stylist {
    /// A stylist preloaded with the built-in stylesheet.
    pub fn new() -> Self {
        let mut stylist = Self::empty();
        stylist.add_stylesheet(DEFAULT_STYLESHEET);
        debug!("loaded {} built-in rules", stylist.stylesheet.len());
        stylist
    }

    /// A stylist with no rules at all.
    pub fn empty() -> Self {
        Self {
            stylesheet: Stylesheet::new(),
        }
    }

    /// Append the rules in `css` after every rule already known.
    pub fn add_stylesheet(&mut self, css: &str) -> usize {
        self.stylesheet.parse(css)
    }

    pub fn stylesheet(&self) -> &Stylesheet {
        &self.stylesheet
    }

    pub fn rules(&self) -> &[Rule] {
        self.stylesheet.rules()
    }

    /// Rules matching `node`, lowest specificity first. Equal scores keep
    /// insertion order.
    pub fn matching_rules(&self, node: &NodeRef<'_>) -> Vec<&Rule> {
        let mut matched: Vec<&Rule> = self.rules().iter().filter(|r| r.matches(node)).collect();
        matched.sort_by_key(|rule| rule.specificity);
        matched
    }

    /// Matching declarations merged in cascade order, then the inline
    /// `style` attribute on top. No inheritance.
    pub fn cascade(&self, node: &NodeRef<'_>) -> ComputedStyle {
        let mut properties = PropertyMap::new();
        for rule in self.matching_rules(node) {
            properties.merge(&rule.declarations);
        }
        if let Some(inline) = node.attr("style") {
            properties.merge(&parse_inline_style(inline));
        }
        ComputedStyle::new(properties)
    }

    /// The full computed style of `node`, inheriting through its ancestors.
    pub fn compute_style(&self, node: &NodeRef<'_>) -> ComputedStyle {
        let mut chain: Vec<NodeRef<'_>> = node.ancestors().collect();
        chain.reverse();
        let parent = chain.iter().fold(None, |parent: Option<ComputedStyle>, ancestor| {
            Some(self.compute_style_with_parent(ancestor, parent.as_ref()))
        });
        self.compute_style_with_parent(node, parent.as_ref())
    }

    /// Like [`Stylist::compute_style`] when the parent's style is already
    /// known, as it is during a top-down walk.
    pub fn compute_style_with_parent(
        &self,
        node: &NodeRef<'_>,
        parent: Option<&ComputedStyle>,
    ) -> ComputedStyle {
        let mut style = match node.node() {
            Node::Element(_) => self.cascade(node),
            Node::Text(_) => ComputedStyle::new(PropertyMap::from_iter([("display", "inline")])),
            Node::Comment(_) => ComputedStyle::new(PropertyMap::from_iter([("display", "none")])),
        };
        if let Some(parent) = parent {
            inherit(&mut style, parent);
        }
        style
    }
}

fn inherit(style: &mut ComputedStyle, parent: &ComputedStyle) {
    for property in INHERITED_PROPERTIES {
        if style.get(property).is_some() {
            continue;
        }
        if let Some(value) = parent.get(property) {
            let value = value.to_string();
            style.properties_mut().set(*property, value);
        }
    }
}

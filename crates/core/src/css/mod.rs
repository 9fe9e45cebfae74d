//! Style sheets, selector matching and the cascade.
//!
//! Everything here works on raw `property: value` strings. Typed values are
//! derived on demand by [`ComputedStyle`] accessors.

mod cascade;
mod parser;
mod properties;
mod selector;

pub use cascade::{parse_inline_style, Stylist, INHERITED_PROPERTIES};
pub use parser::Stylesheet;
pub use properties::{
    parse_length, Color, ComputedStyle, Dimension, Display, Edges, FontStyle, FontWeight,
    TextAlign, Visibility, DEFAULT_FONT_SIZE,
};
pub use selector::{matches, specificity};

/// Built-in rules parsed before any document CSS.
pub const DEFAULT_STYLESHEET: &str = r#"
head {
    display: none;
}
script, style, title, meta, link {
    display: none;
}
body {
    display: block;
    margin: 8px;
    color: #000000;
    font-size: 16px;
}
h1 {
    display: block;
    font-size: 32px;
    font-weight: bold;
    margin: 21px 0px;
}
h2 {
    display: block;
    font-size: 24px;
    font-weight: bold;
    margin: 19px 0px;
}
h3 {
    display: block;
    font-size: 18px;
    font-weight: bold;
    margin: 18px 0px;
}
p {
    display: block;
    margin: 16px 0px;
}
a {
    display: inline;
    color: #0000EE;
    text-decoration: underline;
}
strong, b {
    display: inline;
    font-weight: bold;
}
em, i {
    display: inline;
    font-style: italic;
}
ul, ol {
    display: block;
    margin: 16px 0px;
    padding-left: 40px;
}
ul {
    list-style-type: disc;
}
ol {
    list-style-type: decimal;
}
li {
    display: block;
}
blockquote {
    display: block;
    margin: 16px 40px;
}
code {
    display: inline;
    font-family: monospace;
}
pre {
    display: block;
    font-family: monospace;
    white-space: pre;
    margin: 16px 0px;
}
img {
    display: inline-block;
}
div {
    display: block;
}
span {
    display: inline;
}
"#;

/// Property map in first-insertion order; setting an existing property
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMap {
    entries: Vec<(String, String)>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(p, _)| *p == property) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((property, value)),
        }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, property: &str) -> bool {
        self.get(property).is_some()
    }

    /// Copies every entry of `other` over this map.
    pub fn merge(&mut self, other: &PropertyMap) {
        for (property, value) in other.iter() {
            self.set(property, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = PropertyMap::new();
        for (property, value) in iter {
            map.set(property, value);
        }
        map
    }
}

/// One parsed rule. Immutable once parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub selector: String,
    pub declarations: PropertyMap,
    pub specificity: u32,
}

impl Rule {
    pub fn new(selector: &str, declarations: PropertyMap) -> Self {
        Self {
            selector: selector.to_string(),
            specificity: specificity(selector),
            declarations,
        }
    }

    pub fn matches(&self, node: &crate::dom::NodeRef<'_>) -> bool {
        matches(&self.selector, node)
    }
}

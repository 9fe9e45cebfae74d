//! The parsed markup tree.
//!
//! Nodes live in an arena owned by [`Document`]. Each element lists its
//! children by [`NodeId`]; each entry also records its parent index, a
//! non-owning back-reference used for contextual lookups.

mod entities;
mod parser;

pub use entities::decode_entities;
pub use parser::{is_void_element, parse_html};

/// Index of a node inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Element attributes in source order. Duplicate keys keep their first
/// position and take the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// An element node. `tag_name` is always lowercase ASCII.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag_name: String,
    pub attributes: Attributes,
    pub children: Vec<NodeId>,
}

impl Element {
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }
}

/// One entry in the markup tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone)]
struct Entry {
    parent: Option<NodeId>,
    node: Node,
}

/// A parsed document. The root is always a synthetic `html` element that
/// owns every top-level node.
#[derive(Debug, Clone)]
pub struct Document {
    entries: Vec<Entry>,
}

impl Document {
    /// Creates a document holding only the synthetic root.
    pub(crate) fn with_root() -> Self {
        Self {
            entries: vec![Entry {
                parent: None,
                node: Node::Element(Element::new("html")),
            }],
        }
    }

    /// Appends `node` as the last child of `parent` and returns its id.
    /// `parent` must be an element.
    pub(crate) fn append(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = NodeId(self.entries.len());
        self.entries.push(Entry {
            parent: Some(parent),
            node,
        });
        if let Node::Element(element) = &mut self.entries[parent.0].node {
            element.children.push(id);
        }
        id
    }

    pub(crate) fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.entries.get_mut(id.0)?.node {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    pub fn root(&self) -> NodeRef<'_> {
        self.get(self.root_id())
    }

    /// Borrows a node. Panics if `id` came from another document; use
    /// [`Document::try_get`] for ids of unknown origin.
    pub fn get(&self, id: NodeId) -> NodeRef<'_> {
        assert!(id.0 < self.entries.len(), "node id out of range");
        NodeRef { doc: self, id }
    }

    /// Borrows a node, or `None` if `id` is out of range for this document.
    pub fn try_get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.entries.len()).then_some(NodeRef { doc: self, id })
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.entries[id.0].node
    }

    pub fn parent_id(&self, id: NodeId) -> Option<NodeId> {
        self.entries.get(id.0).and_then(|e| e.parent)
    }

    /// Total number of nodes, root included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.len() <= 1
    }

    /// Text content of the whole document.
    pub fn text_content(&self) -> String {
        self.root().text_content()
    }

    /// All elements named `tag`, in document order.
    pub fn elements_by_tag(&self, tag: &str) -> Vec<NodeRef<'_>> {
        self.root().elements_by_tag(tag)
    }

    /// Text of every `<style>` element, in document order.
    pub fn style_blocks(&self) -> Vec<String> {
        self.elements_by_tag("style")
            .into_iter()
            .map(|style| style.text_content())
            .collect()
    }

    /// Trimmed text of the first `<title>` element.
    pub fn title(&self) -> Option<String> {
        self.elements_by_tag("title")
            .first()
            .map(|title| title.text_content().trim().to_string())
    }
}

/// A borrowed cursor to one node of a [`Document`].
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    pub fn node(&self) -> &'a Node {
        self.doc.node(self.id)
    }

    pub fn as_element(&self) -> Option<&'a Element> {
        match self.node() {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn is_element(&self) -> bool {
        self.as_element().is_some()
    }

    /// Text content if this is a Text node.
    pub fn as_text(&self) -> Option<&'a str> {
        match self.node() {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn tag_name(&self) -> Option<&'a str> {
        self.as_element().map(|e| e.tag_name.as_str())
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.as_element()?.attributes.get(name)
    }

    pub fn element_id(&self) -> Option<&'a str> {
        self.attr("id")
    }

    pub fn classes(&self) -> impl Iterator<Item = &'a str> {
        self.attr("class").unwrap_or_default().split_whitespace()
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.doc.parent_id(self.id).map(|id| self.doc.get(id))
    }

    /// Parent first, root last.
    pub fn ancestors(&self) -> impl Iterator<Item = NodeRef<'a>> {
        std::iter::successors(self.parent(), |node| node.parent())
    }

    /// Nearest ancestor element named `tag`.
    pub fn closest(&self, tag: &str) -> Option<NodeRef<'a>> {
        self.ancestors()
            .find(|a| a.tag_name().is_some_and(|t| t.eq_ignore_ascii_case(tag)))
    }

    /// Whether any ancestor element is named `tag`.
    pub fn is_inside(&self, tag: &str) -> bool {
        self.closest(tag).is_some()
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> {
        let doc = self.doc;
        let ids: &'a [NodeId] = match self.node() {
            Node::Element(element) => &element.children,
            _ => &[],
        };
        ids.iter().map(move |&id| doc.get(id))
    }

    /// This node and its descendants, pre-order. Walks an explicit stack, so
    /// arbitrarily deep trees are fine.
    pub fn descendants(&self) -> impl Iterator<Item = NodeRef<'a>> {
        let mut stack = vec![*self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            let before = stack.len();
            stack.extend(next.children());
            stack[before..].reverse();
            Some(next)
        })
    }

    /// Pre-order concatenation of every Text node in this subtree.
    pub fn text_content(&self) -> String {
        self.descendants().filter_map(|node| node.as_text()).collect()
    }

    /// Pre-order collection of elements named `tag`, this node included.
    pub fn elements_by_tag(&self, tag: &str) -> Vec<NodeRef<'a>> {
        self.descendants()
            .filter(|node| node.tag_name().is_some_and(|t| t.eq_ignore_ascii_case(tag)))
            .collect()
    }
}

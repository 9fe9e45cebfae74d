//! Single-pass markup parser.
//!
//! One cursor walks the input left to right and never backs up. There is no
//! error channel: malformed markup degrades into text nodes, dropped closing
//! tags, or elements closed at end-of-input.

use super::{decode_entities, Document, Element, Node, NodeId};
use log::{debug, trace};

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Parse markup into a [`Document`]. Never fails.
pub fn parse_html(html: &str) -> Document {
    let mut parser = Parser {
        input: html.chars().collect(),
        pos: 0,
        doc: Document::with_root(),
    };
    parser.skip_doctype();
    parser.parse_nodes();
    debug!("parsed {} chars into {} nodes", parser.input.len(), parser.doc.len());
    parser.doc
}

struct Parser {
    input: Vec<char>,
    pos: usize,
    doc: Document,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn starts_with(&self, prefix: &str) -> bool {
        let mut i = self.pos;
        for c in prefix.chars() {
            if self.input.get(i) != Some(&c) {
                return false;
            }
            i += 1;
        }
        true
    }

    fn starts_with_ignore_case(&self, prefix: &str) -> bool {
        let mut i = self.pos;
        for c in prefix.chars() {
            match self.input.get(i) {
                Some(d) if d.eq_ignore_ascii_case(&c) => i += 1,
                _ => return false,
            }
        }
        true
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    /// Moves past the next `>`, or to end-of-input if there is none.
    fn skip_past_gt(&mut self) {
        while let Some(c) = self.peek() {
            self.pos += 1;
            if c == '>' {
                return;
            }
        }
    }

    fn skip_doctype(&mut self) {
        self.skip_whitespace();
        if self.starts_with_ignore_case("<!doctype") {
            self.skip_past_gt();
        }
    }

    /// Parses every node up to end-of-input.
    ///
    /// Open elements live on an explicit stack, innermost last. A closing tag
    /// only closes the innermost open element; any other closing tag is
    /// dropped.
    fn parse_nodes(&mut self) {
        let root = self.doc.root_id();
        let mut open: Vec<(NodeId, String)> = Vec::new();
        loop {
            self.skip_whitespace();
            if self.at_end() {
                for (_, tag) in open.iter().rev() {
                    trace!("<{tag}> closed at end of input");
                }
                return;
            }

            let parent = open.last().map_or(root, |(id, _)| *id);
            if self.starts_with("<!--") {
                self.parse_comment(parent);
            } else if self.starts_with("</") {
                let name = self.read_closing_tag();
                if open.last().is_some_and(|(_, tag)| tag.eq_ignore_ascii_case(&name)) {
                    open.pop();
                } else {
                    trace!("dropped orphan closing tag </{name}>");
                }
            } else if self.peek() == Some('<') && self.peek_at(1).is_some_and(is_name_start) {
                if let Some(element) = self.parse_element(parent) {
                    open.push(element);
                }
            } else {
                self.parse_text(parent);
            }
        }
    }

    fn parse_comment(&mut self, parent: NodeId) {
        self.pos += 4;
        let start = self.pos;
        while !self.at_end() && !self.starts_with("-->") {
            self.pos += 1;
        }
        let content: String = self.input[start..self.pos].iter().collect();
        if !self.at_end() {
            self.pos += 3;
        }
        self.doc.append(parent, Node::Comment(content));
    }

    /// Consumes `</name ...>` and returns the name.
    fn read_closing_tag(&mut self) -> String {
        self.pos += 2;
        let name = self.read_while(|c| !c.is_whitespace() && c != '>');
        self.skip_past_gt();
        name
    }

    fn parse_text(&mut self, parent: NodeId) {
        let start = self.pos;
        // A `<` that opens nothing is literal text; take it so the scan advances.
        self.pos += 1;
        while self.peek().is_some_and(|c| c != '<') {
            self.pos += 1;
        }
        let raw: String = self.input[start..self.pos].iter().collect();
        let text = decode_entities(&raw);
        if !text.is_empty() {
            self.doc.append(parent, Node::Text(text));
        }
    }

    /// Reads a start tag into `parent`. Returns the element and its tag when
    /// it stays open for children.
    fn parse_element(&mut self, parent: NodeId) -> Option<(NodeId, String)> {
        self.pos += 1;
        let name = self.read_while(|c| !c.is_whitespace() && c != '>' && c != '/');
        if name.is_empty() {
            trace!("aborted element with empty tag name");
            return None;
        }

        let id = self.doc.append(parent, Node::Element(Element::new(&name)));
        let self_closing = self.parse_attributes(id);
        let tag = name.to_ascii_lowercase();

        if self_closing || is_void_element(&tag) {
            return None;
        }
        Some((id, tag))
    }

    /// Reads attributes up to `>` or `/>`. Returns true for `/>`.
    fn parse_attributes(&mut self, id: NodeId) -> bool {
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return false,
                Some('>') => {
                    self.pos += 1;
                    return false;
                }
                Some('/') if self.peek_at(1) == Some('>') => {
                    self.pos += 2;
                    return true;
                }
                Some('/') => {
                    self.pos += 1;
                    continue;
                }
                _ => {}
            }

            let name = self.read_while(|c| !c.is_whitespace() && !matches!(c, '=' | '>' | '/'));
            if name.is_empty() {
                // A stray `=` or similar; step over it.
                self.pos += 1;
                continue;
            }

            self.skip_whitespace();
            let value = if self.peek() == Some('=') {
                self.pos += 1;
                self.skip_whitespace();
                decode_entities(&self.read_attribute_value())
            } else {
                String::new()
            };

            if let Some(element) = self.doc.element_mut(id) {
                element.attributes.insert(name.to_ascii_lowercase(), value);
            }
        }
    }

    fn read_attribute_value(&mut self) -> String {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let value = self.read_while(|c| c != quote);
                if !self.at_end() {
                    self.pos += 1;
                }
                value
            }
            _ => self.read_while(|c| !c.is_whitespace() && c != '>'),
        }
    }

    fn read_while(&mut self, keep: impl Fn(char) -> bool) -> String {
        let start = self.pos;
        while self.peek().is_some_and(&keep) {
            self.pos += 1;
        }
        self.input[start..self.pos].iter().collect()
    }
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic()
}

use crate::dom::{Document, Node};
use crate::layout::{LayoutBox, Viewport};
use serde::Serialize;

/// Flattened box tree, ready to print or hand to a painter.
#[derive(Debug, Serialize)]
pub struct LayoutDump {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    pub vp: [f32; 2],
    pub boxes: Vec<BoxSummary>,
}

/// One box of the tree.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct BoxSummary {
    /// Pre-order position, starting at 0 for the root.
    pub id: u32,
    /// Tag name, or `#text` for text runs.
    pub tag: String,
    pub depth: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Link target for text inside an anchor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Bounds: [x, y, width, height]
    pub b: [i32; 4],
}

/// Longest text snippet kept per box.
const MAX_TEXT_CHARS: usize = 80;

/// Flatten a laid-out tree in pre-order.
pub fn summarize(document: &Document, root: &LayoutBox, viewport: Viewport) -> LayoutDump {
    let mut boxes = Vec::new();
    collect_boxes(document, root, 0, &mut boxes);
    LayoutDump {
        title: document.title().unwrap_or_default(),
        vp: [viewport.width, viewport.height],
        boxes,
    }
}

fn collect_boxes(document: &Document, layout: &LayoutBox, depth: usize, out: &mut Vec<BoxSummary>) {
    // Boxes from another document are skipped.
    let Some(node) = document.try_get(layout.node) else {
        return;
    };
    let (tag, text, href) = match node.node() {
        Node::Element(element) => (element.tag_name.clone(), None, None),
        Node::Text(text) => (
            "#text".to_string(),
            Some(snippet(text)),
            node.closest("a")
                .and_then(|anchor| anchor.attr("href"))
                .map(str::to_string),
        ),
        Node::Comment(_) => ("#comment".to_string(), None, None),
    };
    let src = (tag == "img")
        .then(|| node.attr("src").map(str::to_string))
        .flatten();

    out.push(BoxSummary {
        id: out.len() as u32,
        tag,
        depth,
        text,
        href,
        src,
        b: [
            layout.frame.x.round() as i32,
            layout.frame.y.round() as i32,
            layout.frame.width.round() as i32,
            layout.frame.height.round() as i32,
        ],
    });

    for child in &layout.children {
        collect_boxes(document, child, depth + 1, out);
    }
}

/// Collapse whitespace and cut long runs.
fn snippet(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= MAX_TEXT_CHARS {
        return collapsed;
    }
    let mut cut: String = collapsed.chars().take(MAX_TEXT_CHARS).collect();
    cut.push('…');
    cut
}

pub fn to_json(dump: &LayoutDump) -> serde_json::Result<String> {
    serde_json::to_string_pretty(dump)
}

/// One line per box, indented by depth:
/// `tag x,y wxh "text" ->href`
pub fn to_compact_string(dump: &LayoutDump) -> String {
    let mut lines = Vec::with_capacity(dump.boxes.len());
    for b in &dump.boxes {
        let mut line = format!(
            "{}{} {},{} {}x{}",
            "  ".repeat(b.depth),
            b.tag,
            b.b[0],
            b.b[1],
            b.b[2],
            b.b[3]
        );
        if let Some(text) = &b.text {
            line.push_str(&format!(" \"{text}\""));
        }
        if let Some(href) = &b.href {
            line.push_str(&format!(" ->{href}"));
        }
        if let Some(src) = &b.src {
            line.push_str(&format!(" src={src}"));
        }
        lines.push(line);
    }
    lines.join("\n")
}

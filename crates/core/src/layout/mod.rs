//! Block layout.
//!
//! Builds a box tree parallel to the document and gives every box a frame.
//! Whitespace-only text and `display: none` subtrees get no box. Block
//! children stack top to bottom with their vertical margins summed (never
//! collapsed); inline children stack by height alone, without line
//! wrapping. Frames are not clipped to their parent.

mod images;
mod text;

pub use images::{resolve_source, ImageRequest, ImageSizes, PLACEHOLDER_HEIGHT};
pub use text::{char_width, line_height, measure_text, TextMetrics};

use crate::css::{parse_length, ComputedStyle, Dimension, Display, Edges, Stylist};
use crate::dom::{Document, Node, NodeId, NodeRef};
use log::{debug, trace};
use serde::Serialize;
use url::Url;

/// Deepest box nesting layout descends to. Children of a box at this depth
/// get no boxes; the document tree itself is never cut.
pub const MAX_BOX_DEPTH: usize = 128;

/// Size of the area the document is laid out into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Parse `WxH`, falling back to the default for anything malformed.
    pub fn parse(s: &str) -> Self {
        let parsed = s.split_once(|c| c == 'x' || c == 'X').and_then(|(w, h)| {
            Some(Self::new(w.trim().parse().ok()?, h.trim().parse().ok()?))
        });
        parsed.unwrap_or_default()
    }
}

/// A positioned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// A node paired with its style and frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutBox {
    pub node: NodeId,
    pub style: ComputedStyle,
    pub frame: Rect,
    pub children: Vec<LayoutBox>,
}

impl LayoutBox {
    /// This box and all descendants, pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &LayoutBox> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.children.iter().rev());
            Some(next)
        })
    }

    /// Number of boxes in this subtree.
    pub fn box_count(&self) -> usize {
        self.iter().count()
    }

    /// Lowest bottom edge in this subtree, relative to this box's top.
    pub fn content_height(&self) -> f32 {
        self.iter()
            .map(|b| b.frame.bottom())
            .fold(self.frame.bottom(), f32::max)
            - self.frame.y
    }

    /// The deepest box whose frame contains the point. Later siblings win.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<&LayoutBox> {
        if let Some(hit) = self.children.iter().rev().find_map(|c| c.hit_test(x, y)) {
            return Some(hit);
        }
        self.frame.contains(x, y).then_some(self)
    }

    /// Images in this subtree whose size is not in `known`, in document
    /// order.
    pub fn image_requests(
        &self,
        document: &Document,
        base: Option<&Url>,
        known: &ImageSizes,
    ) -> Vec<ImageRequest> {
        self.iter()
            .filter_map(|b| images::image_request(document, b.node, base))
            .filter(|request| !known.contains(&request.src))
            .collect()
    }
}

/// Lay `document` out into `viewport`, with no image sizes known.
pub fn layout(document: &Document, stylist: &Stylist, viewport: Viewport) -> LayoutBox {
    layout_with_images(document, stylist, viewport, &ImageSizes::new())
}

/// Lay `document` out using the image sizes recorded so far. Calling this
/// again with the same inputs gives the same tree.
pub fn layout_with_images(
    document: &Document,
    stylist: &Stylist,
    viewport: Viewport,
    images: &ImageSizes,
) -> LayoutBox {
    let engine = LayoutEngine { stylist, images };
    let root = document.root();
    let style = stylist.compute_style_with_parent(&root, None);

    let root_box = if style.display() == Display::None {
        LayoutBox {
            node: root.id(),
            style,
            frame: Rect {
                width: viewport.width,
                ..Rect::default()
            },
            children: Vec::new(),
        }
    } else {
        engine.layout_box(root, style, 0.0, 0.0, viewport.width, false, 0)
    };

    debug!(
        "laid out {} boxes in {}x{}, document height {}",
        root_box.box_count(),
        viewport.width,
        viewport.height,
        root_box.frame.height
    );
    root_box
}

struct LayoutEngine<'a> {
    stylist: &'a Stylist,
    images: &'a ImageSizes,
}

impl LayoutEngine<'_> {
    /// Lay out `node` with its top-left margin edge at (`x`, `y`) inside a
    /// containing block `available` wide. `depth` is 0 for the root.
    #[allow(clippy::too_many_arguments)]
    fn layout_box(
        &self,
        node: NodeRef<'_>,
        style: ComputedStyle,
        x: f32,
        y: f32,
        available: f32,
        inline: bool,
        depth: usize,
    ) -> LayoutBox {
        let margin = style.margin();
        let padding = style.padding();
        let top_margin = if inline { 0.0 } else { margin.top };

        let width = match style.width() {
            Some(width) => width.resolve(available),
            None => available - margin.horizontal(),
        };
        let mut frame = Rect {
            x: x + margin.left,
            y: y + top_margin,
            width,
            height: 0.0,
        };

        let content_x = frame.x + padding.left;
        let content_y = frame.y + padding.top;
        let content_width = width - padding.horizontal();

        let mut children = Vec::new();
        let mut cursor = content_y;
        let mut extent = content_y;
        let children_allowed = depth < MAX_BOX_DEPTH;
        if !children_allowed && node.children().next().is_some() {
            trace!(
                "nesting deeper than {MAX_BOX_DEPTH}, children of node {} skipped",
                node.id().index()
            );
        }
        for child in node.children().filter(|_| children_allowed) {
            let Some(child_style) = self.child_style(&child, &style) else {
                continue;
            };
            let child_inline = child_style.display().is_inline();
            let bottom_margin = if child_inline {
                0.0
            } else {
                child_style.margin().bottom
            };
            let child_box = self.layout_box(
                child,
                child_style,
                content_x,
                cursor,
                content_width,
                child_inline,
                depth + 1,
            );
            cursor = child_box.frame.bottom() + bottom_margin;
            extent = extent.max(cursor);
            children.push(child_box);
        }

        frame.height = match node.node() {
            Node::Text(text) => measure_text(text, &style, content_width).height,
            _ if node.tag_name() == Some("img") => {
                let (image_width, image_height) = self.image_size(&node, &style, available, &margin);
                frame.width = image_width;
                image_height
            }
            _ => match style.height() {
                Some(Dimension::Px(height)) => height,
                _ => extent - content_y + padding.vertical(),
            },
        };

        LayoutBox {
            node: node.id(),
            style,
            frame,
            children,
        }
    }

    /// Style for a child, or `None` when it gets no box.
    fn child_style(&self, child: &NodeRef<'_>, parent: &ComputedStyle) -> Option<ComputedStyle> {
        match child.node() {
            Node::Comment(_) => return None,
            Node::Text(text) if text.trim().is_empty() => return None,
            _ => {}
        }
        let style = self.stylist.compute_style_with_parent(child, Some(parent));
        (style.display() != Display::None).then_some(style)
    }

    /// Width and height reserved for an `img` box.
    fn image_size(
        &self,
        node: &NodeRef<'_>,
        style: &ComputedStyle,
        available: f32,
        margin: &Edges,
    ) -> (f32, f32) {
        let known = node
            .attr("src")
            .map(str::trim)
            .and_then(|src| self.images.get(src));
        let attr = |name: &str| node.attr(name).and_then(parse_length);

        let width = style
            .width()
            .map(|w| w.resolve(available))
            .or_else(|| attr("width"))
            .or(known.map(|(w, _)| w))
            .unwrap_or(available - margin.horizontal());

        let height = match style.height() {
            Some(Dimension::Px(h)) => h,
            _ => attr("height")
                .or_else(|| {
                    known.map(|(w, h)| if w > 0.0 { h * width / w } else { h })
                })
                .unwrap_or(PLACEHOLDER_HEIGHT),
        };
        (width, height)
    }
}

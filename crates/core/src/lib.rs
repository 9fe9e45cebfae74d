pub mod css;
pub mod dom;
pub mod layout;
pub mod output;
#[cfg(feature = "fetch")]
pub mod fetch;

use css::{ComputedStyle, Stylist};
use dom::{Document, NodeRef};
use layout::{ImageRequest, ImageSizes, LayoutBox, Viewport};
use log::debug;
use url::Url;

/// Parse `html` with the built-in stylesheet plus its own `<style>` blocks
/// and lay it out. This is the one-call entry point of trellis-core.
pub fn render(html: &str, viewport: Viewport) -> Page {
    Engine::new().render(html, viewport)
}

/// The pipeline state a caller keeps between calls: the running rule list
/// and the image sizes that have arrived so far.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    stylist: Stylist,
    images: ImageSizes,
}

impl Engine {
    /// An engine with only the built-in stylesheet loaded.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stylist(&self) -> &Stylist {
        &self.stylist
    }

    pub fn images(&self) -> &ImageSizes {
        &self.images
    }

    pub fn parse_html(&self, html: &str) -> Document {
        dom::parse_html(html)
    }

    /// Append the rules in `css` to the running rule list.
    pub fn parse_css(&mut self, css: &str) -> usize {
        self.stylist.add_stylesheet(css)
    }

    /// Parse `html` and feed its `<style>` blocks into the rule list.
    pub fn load(&mut self, html: &str) -> Document {
        let document = dom::parse_html(html);
        for block in document.style_blocks() {
            self.parse_css(&block);
        }
        document
    }

    pub fn compute_style(&self, node: &NodeRef<'_>) -> ComputedStyle {
        self.stylist.compute_style(node)
    }

    pub fn layout(&self, document: &Document, viewport: Viewport) -> LayoutBox {
        layout::layout_with_images(document, &self.stylist, viewport, &self.images)
    }

    /// Record the size of an image that arrived out-of-band. Returns true
    /// when pages showing it should be laid out again.
    pub fn record_image(&mut self, src: &str, width: f32, height: f32) -> bool {
        self.images.record(src, width, height)
    }

    pub fn render(&mut self, html: &str, viewport: Viewport) -> Page {
        let document = self.load(html);
        let root = self.layout(&document, viewport);
        Page {
            document,
            root,
            viewport,
            base_url: None,
        }
    }
}

/// A parsed and laid-out document.
#[derive(Debug, Clone)]
pub struct Page {
    pub document: Document,
    pub root: LayoutBox,
    pub viewport: Viewport,
    /// Base for resolving relative image sources.
    pub base_url: Option<Url>,
}

impl Page {
    pub fn title(&self) -> Option<String> {
        self.document.title()
    }

    pub fn summarize(&self) -> output::LayoutDump {
        output::summarize(&self.document, &self.root, self.viewport)
    }

    /// Images the caller should fetch before the next reflow.
    pub fn image_requests(&self, engine: &Engine) -> Vec<ImageRequest> {
        self.root
            .image_requests(&self.document, self.base_url.as_ref(), engine.images())
    }

    /// Lay the same document out again, picking up new image sizes.
    pub fn reflow(&mut self, engine: &Engine) {
        self.root = engine.layout(&self.document, self.viewport);
        debug!("reflowed page, height {}", self.root.frame.height);
    }
}

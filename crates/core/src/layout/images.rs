//! Image placeholders.
//!
//! Layout never waits for image data. An `img` box reserves space from its
//! declared size or from whatever dimensions the caller has already recorded
//! in [`ImageSizes`]; fetching is the caller's job. When a fetch completes the
//! caller records the size and runs layout again.

use crate::dom::{Document, NodeId};
use std::collections::HashMap;
use url::Url;

/// Height reserved for an image whose size is not known yet.
pub const PLACEHOLDER_HEIGHT: f32 = 150.0;

/// Intrinsic image sizes keyed by the `src` attribute as written.
#[derive(Debug, Clone, Default)]
pub struct ImageSizes {
    sizes: HashMap<String, (f32, f32)>,
}

impl ImageSizes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the size of `src`. Returns true if this changes any future
    /// layout, meaning the caller should reflow.
    pub fn record(&mut self, src: &str, width: f32, height: f32) -> bool {
        self.sizes.insert(src.trim().to_string(), (width, height)) != Some((width, height))
    }

    pub fn get(&self, src: &str) -> Option<(f32, f32)> {
        self.sizes.get(src).copied()
    }

    pub fn contains(&self, src: &str) -> bool {
        self.sizes.contains_key(src)
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

/// An image the caller still has to fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRequest {
    pub node: NodeId,
    /// The `src` attribute as written.
    pub src: String,
    /// `src` resolved against the base URL, when it resolves.
    pub url: Option<Url>,
}

/// Resolve an image source. Relative sources need a base.
pub fn resolve_source(base: Option<&Url>, src: &str) -> Option<Url> {
    match base {
        Some(base) => base.join(src).ok(),
        None => Url::parse(src).ok(),
    }
}

pub(crate) fn image_request(
    document: &Document,
    node: NodeId,
    base: Option<&Url>,
) -> Option<ImageRequest> {
    let element = document.try_get(node)?;
    if element.tag_name() != Some("img") {
        return None;
    }
    let src = element.attr("src")?.trim();
    if src.is_empty() {
        return None;
    }
    Some(ImageRequest {
        node,
        src: src.to_string(),
        url: resolve_source(base, src),
    })
}

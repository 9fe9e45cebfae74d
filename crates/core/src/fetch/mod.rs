//! HTTP fetching of a top-level document.
//! Gated behind the "fetch" feature flag.
//!
//! Only the page itself is fetched. Stylesheets linked from it and images are
//! left to the caller.

use crate::layout::Viewport;
use crate::{Engine, Page};
use log::debug;
use reqwest::blocking::Client;
use std::io::Read;
use url::Url;

/// Configuration for page fetching.
pub struct FetchConfig {
    /// User-Agent header.
    pub user_agent: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Responses longer than this are cut off.
    pub max_response_bytes: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("trellis/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            max_response_bytes: 5 * 1024 * 1024,
        }
    }
}

/// A fetched page before parsing.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    /// Final URL after redirects.
    pub url: Url,
    pub html: String,
}

/// Fetch the markup at `url`.
pub fn fetch_html(url: &str, config: &FetchConfig) -> Result<FetchedDocument, FetchError> {
    let parsed_url = Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

    let client = Client::builder()
        .user_agent(&config.user_agent)
        .timeout(std::time::Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| FetchError::Network(e.to_string()))?;

    let response = client
        .get(parsed_url.as_str())
        .send()
        .map_err(|e| FetchError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpError(status.as_u16()));
    }

    let final_url = response.url().clone();
    let mut body = Vec::new();
    response
        .take(config.max_response_bytes as u64)
        .read_to_end(&mut body)
        .map_err(|e| FetchError::Network(e.to_string()))?;
    debug!("fetched {} bytes from {final_url}", body.len());

    Ok(FetchedDocument {
        url: final_url,
        html: String::from_utf8_lossy(&body).into_owned(),
    })
}

/// Fetch `url` and render it. Relative image sources resolve against the
/// final URL.
pub fn fetch(
    url: &str,
    config: &FetchConfig,
    engine: &mut Engine,
    viewport: Viewport,
) -> Result<Page, FetchError> {
    let fetched = fetch_html(url, config)?;
    let mut page = engine.render(&fetched.html, viewport);
    page.base_url = Some(fetched.url);
    Ok(page)
}

#[derive(Debug)]
pub enum FetchError {
    InvalidUrl(String),
    Network(String),
    HttpError(u16),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::InvalidUrl(e) => write!(f, "Invalid URL: {}", e),
            FetchError::Network(e) => write!(f, "Network error: {}", e),
            FetchError::HttpError(code) => write!(f, "HTTP error: {}", code),
        }
    }
}

impl std::error::Error for FetchError {}

//! Rendered pages and per-listing content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Output of the Web Renderer for one page.
///
/// Visible text with markup stripped, plus the image URLs and
/// hyperlinks found on the page. The candidate builder consumes the
/// links; the fan-out consumes the text and images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedPage {
    /// URL this page was rendered from
    pub url: String,

    /// Visible text content
    pub text: String,

    /// Absolute image URLs found on the page
    pub image_urls: Vec<String>,

    /// Absolute hyperlinks found on the page
    pub links: Vec<String>,

    /// When the page was rendered
    pub rendered_at: DateTime<Utc>,
}

impl RenderedPage {
    /// Create a rendered page with text only.
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: text.into(),
            image_urls: Vec::new(),
            links: Vec::new(),
            rendered_at: Utc::now(),
        }
    }

    /// Attach image URLs.
    pub fn with_images(mut self, image_urls: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.image_urls = image_urls.into_iter().map(|u| u.into()).collect();
        self
    }

    /// Attach hyperlinks.
    pub fn with_links(mut self, links: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.links = links.into_iter().map(|u| u.into()).collect();
        self
    }

    /// Check if this page carried any visible text.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// Summarized content for one candidate listing.
///
/// Produced at most once per listing by the fan-out stage. A listing
/// whose render or summarization failed has no `ListingContent` and is
/// simply absent downstream; it is never retried.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingContent {
    /// Canonical listing URL
    pub url: String,

    /// One descriptive paragraph produced by the completion service
    pub summary: String,

    /// Image URLs scraped from the listing page
    pub image_urls: Vec<String>,
}

impl ListingContent {
    /// Create listing content.
    pub fn new(url: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            summary: summary.into(),
            image_urls: Vec::new(),
        }
    }

    /// Attach image URLs.
    pub fn with_images(mut self, image_urls: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.image_urls = image_urls.into_iter().map(|u| u.into()).collect();
        self
    }
}

//! HTTP-based renderer implementation.
//!
//! Fetches a page over plain HTTP and extracts visible text, image
//! URLs, and hyperlinks with regexes. Suitable for server-rendered
//! pages; JavaScript-heavy sites need a headless-browser `Renderer`
//! behind the same trait.

use async_trait::async_trait;
use regex::Regex;
use tracing::{debug, warn};
use url::Url;

use crate::error::{RenderError, RenderResult};
use crate::traits::renderer::Renderer;
use crate::types::listing::RenderedPage;

/// Renderer that fetches pages via HTTP.
pub struct HttpRenderer {
    client: reqwest::Client,
    user_agent: String,
}

impl Default for HttpRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpRenderer {
    /// Create a new HTTP renderer with default settings.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            user_agent: "ListingSearchBot/1.0".to_string(),
        }
    }

    /// Set a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Strip markup down to visible text.
    fn extract_text(html: &str) -> String {
        // Drop non-visible blocks first
        let block_pattern =
            Regex::new(r"(?is)<(script|style|noscript)[^>]*>.*?</(script|style|noscript)>")
                .unwrap();
        let without_blocks = block_pattern.replace_all(html, " ");

        let tag_pattern = Regex::new(r"<[^>]+>").unwrap();
        let without_tags = tag_pattern.replace_all(&without_blocks, " ");

        without_tags
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Extract absolute image URLs.
    ///
    /// Relative `src` values are skipped, matching the original
    /// scraper's "keep only http(s) sources" behavior.
    fn extract_images(html: &str) -> Vec<String> {
        let img_pattern = Regex::new(r#"(?i)<img[^>]+src\s*=\s*["']([^"']+)["']"#).unwrap();

        img_pattern
            .captures_iter(html)
            .filter_map(|cap| cap.get(1))
            .map(|m| m.as_str().to_string())
            .filter(|src| src.starts_with("http"))
            .collect()
    }

    /// Extract hyperlinks, resolved against the page URL.
    fn extract_links(base_url: &Url, html: &str) -> Vec<String> {
        let href_pattern = Regex::new(r#"href\s*=\s*["']([^"']+)["']"#).unwrap();

        let mut links = Vec::new();
        for cap in href_pattern.captures_iter(html) {
            if let Some(href) = cap.get(1) {
                let href = href.as_str();

                // Skip anchors, javascript, mailto
                if href.starts_with('#')
                    || href.starts_with("javascript:")
                    || href.starts_with("mailto:")
                    || href.starts_with("tel:")
                {
                    continue;
                }

                if let Ok(resolved) = base_url.join(href) {
                    links.push(resolved.to_string());
                }
            }
        }
        links
    }
}

#[async_trait]
impl Renderer for HttpRenderer {
    async fn render(&self, url: &str) -> RenderResult<RenderedPage> {
        let base_url = Url::parse(url).map_err(|_| RenderError::InvalidUrl {
            url: url.to_string(),
        })?;

        debug!(url = %url, "rendering page");
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "HTTP request failed");
                if e.is_timeout() {
                    RenderError::Timeout {
                        url: url.to_string(),
                    }
                } else {
                    RenderError::Http(Box::new(e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RenderError::Http(Box::new(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("HTTP {}", status),
            ))));
        }

        let html = response
            .text()
            .await
            .map_err(|e| RenderError::Http(Box::new(e)))?;

        let page = RenderedPage::new(url, Self::extract_text(&html))
            .with_images(Self::extract_images(&html))
            .with_links(Self::extract_links(&base_url, &html));

        if !page.has_text() {
            return Err(RenderError::EmptyPage {
                url: url.to_string(),
            });
        }

        Ok(page)
    }
}

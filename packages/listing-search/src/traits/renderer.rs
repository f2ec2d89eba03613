//! Renderer trait for turning a URL into page content.

use async_trait::async_trait;

use crate::error::RenderResult;
use crate::types::listing::RenderedPage;

/// Web Renderer capability.
///
/// Implementations wrap whatever actually loads the page (plain HTTP,
/// a headless browser service, a fixture set in tests) and return the
/// visible text plus the image URLs and hyperlinks found on it.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Render one page.
    ///
    /// May fail on navigation errors or timeouts; callers in the
    /// fan-out stage treat a failure as "this candidate is dropped",
    /// never as a pipeline abort.
    async fn render(&self, url: &str) -> RenderResult<RenderedPage>;
}

//! Candidate Set Builder - discover listing URLs from a search page.

use indexmap::IndexSet;
use tracing::{info, warn};

use crate::traits::renderer::Renderer;

/// Path fragment that identifies a listing URL on the target site.
pub const LISTING_PATH: &str = "/rooms/";

/// Discover candidate listing URLs from the search start page.
///
/// Renders the start page and keeps hyperlinks matching the listing
/// path, deduplicated by exact URL string (two URLs differing only in
/// query string are distinct candidates) and capped at `max_listings`.
/// First-seen order is preserved; the rank-merge later uses it as its
/// tie-break.
///
/// Failure is not escalated: a render error or a page with no listing
/// links yields an empty candidate set, which flows through the rest
/// of the pipeline as an empty shortlist.
pub async fn discover_candidates<R: Renderer>(
    renderer: &R,
    start_url: &str,
    max_listings: usize,
) -> Vec<String> {
    let page = match renderer.render(start_url).await {
        Ok(page) => page,
        Err(e) => {
            warn!(url = %start_url, error = %e, "search page render failed; zero candidates");
            return Vec::new();
        }
    };

    let candidates: IndexSet<String> = page
        .links
        .into_iter()
        .filter(|link| link.contains(LISTING_PATH))
        .collect();

    info!(
        url = %start_url,
        found = candidates.len(),
        kept = candidates.len().min(max_listings),
        "candidate discovery complete"
    );

    candidates.into_iter().take(max_listings).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockRenderer;
    use crate::types::listing::RenderedPage;

    fn search_page(links: &[&str]) -> RenderedPage {
        RenderedPage::new("https://www.airbnb.com/s/Austin/homes", "search results")
            .with_links(links.iter().copied())
    }

    #[tokio::test]
    async fn duplicates_are_suppressed() {
        let renderer = MockRenderer::new().with_page(search_page(&[
            "https://www.airbnb.com/rooms/1",
            "https://www.airbnb.com/rooms/2",
            "https://www.airbnb.com/rooms/1",
            "https://www.airbnb.com/rooms/3",
            "https://www.airbnb.com/rooms/2",
        ]));

        let candidates =
            discover_candidates(&renderer, "https://www.airbnb.com/s/Austin/homes", 10).await;

        assert_eq!(
            candidates,
            vec![
                "https://www.airbnb.com/rooms/1",
                "https://www.airbnb.com/rooms/2",
                "https://www.airbnb.com/rooms/3",
            ]
        );
    }

    #[tokio::test]
    async fn urls_differing_in_query_string_are_distinct() {
        let renderer = MockRenderer::new().with_page(search_page(&[
            "https://www.airbnb.com/rooms/1?adults=2",
            "https://www.airbnb.com/rooms/1?adults=3",
        ]));

        let candidates =
            discover_candidates(&renderer, "https://www.airbnb.com/s/Austin/homes", 10).await;

        assert_eq!(candidates.len(), 2);
    }

    #[tokio::test]
    async fn non_listing_links_are_filtered() {
        let renderer = MockRenderer::new().with_page(search_page(&[
            "https://www.airbnb.com/help",
            "https://www.airbnb.com/rooms/42",
            "https://www.airbnb.com/s/Austin/experiences",
        ]));

        let candidates =
            discover_candidates(&renderer, "https://www.airbnb.com/s/Austin/homes", 10).await;

        assert_eq!(candidates, vec!["https://www.airbnb.com/rooms/42"]);
    }

    #[tokio::test]
    async fn candidate_set_is_capped() {
        let links: Vec<String> = (0..20)
            .map(|i| format!("https://www.airbnb.com/rooms/{}", i))
            .collect();
        let link_refs: Vec<&str> = links.iter().map(String::as_str).collect();
        let renderer = MockRenderer::new().with_page(search_page(&link_refs));

        let candidates =
            discover_candidates(&renderer, "https://www.airbnb.com/s/Austin/homes", 6).await;

        assert_eq!(candidates.len(), 6);
        assert_eq!(candidates[0], "https://www.airbnb.com/rooms/0");
    }

    #[tokio::test]
    async fn render_failure_yields_empty_set() {
        let renderer = MockRenderer::new().fail_url("https://www.airbnb.com/s/Austin/homes");

        let candidates =
            discover_candidates(&renderer, "https://www.airbnb.com/s/Austin/homes", 10).await;

        assert!(candidates.is_empty());
    }
}

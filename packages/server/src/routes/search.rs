//! Search and query-generation endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use listing_search::{Criteria, RankedEntry, Renderer, ResultStore, SearchError, AI};

use crate::app::AppState;

/// Error payload returned to clients.
///
/// Invalid input maps to 400; everything else is a 500 with the
/// message kept generic so internals don't leak.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    fn from_search_error(err: SearchError) -> Self {
        match err {
            SearchError::InvalidCriteria { reason } => Self {
                status: StatusCode::BAD_REQUEST,
                message: format!("invalid criteria: {}", reason),
            },
            other => {
                error!(error = %other, "search request failed");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "search failed".to_string(),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Free-text description of the stay the user wants
    pub query: String,

    /// Optional caller-supplied id for retrieving the result later
    pub result_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// Id the final shortlist was persisted under
    pub result_id: Uuid,

    /// Criteria as extracted from the query
    pub criteria: Criteria,

    /// Ranked shortlist, best match first
    pub listings: Vec<ListingResult>,

    /// Counts for observability
    pub candidates: usize,
    pub evaluated: usize,
}

#[derive(Debug, Serialize)]
pub struct ListingResult {
    pub url: String,
    pub summary: String,
    pub score: f64,
}

impl From<&RankedEntry> for ListingResult {
    fn from(entry: &RankedEntry) -> Self {
        Self {
            url: entry.url.clone(),
            summary: entry.summary.clone(),
            score: entry.composite_score,
        }
    }
}

/// Run a full search from a free-text query.
pub async fn search_handler<S, A, R>(
    State(state): State<AppState<S, A, R>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError>
where
    S: ResultStore,
    A: AI,
    R: Renderer,
{
    if request.query.trim().is_empty() {
        return Err(ApiError {
            status: StatusCode::BAD_REQUEST,
            message: "query must not be empty".to_string(),
        });
    }

    let criteria = state
        .pipeline
        .criteria_from_text(&request.query)
        .await
        .map_err(ApiError::from_search_error)?;

    let result_id = request.result_id.unwrap_or_else(Uuid::new_v4);
    let outcome = state
        .pipeline
        .run(&criteria, result_id)
        .await
        .map_err(ApiError::from_search_error)?;

    info!(
        result_id = %result_id,
        listings = outcome.entries.len(),
        "search complete"
    );

    Ok(Json(SearchResponse {
        result_id,
        criteria,
        listings: outcome.entries.iter().map(ListingResult::from).collect(),
        candidates: outcome.report.candidates,
        evaluated: outcome.report.fanout_succeeded,
    }))
}

#[derive(Debug, Serialize)]
pub struct GenerateQueryResponse {
    pub query: String,
}

/// Produce an example search query users can start from.
pub async fn generate_query_handler<S, A, R>(
    State(state): State<AppState<S, A, R>>,
) -> Result<Json<GenerateQueryResponse>, ApiError>
where
    S: ResultStore,
    A: AI,
    R: Renderer,
{
    let query = state
        .pipeline
        .example_query()
        .await
        .map_err(ApiError::from_search_error)?;

    Ok(Json(GenerateQueryResponse { query }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use listing_search::testing::{MockAI, MockRenderer};
    use listing_search::{MemoryStore, Pipeline, RenderedPage};

    fn state_with(
        ai: MockAI,
        renderer: MockRenderer,
    ) -> AppState<MemoryStore, MockAI, MockRenderer> {
        AppState::new(Pipeline::new(MemoryStore::new(), ai, renderer))
    }

    #[tokio::test]
    async fn search_returns_shortlist_for_valid_query() {
        let listing = "https://www.airbnb.com/rooms/7";
        let renderer = MockRenderer::new()
            .with_start_page(
                RenderedPage::new("https://www.airbnb.com/s/Austin/homes", "results")
                    .with_links(vec![listing]),
            )
            .with_page(
                RenderedPage::new(listing, "A bright condo downtown")
                    .with_images(vec![format!("{}/photo.jpg", listing)]),
            );
        let ai = MockAI::new().with_extracted_criteria(
            "a condo in Austin",
            Criteria::new("a condo in Austin").with_location("Austin"),
        );

        let response = search_handler(
            State(state_with(ai, renderer)),
            Json(SearchRequest {
                query: "a condo in Austin".to_string(),
                result_id: None,
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.0.listings.len(), 1);
        assert_eq!(response.0.listings[0].url, listing);
        assert_eq!(response.0.candidates, 1);
    }

    #[tokio::test]
    async fn search_without_location_is_a_bad_request() {
        // Default mock extraction carries no location
        let response = search_handler(
            State(state_with(MockAI::new(), MockRenderer::new())),
            Json(SearchRequest {
                query: "somewhere nice".to_string(),
                result_id: None,
            }),
        )
        .await;

        let err = response.err().unwrap();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn empty_query_is_rejected() {
        let response = search_handler(
            State(state_with(MockAI::new(), MockRenderer::new())),
            Json(SearchRequest {
                query: "   ".to_string(),
                result_id: None,
            }),
        )
        .await;

        assert_eq!(response.err().unwrap().status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn generate_query_returns_example() {
        let response =
            generate_query_handler(State(state_with(MockAI::new(), MockRenderer::new())))
                .await
                .unwrap();

        assert!(!response.0.query.is_empty());
    }
}

//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use listing_search::{
    HttpRenderer, MemoryStore, OpenAiService, Pipeline, Renderer, ResultStore, AI,
};
use openai_client::OpenAIClient;

use crate::config::Config;
use crate::routes::{generate_query_handler, health_handler, search_handler};

/// Shared application state
pub struct AppState<S: ResultStore, A: AI, R: Renderer> {
    pub pipeline: Arc<Pipeline<S, A, R>>,
}

impl<S: ResultStore, A: AI, R: Renderer> Clone for AppState<S, A, R> {
    fn clone(&self) -> Self {
        Self {
            pipeline: self.pipeline.clone(),
        }
    }
}

impl<S: ResultStore, A: AI, R: Renderer> AppState<S, A, R> {
    pub fn new(pipeline: Pipeline<S, A, R>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

/// Build a router over any pipeline collaborators.
///
/// Generic so tests can mount the same routes over mock collaborators.
pub fn build_router<S, A, R>(state: AppState<S, A, R>) -> Router
where
    S: ResultStore + 'static,
    A: AI + 'static,
    R: Renderer + 'static,
{
    Router::new()
        .route("/health", get(health_handler))
        .route("/search", post(search_handler::<S, A, R>))
        .route("/generate_query", post(generate_query_handler::<S, A, R>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Build the production application from configuration.
pub fn build_app(config: &Config) -> Router {
    let ai = OpenAiService::new(OpenAIClient::new(config.openai_api_key.clone()))
        .with_model(config.openai_model.clone());

    let pipeline = Pipeline::with_config(
        MemoryStore::new(),
        ai,
        HttpRenderer::new(),
        config.search.clone(),
    );

    build_router(AppState::new(pipeline))
}

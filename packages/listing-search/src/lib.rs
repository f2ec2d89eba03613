//! Listing Discovery and Ranking Library
//!
//! A pipeline that turns a free-text description of a stay into a ranked
//! shortlist of rental listings: build a search URL, discover candidate
//! listings from the rendered results page, summarize and score each one
//! concurrently, then rank-merge the scorers into a justified shortlist.
//!
//! # Design Philosophy
//!
//! - Fail open per listing: one bad candidate never sinks a search
//! - Fail fast on dependencies: a missing stage result is always fatal
//! - Join on URL, never on position; units complete in any order
//! - Library handles mechanics, app handles presentation
//!
//! # Usage
//!
//! ```rust,ignore
//! use listing_search::{Pipeline, MemoryStore};
//! use listing_search::render::HttpRenderer;
//! use listing_search::testing::MockAI;
//! use uuid::Uuid;
//!
//! let pipeline = Pipeline::new(MemoryStore::new(), MockAI::new(), HttpRenderer::new());
//!
//! let criteria = pipeline.criteria_from_text("2BR in Austin with a pool").await?;
//! let outcome = pipeline.run(&criteria, Uuid::new_v4()).await?;
//! for entry in outcome.entries {
//!     println!("{}: {}", entry.url, entry.summary);
//! }
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (AI, Renderer, ResultStore)
//! - [`types`] - Criteria, listings, evaluations, configuration
//! - [`pipeline`] - The staged search pipeline
//! - [`stores`] - Stage result stores (MemoryStore, etc.)
//! - [`render`] - Page renderer implementations (HttpRenderer)
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod pipeline;
pub mod render;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(feature = "openai")]
pub mod ai;

// Re-export core types at crate root
pub use error::{RenderError, SearchError};
pub use traits::{
    ai::{ScoredReview, AI},
    renderer::Renderer,
    store::ResultStore,
};
pub use types::{
    config::SearchConfig,
    criteria::{Amenity, Criteria, GuestCounts},
    evaluation::{Evaluation, EvaluationMap, FinalEntry, RankedEntry, MAX_SCORE, MIN_SCORE},
    listing::{ListingContent, RenderedPage},
};

// Re-export the pipeline driver and stage functions
pub use pipeline::{
    discover_candidates, rank_and_summarize, score_descriptions, score_images, search_url,
    summarize_candidates, FanoutReport, Pipeline, RankReport, ScoreReport, SearchOutcome,
    SearchReport, StageIds,
};

// Re-export stores
pub use stores::MemoryStore;

#[cfg(feature = "sqlite")]
pub use stores::SqliteStore;

// Re-export renderers
pub use render::HttpRenderer;

#[cfg(feature = "openai")]
pub use ai::OpenAiService;

// Re-export testing utilities
pub use testing::{MockAI, MockRenderer};

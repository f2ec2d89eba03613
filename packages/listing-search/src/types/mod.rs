//! Data types for the search pipeline.

pub mod config;
pub mod criteria;
pub mod evaluation;
pub mod listing;

pub use config::SearchConfig;
pub use criteria::{Amenity, Criteria, GuestCounts};
pub use evaluation::{Evaluation, EvaluationMap, FinalEntry, RankedEntry, MAX_SCORE, MIN_SCORE};
pub use listing::{ListingContent, RenderedPage};

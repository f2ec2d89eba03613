//! The search pipeline, stage by stage.
//!
//! Each stage is a free function over the crate's trait seams so it can be
//! tested in isolation; [`search::Pipeline`] wires them together and persists
//! the intermediate results between stages.

pub mod candidates;
pub mod fanout;
pub mod prompts;
pub mod rank;
pub mod scoring;
pub mod search;
pub mod start_url;

pub use candidates::{discover_candidates, LISTING_PATH};
pub use fanout::{summarize_candidates, FanoutReport};
pub use rank::{rank_and_summarize, RankReport};
pub use scoring::{score_descriptions, score_images, ScoreReport};
pub use search::{Pipeline, SearchOutcome, SearchReport, StageIds};
pub use start_url::search_url;

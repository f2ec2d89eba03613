//! Core trait abstractions for the external collaborators.

pub mod ai;
pub mod renderer;
pub mod store;

pub use ai::{ScoredReview, AI};
pub use renderer::Renderer;
pub use store::ResultStore;

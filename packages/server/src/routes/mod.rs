//! HTTP route handlers.

mod health;
mod search;

pub use health::health_handler;
pub use search::{generate_query_handler, search_handler, SearchRequest, SearchResponse};

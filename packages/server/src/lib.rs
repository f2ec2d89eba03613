//! HTTP server for the listing-search pipeline.
//!
//! Exposes three endpoints:
//! - `POST /search` - run a full search from a free-text query
//! - `POST /generate_query` - produce an example query
//! - `GET /health` - liveness check

pub mod app;
pub mod config;
pub mod routes;

pub use app::{build_app, build_router, AppState};
pub use config::Config;

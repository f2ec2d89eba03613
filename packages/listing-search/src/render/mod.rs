//! Renderer implementations.

mod http;

pub use http::HttpRenderer;

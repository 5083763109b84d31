//! Fetching CMS content.
//!
//! - [`resource`] - Snippet, page and page part paths
//! - [`http`] - Blocking HTTP client with timeout and basic auth
//! - [`consumer`] - [`ContentFetcher`], the cached fetch entry point

pub mod consumer;
pub mod http;
pub mod resource;

pub use consumer::{CachedEntry, ContentFetcher};
pub use http::HttpFetcher;
pub use resource::{ResourceKind, ResourcePath};

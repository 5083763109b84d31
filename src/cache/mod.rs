//! Content caching.
//!
//! This module provides the key-value store seam used by the fetcher,
//! the key layout for timestamp and content records, and the TTL
//! validity decision.

pub mod key;
pub mod store;
pub mod validation;

pub use key::{CacheKeys, DEFAULT_NAMESPACE};
pub use store::{CacheStore, FileStore, MemoryStore};
pub use validation::{format_duration, parse_timestamp, CacheValidity};

/// Cache directory used by the CLI, relative to the project root.
pub fn default_cache_dir(project_root: &std::path::Path) -> std::path::PathBuf {
    project_root.join(crate::config::CONFIG_DIR).join("cache")
}

//! Template-facing helpers.
//!
//! These take a loose option mapping, the way a template engine hands
//! arguments over, validate it for this call only, and render the result
//! as a plain string. A swallowed fetch failure renders as `""`.
//!
//! # Example
//!
//! ```no_run
//! use cms_consumer::cache::MemoryStore;
//! use cms_consumer::config::ConsumerOptions;
//! use cms_consumer::fetch::ContentFetcher;
//! use cms_consumer::helpers;
//! use std::sync::Arc;
//!
//! let fetcher = ContentFetcher::new(
//!     ConsumerOptions::new("http://cms.example.com"),
//!     Arc::new(MemoryStore::new()),
//! )
//! .unwrap();
//!
//! let options: serde_yaml::Mapping = serde_yaml::from_str("ttl_seconds: 5m").unwrap();
//! let html = helpers::page_part(&fetcher, "home", "sidebar", &options).unwrap();
//! ```

use serde_yaml::Mapping;

use crate::config::ConsumerOptions;
use crate::error::Result;
use crate::fetch::{ContentFetcher, ResourcePath};

/// Render the snippet `name`.
pub fn snippet(fetcher: &ContentFetcher, name: &str, options: &Mapping) -> Result<String> {
    render(fetcher, &ResourcePath::snippet(name), options)
}

/// Render the page `name`.
pub fn page(fetcher: &ContentFetcher, name: &str, options: &Mapping) -> Result<String> {
    render(fetcher, &ResourcePath::page(name), options)
}

/// Render the part `part` of page `name`.
pub fn page_part(
    fetcher: &ContentFetcher,
    name: &str,
    part: &str,
    options: &Mapping,
) -> Result<String> {
    render(fetcher, &ResourcePath::page_part(name, part), options)
}

fn render(fetcher: &ContentFetcher, resource: &ResourcePath, options: &Mapping) -> Result<String> {
    let overrides = ConsumerOptions::from_mapping(options)?;
    Ok(fetcher.fetch(resource, &overrides)?.unwrap_or_default())
}

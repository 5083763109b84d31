//! cms-consumer - Fetch CMS content through a TTL cache.
//!
//! Snippets, pages and page parts are fetched over HTTP from a CMS and
//! kept in a pluggable key-value store until their TTL runs out. Fetch
//! failures fall back to static content, an empty result, or an error,
//! depending on configuration.
//!
//! # Modules
//!
//! - [`cache`] - Store trait, memory and file stores, key layout, TTL checks
//! - [`cli`] - Command-line interface and argument parsing
//! - [`clock`] - Time source used for fetch timestamps
//! - [`config`] - Option parsing, validation, merging and file loading
//! - [`environment`] - Active environment resolution
//! - [`error`] - Error types and result aliases
//! - [`fetch`] - Resource paths, HTTP client and the cached fetcher
//! - [`helpers`] - Template-facing snippet/page/part functions
//! - [`ui`] - Terminal output for the CLI
//!
//! # Example
//!
//! ```
//! use cms_consumer::cache::MemoryStore;
//! use cms_consumer::config::ConsumerOptions;
//! use cms_consumer::fetch::ContentFetcher;
//! use std::sync::Arc;
//!
//! let options = ConsumerOptions::new("http://cms.example.com")
//!     .with_environment_content("test", "<p>placeholder</p>");
//! let fetcher = ContentFetcher::new(options, Arc::new(MemoryStore::new()))
//!     .unwrap()
//!     .with_environment("test");
//!
//! // Environment content never touches the network
//! let html = fetcher.fetch_page("home", &ConsumerOptions::default()).unwrap();
//! assert_eq!(html.as_deref(), Some("<p>placeholder</p>"));
//! ```

pub mod cache;
pub mod cli;
pub mod clock;
pub mod config;
pub mod environment;
pub mod error;
pub mod fetch;
pub mod helpers;
pub mod ui;

pub use error::{ConsumerError, Result};

//! Configuration for the content fetcher.
//!
//! This module handles:
//! - Typed options in [`schema`]
//! - Option name and value validation in [`validator`]
//! - Pure merging of per-call overrides in [`merger`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use cms_consumer::config::{load_merged_options, EffectiveOptions};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let cms_dir = temp.path().join(".cms");
//! fs::create_dir_all(&cms_dir).unwrap();
//! fs::write(
//!     cms_dir.join("config.yml"),
//!     "base_url: http://cms.example.com\nttl_seconds: 10m\n",
//! )
//! .unwrap();
//!
//! let options = load_merged_options(temp.path()).unwrap();
//! let effective = EffectiveOptions::resolve(options).unwrap();
//! assert_eq!(effective.ttl_seconds, Some(600));
//! ```

pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use loader::{
    load_config_mapping, load_merged_options, load_options, load_options_file, overlay_mapping,
    parse_config_mapping, ConfigPaths, CONFIG_DIR,
};
pub use merger::{merge_options, Credentials, EffectiveOptions, DEFAULT_TIMEOUT_SECONDS};
pub use schema::ConsumerOptions;
pub use validator::{is_valid_option_name, parse_option_name, OptionName, KNOWN_OPTIONS};

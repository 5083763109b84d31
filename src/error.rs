//! Error types for content fetching.
//!
//! This module defines [`ConsumerError`], the error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Configuration problems (missing base URL, unknown option names) are
//!   returned to the caller immediately and never swallowed
//! - Network problems (timeouts, refused connections, bad statuses) are
//!   recovered inside the fetcher unless `raise_on_error` is set
//! - Use `anyhow::Error` (via `ConsumerError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for content fetching.
#[derive(Debug, Error)]
pub enum ConsumerError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// No `base_url` configured, so there is nothing to fetch from.
    #[error("No configuration found: base_url is not set")]
    MissingBaseUrl,

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Option name outside the recognized set.
    #[error("Invalid option: {name}")]
    InvalidOption { name: String },

    /// Recognized option with a value of the wrong shape.
    #[error("Invalid value for option '{name}': {message}")]
    InvalidOptionValue { name: String, message: String },

    /// The request did not complete within the timeout.
    #[error("Timed out after {timeout_seconds}s fetching {url}")]
    Timeout { url: String, timeout_seconds: u64 },

    /// The connection could not be established.
    #[error("Connection refused fetching {url}: {message}")]
    ConnectionRefused { url: String, message: String },

    /// The server answered with a non-success status.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus { url: String, status: u16 },

    /// Any other transport-level failure.
    #[error("Failed to fetch {url}: {message}")]
    Transport { url: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ConsumerError {
    /// Whether this error came from the network fetch rather than from
    /// configuration or the cache store.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. }
                | Self::ConnectionRefused { .. }
                | Self::HttpStatus { .. }
                | Self::Transport { .. }
        )
    }
}

/// Result type alias for content fetching.
pub type Result<T> = std::result::Result<T, ConsumerError>;

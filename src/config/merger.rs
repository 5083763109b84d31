//! Option merging and resolution.
//!
//! Per-call overrides never touch the fetcher's configuration. Instead
//! [`merge_options`] builds a fresh value, and [`EffectiveOptions::resolve`]
//! applies defaults and checks required fields.

use std::collections::BTreeMap;
use std::time::Duration;

use super::schema::ConsumerOptions;
use super::validator::zero_timeout;
use crate::error::{ConsumerError, Result};

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Merge per-call overrides onto base options.
///
/// Set fields in `overrides` win; environment content merges per
/// environment name.
///
/// # Example
///
/// ```
/// use cms_consumer::config::{merge_options, ConsumerOptions};
///
/// let base = ConsumerOptions::new("http://example.com").with_ttl(600);
/// let overrides = ConsumerOptions::default().with_ttl(5);
///
/// let merged = merge_options(&base, &overrides);
/// assert_eq!(merged.ttl_seconds, Some(5));
/// assert_eq!(base.ttl_seconds, Some(600));
/// ```
pub fn merge_options(base: &ConsumerOptions, overrides: &ConsumerOptions) -> ConsumerOptions {
    let mut environment_content = base.environment_content.clone();
    environment_content.extend(
        overrides
            .environment_content
            .iter()
            .map(|(k, v)| (k.clone(), v.clone())),
    );

    ConsumerOptions {
        base_url: pick(&overrides.base_url, &base.base_url),
        ttl_seconds: overrides.ttl_seconds.or(base.ttl_seconds),
        timeout_seconds: overrides.timeout_seconds.or(base.timeout_seconds),
        username: pick(&overrides.username, &base.username),
        password: pick(&overrides.password, &base.password),
        error_fallback_content: pick(
            &overrides.error_fallback_content,
            &base.error_fallback_content,
        ),
        raise_on_error: overrides.raise_on_error.or(base.raise_on_error),
        environment_content,
    }
}

fn pick(preferred: &Option<String>, fallback: &Option<String>) -> Option<String> {
    preferred.as_ref().or(fallback.as_ref()).cloned()
}

/// Basic auth credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Options for one fetch, with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveOptions {
    pub base_url: String,
    /// `None` means cached content never expires.
    pub ttl_seconds: Option<u64>,
    pub timeout: Duration,
    pub credentials: Option<Credentials>,
    pub error_fallback_content: Option<String>,
    pub raise_on_error: bool,
    pub environment_content: BTreeMap<String, String>,
}

impl EffectiveOptions {
    /// Resolve merged options into the values a fetch runs with.
    ///
    /// # Errors
    ///
    /// Returns `MissingBaseUrl` if no base URL is set or it is blank, and
    /// `InvalidOptionValue` for a zero timeout.
    pub fn resolve(options: ConsumerOptions) -> Result<Self> {
        let base_url = options
            .base_url
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConsumerError::MissingBaseUrl)?;

        let timeout_seconds = options.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS);
        if timeout_seconds == 0 {
            return Err(zero_timeout("timeout_seconds"));
        }

        let credentials = options.username.map(|username| Credentials {
            username,
            password: options.password,
        });

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ttl_seconds: options.ttl_seconds,
            timeout: Duration::from_secs(timeout_seconds),
            credentials,
            error_fallback_content: options.error_fallback_content,
            raise_on_error: options.raise_on_error.unwrap_or(false),
            environment_content: options.environment_content,
        })
    }

    /// Merge and resolve in one step.
    pub fn from_parts(base: &ConsumerOptions, overrides: &ConsumerOptions) -> Result<Self> {
        Self::resolve(merge_options(base, overrides))
    }

    /// Static content configured for `environment`, if any.
    pub fn content_for_environment(&self, environment: &str) -> Option<&str> {
        self.environment_content.get(environment).map(String::as_str)
    }
}

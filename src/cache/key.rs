//! Cache key construction.
//!
//! Each resource URL owns two records: the last-fetched timestamp under
//! `{namespace}/fetched_at/{url}` and the content under
//! `{namespace}/content/{url}@{timestamp}`. The two record kinds live under
//! separate prefixes, and the timestamp follows the last `@`, so no URL can
//! produce another URL's key.

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "cms_consumer";

/// Builds store keys under a fixed namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKeys {
    namespace: String,
}

impl CacheKeys {
    /// Create a key builder for `namespace`.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// The namespace prefix.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Key of the last-fetched timestamp for `url`.
    pub fn timestamp(&self, url: &str) -> String {
        format!("{}/fetched_at/{}", self.namespace, url)
    }

    /// Key of the content fetched from `url` at `fetched_at`.
    pub fn content(&self, url: &str, fetched_at: i64) -> String {
        format!("{}/content/{}@{}", self.namespace, url, fetched_at)
    }
}

impl Default for CacheKeys {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

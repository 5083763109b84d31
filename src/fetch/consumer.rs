//! The TTL content fetcher.
//!
//! [`ContentFetcher`] answers "give me this snippet/page/part" either from
//! the cache store or from the CMS, and keeps exactly one
//! (timestamp, content) pair per URL in the store.
//!
//! One fetch runs through these states:
//!
//! ```text
//! CheckEnvOverride --(configured)--> return static content
//!        |
//! CheckCacheValidity --(fresh)--> ReadCache --> return
//!        |
//!   NetworkFetch --(ok)--> WriteCache --> return
//!        |
//!      (fail) --> EvictCache --> fallback | error | empty
//! ```
//!
//! There is no locking around the miss branch: two callers that miss at
//! the same time both fetch, and the last write wins.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use super::http::HttpFetcher;
use super::resource::ResourcePath;
use crate::cache::{parse_timestamp, CacheKeys, CacheStore, CacheValidity};
use crate::clock::{Clock, SystemClock};
use crate::config::{ConsumerOptions, EffectiveOptions};
use crate::environment::ResolvedEnvironment;
use crate::error::{ConsumerError, Result};

/// Fetches CMS content through a TTL cache.
///
/// # Example
///
/// ```no_run
/// use cms_consumer::cache::MemoryStore;
/// use cms_consumer::config::ConsumerOptions;
/// use cms_consumer::fetch::ContentFetcher;
/// use std::sync::Arc;
///
/// let options = ConsumerOptions::new("http://cms.example.com").with_ttl(600);
/// let fetcher = ContentFetcher::new(options, Arc::new(MemoryStore::new())).unwrap();
///
/// let footer = fetcher
///     .fetch_snippet("footer", &ConsumerOptions::default())
///     .unwrap();
/// println!("{}", footer.unwrap_or_default());
/// ```
pub struct ContentFetcher {
    options: ConsumerOptions,
    environment: String,
    store: Arc<dyn CacheStore>,
    clock: Arc<dyn Clock>,
    keys: CacheKeys,
    http: HttpFetcher,
}

/// What the store currently holds for one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CachedEntry {
    /// Full resource URL.
    pub url: String,
    /// Unix seconds of the last successful fetch.
    pub fetched_at: i64,
    /// Unix seconds after which the entry is stale, if it expires.
    pub expires_at: Option<i64>,
    /// Whether the entry would be served without a network call.
    pub fresh: bool,
    /// Size of the cached content, if present.
    pub size_bytes: Option<usize>,
}

impl ContentFetcher {
    /// Create a fetcher for `options` backed by `store`.
    ///
    /// The active environment is resolved from `CMS_ENV` (falling back to
    /// "development"); use [`with_environment`](Self::with_environment) to
    /// set it explicitly.
    ///
    /// # Errors
    ///
    /// Returns `MissingBaseUrl` if `options` has no base URL.
    pub fn new(options: ConsumerOptions, store: Arc<dyn CacheStore>) -> Result<Self> {
        EffectiveOptions::resolve(options.clone())?;

        Ok(Self {
            options,
            environment: ResolvedEnvironment::resolve(None).name,
            store,
            clock: Arc::new(SystemClock),
            keys: CacheKeys::default(),
            http: HttpFetcher::new()?,
        })
    }

    /// Set the active environment name.
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Use a different cache key namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.keys = CacheKeys::new(namespace);
        self
    }

    /// The configured options.
    pub fn options(&self) -> &ConsumerOptions {
        &self.options
    }

    /// The active environment name.
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// The cache key builder.
    pub fn keys(&self) -> &CacheKeys {
        &self.keys
    }

    /// Fetch `/snippets/{name}`.
    pub fn fetch_snippet(&self, name: &str, overrides: &ConsumerOptions) -> Result<Option<String>> {
        self.fetch(&ResourcePath::snippet(name), overrides)
    }

    /// Fetch `/page/{name}`.
    pub fn fetch_page(&self, name: &str, overrides: &ConsumerOptions) -> Result<Option<String>> {
        self.fetch(&ResourcePath::page(name), overrides)
    }

    /// Fetch `/page/{name}/{part}`.
    pub fn fetch_page_part(
        &self,
        name: &str,
        part: &str,
        overrides: &ConsumerOptions,
    ) -> Result<Option<String>> {
        self.fetch(&ResourcePath::page_part(name, part), overrides)
    }

    /// Fetch a resource, serving it from cache while fresh.
    ///
    /// Returns `Ok(None)` when the fetch failed, no fallback content is
    /// configured and `raise_on_error` is off.
    ///
    /// # Errors
    ///
    /// Configuration errors always propagate. Fetch errors propagate only
    /// with `raise_on_error` and no fallback content. Store errors on the
    /// read and write paths propagate.
    pub fn fetch(&self, resource: &ResourcePath, overrides: &ConsumerOptions) -> Result<Option<String>> {
        let options = EffectiveOptions::from_parts(&self.options, overrides)?;
        let path = resource.path();

        if let Some(content) = options.content_for_environment(&self.environment) {
            debug!("Serving {} from {}_content", path, self.environment);
            return Ok(Some(content.to_string()));
        }

        let url = resource.url(&options.base_url);
        let last = self.read_timestamp(&url)?;

        if let CacheValidity::Fresh(cached_at) =
            CacheValidity::check(last, options.ttl_seconds, self.clock.now())
        {
            match self.store.read(&self.keys.content(&url, cached_at))? {
                Some(content) => {
                    debug!("Cache hit for {}", url);
                    return Ok(Some(content));
                }
                None => debug!("Cached timestamp for {} has no content", url),
            }
        }

        debug!("Cache miss for {}, fetching", url);

        match self
            .http
            .get(&url, options.timeout, options.credentials.as_ref())
        {
            Ok(content) => {
                self.store_content(&url, last, &content)?;
                Ok(Some(content))
            }
            Err(err) => self.recover(&path, &url, last, &options, err),
        }
    }

    /// Report the cached pair for a resource, if any.
    pub fn cached_entry(
        &self,
        resource: &ResourcePath,
        overrides: &ConsumerOptions,
    ) -> Result<Option<CachedEntry>> {
        let options = EffectiveOptions::from_parts(&self.options, overrides)?;
        let url = resource.url(&options.base_url);

        let validity = CacheValidity::check(
            self.read_timestamp(&url)?,
            options.ttl_seconds,
            self.clock.now(),
        );
        let Some(fetched_at) = validity.cached_at() else {
            return Ok(None);
        };

        let content = self.store.read(&self.keys.content(&url, fetched_at))?;

        Ok(Some(CachedEntry {
            expires_at: options
                .ttl_seconds
                .map(|ttl| fetched_at.saturating_add(i64::try_from(ttl).unwrap_or(i64::MAX))),
            fresh: validity.is_fresh() && content.is_some(),
            size_bytes: content.as_ref().map(String::len),
            fetched_at,
            url,
        }))
    }

    /// Remove the cached pair for a resource. Returns whether anything was
    /// removed.
    pub fn evict(&self, resource: &ResourcePath, overrides: &ConsumerOptions) -> Result<bool> {
        let options = EffectiveOptions::from_parts(&self.options, overrides)?;
        let url = resource.url(&options.base_url);
        let last = self.read_timestamp(&url)?;
        self.remove_pair(&url, last)
    }

    fn read_timestamp(&self, url: &str) -> Result<Option<i64>> {
        let raw = self.store.read(&self.keys.timestamp(url))?;

        Ok(raw.and_then(|raw| {
            let parsed = parse_timestamp(&raw);
            if parsed.is_none() {
                debug!("Ignoring unparseable cache timestamp {:?} for {}", raw, url);
            }
            parsed
        }))
    }

    /// Replace the pair for `url` with freshly fetched content.
    fn store_content(&self, url: &str, last: Option<i64>, content: &str) -> Result<()> {
        self.remove_pair(url, last)?;

        let fetched_at = self.clock.now();
        self.store
            .write(&self.keys.timestamp(url), &fetched_at.to_string())?;
        self.store
            .write(&self.keys.content(url, fetched_at), content)?;

        debug!("Cached {} bytes for {} at {}", content.len(), url, fetched_at);
        Ok(())
    }

    fn remove_pair(&self, url: &str, last: Option<i64>) -> Result<bool> {
        let mut removed = self.store.delete(&self.keys.timestamp(url))?;

        if let Some(ts) = last {
            removed |= self.store.delete(&self.keys.content(url, ts))?;
        }

        Ok(removed)
    }

    fn recover(
        &self,
        path: &str,
        url: &str,
        last: Option<i64>,
        options: &EffectiveOptions,
        err: ConsumerError,
    ) -> Result<Option<String>> {
        warn!("Failed to fetch {} from {}: {}", path, url, err);

        if let Err(evict_err) = self.remove_pair(url, last) {
            warn!("Failed to evict cache for {}: {}", url, evict_err);
        }

        if let Some(fallback) = &options.error_fallback_content {
            return Ok(Some(fallback.clone()));
        }

        if options.raise_on_error {
            return Err(err);
        }

        Ok(None)
    }
}

impl std::fmt::Debug for ContentFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentFetcher")
            .field("options", &self.options)
            .field("environment", &self.environment)
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

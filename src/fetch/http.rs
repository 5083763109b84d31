//! HTTP content fetching.
//!
//! A thin blocking client: one GET per call, bounded by a per-request
//! timeout, with optional basic auth. Failures are classified into the
//! timeout / refused / status / transport variants of
//! [`ConsumerError`].

use reqwest::blocking::Client;
use std::time::Duration;

use crate::config::Credentials;
use crate::error::{ConsumerError, Result};

/// Fetches resource bodies over HTTP/HTTPS.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a new HTTP fetcher.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("cms-consumer/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                ConsumerError::Other(anyhow::Error::new(e).context("Failed to build HTTP client"))
            })?;

        Ok(Self { client })
    }

    /// GET `url` and return the body.
    ///
    /// An empty body is valid content. Non-success statuses are errors.
    pub fn get(
        &self,
        url: &str,
        timeout: Duration,
        credentials: Option<&Credentials>,
    ) -> Result<String> {
        let mut request = self.client.get(url).timeout(timeout);

        if let Some(credentials) = credentials {
            request = request.basic_auth(&credentials.username, credentials.password.as_ref());
        }

        let response = request.send().map_err(|e| classify(url, timeout, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConsumerError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(|e| classify(url, timeout, e))
    }
}

fn classify(url: &str, timeout: Duration, err: reqwest::Error) -> ConsumerError {
    if err.is_timeout() {
        ConsumerError::Timeout {
            url: url.to_string(),
            timeout_seconds: timeout.as_secs(),
        }
    } else if err.is_connect() {
        ConsumerError::ConnectionRefused {
            url: url.to_string(),
            message: err.to_string(),
        }
    } else {
        ConsumerError::Transport {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

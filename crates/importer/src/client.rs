//! HTTP client for the external Star Wars dataset.
//!
//! Collections are served either as a bare JSON array (swapi.info) or as a
//! paginated envelope `{ "count", "next", "results" }` (swapi.dev). Both are
//! accepted; `next` links are followed until exhausted. Items are returned
//! as raw JSON so that one malformed item does not poison its page.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Upstream used when `SWAPI_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://swapi.info/api";

/// Upper bound on pages followed for one collection.
const MAX_PAGES: usize = 100;

/// Timeout for the health ping, independent of the import timeout.
const PING_TIMEOUT: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Connection and retry settings for [`SwapiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without trailing slash, e.g. `https://swapi.info/api`.
    pub base_url: String,
    /// Timeout for a single HTTP request.
    pub timeout: Duration,
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubled for each following one.
    pub retry_base: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_base: Duration::from_millis(500),
        }
    }
}

impl ClientConfig {
    /// Delay before retry number `attempt` (zero-based): `retry_base * 2^attempt`.
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        self.retry_base.saturating_mul(1u32 << attempt.min(16))
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors from the upstream dataset client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream answered with a non-2xx status.
    #[error("Upstream returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// The body was not JSON of a recognised collection shape.
    #[error("Invalid response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// `next` links kept coming past the page limit.
    #[error("Pagination of {url} did not finish within {pages} pages")]
    TooManyPages { url: String, pages: usize },
}

impl ClientError {
    /// Transport failures, 5xx and 429 are worth retrying; anything else
    /// will fail the same way again.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Request(_) => true,
            ClientError::Status { status, .. } => *status == 429 || *status >= 500,
            ClientError::Decode { .. } | ClientError::TooManyPages { .. } => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// One page of a collection.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PageBody {
    List(Vec<serde_json::Value>),
    Paged {
        results: Vec<serde_json::Value>,
        #[serde(default)]
        next: Option<String>,
    },
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for one upstream dataset. Cheap to clone.
#[derive(Debug, Clone)]
pub struct SwapiClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl SwapiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Full URL of a collection, e.g. `films` -> `{base_url}/films`.
    pub fn resource_url(&self, resource: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), resource)
    }

    /// Fetch every item of a collection, following `next` links.
    pub async fn fetch_all(&self, resource: &str) -> Result<Vec<serde_json::Value>, ClientError> {
        let mut url = self.resource_url(resource);
        let mut items = Vec::new();

        for page in 1..=MAX_PAGES {
            let body: PageBody = self.get_json(&url).await?;
            match body {
                PageBody::List(batch) => {
                    tracing::debug!(resource, page, count = batch.len(), "Fetched upstream page");
                    items.extend(batch);
                    return Ok(items);
                }
                PageBody::Paged { results, next } => {
                    tracing::debug!(resource, page, count = results.len(), "Fetched upstream page");
                    items.extend(results);
                    match next {
                        Some(next_url) => url = next_url,
                        None => return Ok(items),
                    }
                }
            }
        }

        Err(ClientError::TooManyPages {
            url,
            pages: MAX_PAGES,
        })
    }

    /// Whether the upstream base URL answers with a success status.
    pub async fn ping(&self) -> bool {
        match self
            .client
            .get(&self.config.base_url)
            .timeout(PING_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(error = %e, "Upstream ping failed");
                false
            }
        }
    }

    // ---- private helpers ----

    /// GET and decode a JSON body, retrying retryable failures with
    /// exponential backoff.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ClientError> {
        let mut attempt = 0;
        loop {
            match self.try_get(url).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    let delay = self.config.retry_delay(attempt);
                    tracing::warn!(
                        attempt = attempt + 1,
                        url,
                        error = %e,
                        delay_ms = delay.as_millis() as u64,
                        "Upstream request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!(url, error = %e, attempts = attempt + 1, "Upstream request failed");
                    return Err(e);
                }
            }
        }
    }

    /// Execute a single GET request and decode the body.
    async fn try_get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ClientError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

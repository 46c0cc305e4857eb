//! HTTP fetcher implementation
//!
//! The crawl core only sees the [`Fetcher`] trait: give it a URL, get back the
//! status code and body. Status handling is left to the callers because the
//! traverser and the verifier react to the same status differently.

use crate::config::HttpConfig;
use crate::{HarvestError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// A fetched page, whatever its status
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub url: String,
    /// HTTP status code
    pub status_code: u16,
    /// Page body content
    pub body: String,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// True for the "service temporarily unavailable" status the verifier retries on
    pub fn is_unavailable(&self) -> bool {
        self.status_code == 503
    }
}

/// Source of pages for the traverser and the verifier
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url`; any HTTP status is returned as a page, transport
    /// failures as an error
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use noun_harvest::config::HttpConfig;
/// use noun_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`Fetcher`] backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &HttpConfig) -> Result<Self> {
        Ok(Self::new(build_http_client(config)?))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| HarvestError::Http {
                url: url.to_string(),
                source,
            })?;

        let status_code = response.status().as_u16();
        let final_url = response.url().to_string();

        let body = response.text().await.map_err(|source| HarvestError::Http {
            url: url.to_string(),
            source,
        })?;

        tracing::debug!(url = %final_url, status = status_code, "fetched page");

        Ok(FetchedPage {
            url: final_url,
            status_code,
            body,
        })
    }
}

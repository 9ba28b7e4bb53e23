//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client from the fetch configuration
//! - GET requests with charset-aware decoding
//! - Bounded retry with randomized pauses for transient failures

use crate::config::FetchConfig;
use crate::crawler::pacing::{self, Pacer, RandomPacer};
use crate::RegcatError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Supplies the raw content of a page
///
/// Implementations own their retry policy: an `Err` means the page could
/// not be obtained at all and the current walk is abandoned.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    async fn fetch(&mut self, url: &Url) -> Result<String, RegcatError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetch configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.timeout_secs.min(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Page source backed by `reqwest`
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | 2xx | Decode body and return |
/// | Non-2xx status | Pause, retry |
/// | Network error / timeout | Pause, retry |
/// | Body decoding error | Pause, retry |
/// | `max_retries` retries spent | `FetchExhausted` |
pub struct HttpSource<P: Pacer = RandomPacer> {
    client: Client,
    max_retries: u32,
    charset: String,
    backoff: P,
}

impl HttpSource<RandomPacer> {
    /// Builds a source with a fresh client and randomized retry pauses
    pub fn from_config(config: &FetchConfig) -> Result<Self, RegcatError> {
        let client = build_http_client(config)?;
        Ok(Self::new(client, config, RandomPacer::between_retries(config)))
    }
}

impl<P: Pacer> HttpSource<P> {
    pub fn new(client: Client, config: &FetchConfig, backoff: P) -> Self {
        Self {
            client,
            max_retries: config.max_retries,
            charset: config.charset.clone(),
            backoff,
        }
    }

    /// Performs a single GET
    async fn fetch_once(&self, url: &Url) -> Result<String, RegcatError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| RegcatError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RegcatError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // The declared charset wins; the configured one covers silent servers
        response
            .text_with_charset(&self.charset)
            .await
            .map_err(|source| RegcatError::Http {
                url: url.to_string(),
                source,
            })
    }
}

impl<P: Pacer> PageSource for HttpSource<P> {
    async fn fetch(&mut self, url: &Url) -> Result<String, RegcatError> {
        let attempts = self.max_retries + 1;

        for attempt in 1..=attempts {
            match self.fetch_once(url).await {
                Ok(body) => {
                    tracing::debug!("Fetched {} ({} bytes)", url, body.len());
                    return Ok(body);
                }
                Err(e) => {
                    tracing::warn!("Attempt {}/{} for {} failed: {}", attempt, attempts, url, e);
                    if attempt < attempts {
                        pacing::wait(&mut self.backoff).await;
                    }
                }
            }
        }

        Err(RegcatError::FetchExhausted {
            url: url.to_string(),
            attempts,
        })
    }
}

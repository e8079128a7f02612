//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper, including:
//! - Building HTTP clients with the configured user agent and timeouts
//! - Sending the fixed Accept-Language preference with every request
//! - Refusing URLs outside the allowed domains
//! - Classifying failures; every failure is fatal to the session

use crate::config::{Config, FetcherConfig};
use crate::{ConfigError, ScrapeError};
use reqwest::header::{HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Source of page bodies
///
/// Implementations own transport concerns: headers, timeouts and any error
/// classification. The scrape core only awaits one page at a time.
pub trait Fetcher {
    /// Fetches `url` and returns the response body
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, ScrapeError>> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetcher configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use reel_harvest::config::FetcherConfig;
/// use reel_harvest::scrape::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetcher backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    accept_language: HeaderValue,
    allowed_domains: Vec<String>,
}

impl HttpFetcher {
    /// Creates a fetcher from the site and fetcher sections of the config
    pub fn new(config: &Config) -> Result<Self, ScrapeError> {
        let accept_language = HeaderValue::from_str(&config.fetcher.accept_language)
            .map_err(|e| {
                ConfigError::Validation(format!(
                    "accept_language '{}' is not a valid header value: {}",
                    config.fetcher.accept_language, e
                ))
            })?;

        Ok(Self {
            client: build_http_client(&config.fetcher)?,
            accept_language,
            allowed_domains: config.site.allowed_domains.clone(),
        })
    }

    /// Returns an error unless `url`'s host is on the allow list
    ///
    /// An empty allow list permits every host.
    pub fn check_allowed(&self, url: &str) -> Result<(), ScrapeError> {
        if self.allowed_domains.is_empty() {
            return Ok(());
        }

        let parsed = Url::parse(url)?;
        let allowed = parsed
            .host_str()
            .is_some_and(|host| self.allowed_domains.iter().any(|d| d.eq_ignore_ascii_case(host)));

        if allowed {
            Ok(())
        } else {
            Err(ScrapeError::DisallowedDomain {
                url: url.to_string(),
            })
        }
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        self.check_allowed(url)?;

        tracing::info!("Visiting {}", url);

        let response = self
            .client
            .get(url)
            .header(ACCEPT_LANGUAGE, self.accept_language.clone())
            .send()
            .await
            .map_err(|source| ScrapeError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| ScrapeError::Http {
            url: url.to_string(),
            source,
        })
    }
}

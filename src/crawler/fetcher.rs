//! Page fetching
//!
//! This module handles every page request the crawler makes:
//! - Building the cookie-keeping HTTP client
//! - GET requests that follow redirects and return the final URL
//! - Status classification (non-2xx responses are errors)
//! - An in-memory page source for running the crawler without a network

use crate::config::UserAgentConfig;
use crate::HarvestError;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// A fetched page
#[derive(Debug, Clone)]
pub struct Page {
    /// Final URL after redirects
    pub url: Url,

    /// Page body
    pub body: String,
}

/// Anything the crawler can pull pages from
#[allow(async_fn_in_trait)]
pub trait PageSource {
    /// Fetches the page at `url`
    async fn fetch(&mut self, url: &Url) -> Result<Page, HarvestError>;
}

/// Builds an HTTP client with proper configuration
///
/// The client keeps cookies between requests, so a login performed with it
/// carries over to every later page fetch.
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .cookie_store(true)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// GETs a URL and returns the final URL and body
///
/// Redirects are followed by the client. Any non-success status ends in
/// `HarvestError::HttpStatus`.
pub async fn fetch_page(client: &Client, url: &Url) -> Result<Page, HarvestError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| HarvestError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    let final_url = response.url().clone();

    if !status.is_success() {
        return Err(HarvestError::HttpStatus {
            url: final_url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|source| HarvestError::Http {
            url: final_url.to_string(),
            source,
        })?;

    tracing::debug!("GET {} -> {} ({} bytes)", url, status.as_u16(), body.len());

    Ok(Page {
        url: final_url,
        body,
    })
}

/// Page source backed by an authenticated HTTP client
pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl PageSource for HttpPageSource {
    async fn fetch(&mut self, url: &Url) -> Result<Page, HarvestError> {
        fetch_page(&self.client, url).await
    }
}

/// Page source serving fixed bodies from memory
///
/// Unknown URLs answer like a 404. Every requested URL is recorded in order.
#[derive(Debug, Clone, Default)]
pub struct StaticPageSource {
    pages: HashMap<String, String>,
    requested: Vec<Url>,
}

impl StaticPageSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a page body served at `url`
    pub fn with_page(mut self, url: &Url, body: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), body.into());
        self
    }

    /// URLs fetched so far, in request order
    pub fn requested(&self) -> &[Url] {
        &self.requested
    }
}

impl PageSource for StaticPageSource {
    async fn fetch(&mut self, url: &Url) -> Result<Page, HarvestError> {
        self.requested.push(url.clone());
        match self.pages.get(url.as_str()) {
            Some(body) => Ok(Page {
                url: url.clone(),
                body: body.clone(),
            }),
            None => Err(HarvestError::HttpStatus {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

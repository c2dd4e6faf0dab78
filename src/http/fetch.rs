use async_trait::async_trait;
use reqwest::{Client, redirect::Policy};
use std::collections::HashMap;

use crate::constants::{DEFAULT_REDIRECT_LIMIT, USER_AGENT};
use crate::error::{FaviconError, Result};

/// A successfully retrieved resource.
#[derive(Debug, Clone)]
pub struct Fetched {
    /// Final URL after redirects.
    pub url: String,
    pub status: u16,
    /// `Content-Type` header, when the transport knows it.
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Retrieves resources for the finder.
///
/// Implementations must report any status >= 300 as an error; timeouts,
/// proxies and retries are theirs to configure.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Fetched>;
}

/// [`Fetch`] over a reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(Policy::limited(DEFAULT_REDIRECT_LIMIT))
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Fetched> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FaviconError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = resp.status().as_u16();
        if status > 299 {
            return Err(FaviconError::Status {
                url: url.to_string(),
                status,
            });
        }

        let final_url = resp.url().to_string();
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp
            .bytes()
            .await
            .map_err(|source| FaviconError::Request {
                url: url.to_string(),
                source,
            })?;

        Ok(Fetched {
            url: final_url,
            status,
            content_type,
            body: body.to_vec(),
        })
    }
}

/// Serves bodies from memory; unknown URLs answer 404.
///
/// Useful for discovery over pages that were fetched elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    resources: HashMap<String, Vec<u8>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.insert(url, body);
        self
    }

    pub fn insert(&mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.resources.insert(url.into(), body.into());
    }
}

#[async_trait]
impl Fetch for MemoryFetcher {
    async fn fetch(&self, url: &str) -> Result<Fetched> {
        match self.resources.get(url) {
            Some(body) => Ok(Fetched {
                url: url.to_string(),
                status: 200,
                content_type: None,
                body: body.clone(),
            }),
            None => Err(FaviconError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

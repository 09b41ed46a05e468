//! PokeAPI Client
//!
//! Every request goes through [`PokeApiClient::fetch`], which consults the
//! response cache by full URL before touching the network and stores raw
//! bodies of successful responses afterwards.

use std::time::Duration;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::cache::ResponseCache;
use crate::config::Config;
use crate::error::{PokedexError, Result};
use crate::models::{LocationArea, LocationAreaPage, Pokemon};

/// PokeAPI client with an injected response cache.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: String,
    cache: ResponseCache,
}

impl PokeApiClient {
    // == Constructor ==
    /// Creates a client rooted at `base_url` (no trailing slash).
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        cache: ResponseCache,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pokedex/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache,
        })
    }

    /// Creates a client from configuration.
    pub fn from_config(config: &Config, cache: ResponseCache) -> Result<Self> {
        Self::new(config.base_url.clone(), config.http_timeout(), cache)
    }

    // == Fetch ==
    /// Returns the body at `url`, from the cache when possible.
    ///
    /// Only complete bodies of 2xx responses are cached. A non-success status
    /// becomes [`PokedexError::Status`] and leaves the cache untouched.
    pub async fn fetch(&self, url: &str) -> Result<Bytes> {
        if let Some(body) = self.cache.get(url) {
            debug!(url, "Cache hit");
            return Ok(body);
        }
        debug!(url, "Cache miss, fetching");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            warn!(url, status = status.as_u16(), "PokeAPI request failed");
            return Err(PokedexError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        self.cache.add(url, body.clone());
        Ok(body)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.fetch(url).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    // == Location Areas ==
    /// Fetches a page of location areas.
    ///
    /// `page_url` is a `next`/`previous` link from an earlier page; `None`
    /// requests the first page.
    pub async fn location_areas(&self, page_url: Option<&str>) -> Result<LocationAreaPage> {
        match page_url {
            Some(url) => self.fetch_json(url).await,
            None => self.fetch_json(&self.location_area_url("")).await,
        }
    }

    /// Fetches one location area with its Pokemon encounters.
    pub async fn location_area(&self, name: &str) -> Result<LocationArea> {
        self.fetch_json(&self.location_area_url(name)).await
    }

    // == Pokemon ==
    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        self.fetch_json(&format!("{}/pokemon/{}", self.base_url, name))
            .await
    }

    fn location_area_url(&self, name: &str) -> String {
        format!("{}/location-area/{}", self.base_url, name)
    }
}

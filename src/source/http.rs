//! HTTP item source
//!
//! This module reads items from the Hacker News API over HTTP, including:
//! - Building the HTTP client with the configured user agent and timeouts
//! - Decoding item and listing JSON
//! - Error classification (timeouts, connect failures, bad status, bad JSON)

use crate::config::Config;
use crate::item::{Item, ItemId, ListingKind};
use crate::source::ItemSource;
use crate::{FetchError, HnError};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The full configuration (user agent and timeouts are read)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.client.user_agent())
        .timeout(Duration::from_secs(config.api.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.api.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Item source backed by the Hacker News HTTP API
///
/// `reqwest::Client` is internally reference counted, so one source is shared
/// by every concurrent fetch.
#[derive(Debug, Clone)]
pub struct HttpItemSource {
    client: Client,
    base_url: String,
}

impl HttpItemSource {
    /// Creates a source from an existing client and API root
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Creates a source with a client built from the configuration
    pub fn from_config(config: &Config) -> Result<Self, HnError> {
        let client = build_http_client(config)?;
        Ok(Self::new(client, &config.api.base_url))
    }

    /// Returns the URL of an item document
    pub fn item_url(&self, id: ItemId) -> String {
        format!("{}/v0/item/{}.json", self.base_url, id)
    }

    /// Returns the URL of a listing document
    pub fn listing_url(&self, kind: ListingKind) -> String {
        format!("{}/{}", self.base_url, kind.endpoint())
    }

    /// Sends a GET request and decodes the JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| classify_error(url, e))?;

        serde_json::from_slice(&body).map_err(|e| FetchError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl ItemSource for HttpItemSource {
    async fn fetch_item(&self, id: ItemId) -> Result<Item, FetchError> {
        let url = self.item_url(id);
        tracing::trace!("GET {}", url);

        // The API answers `null` for ids it does not know
        let item: Option<Item> = self.get_json(&url).await?;
        item.ok_or(FetchError::NotFound)
    }

    async fn fetch_listing(&self, kind: ListingKind) -> Result<Vec<ItemId>, FetchError> {
        let url = self.listing_url(kind);
        tracing::trace!("GET {}", url);
        self.get_json(&url).await
    }
}

/// Classifies a transport error the way it should be reported
fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Connect {
            url: url.to_string(),
        }
    } else {
        FetchError::Request(error)
    }
}

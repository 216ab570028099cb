//! HTTP fetch helper shared by every upstream call.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use steamstat_common::{Result, SteamStatError};
use tracing::{debug, instrument, warn};

/// Performs one GET request and returns the parsed JSON body.
///
/// Implementations return `Ok(None)` for a non-success HTTP status and
/// `Err` for transport failures or an undecodable body.
#[async_trait]
pub trait HttpFetch: Send + Sync {
    /// Issues a GET to `url` with the given query parameters.
    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Option<Value>>;
}

/// [`HttpFetch`] backed by one shared, pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// Builds a fetcher whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("steamstat-bot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SteamStatError::network_with_source("Failed to create HTTP client", e))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetcher {
    // The query is skipped: it carries the API key.
    #[instrument(skip_all, fields(url = %url))]
    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Option<Value>> {
        debug!("Sending request with {} parameters", query.len());

        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Upstream returned non-success status");
            return Ok(None);
        }

        let body = response
            .text()
            .await
            .map_err(|e| SteamStatError::network_with_source("Failed to read response body", e))?;

        Ok(Some(serde_json::from_str(&body)?))
    }
}

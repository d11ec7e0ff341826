//! HTTP client for the LegiSight proxy's three matter endpoints.

use async_trait::async_trait;
use legisight_core::{Matter, MatterHistoryEntry};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("proxy returned {status}: {body}")]
    Server { status: u16, body: String },
}

/// The data the dashboard needs, whatever serves it.
#[async_trait]
pub trait MattersApi: Send + Sync {
    /// Matters introduced in the trailing six-month window, newest first.
    async fn recent_matters(&self) -> Result<Vec<Matter>, ClientError>;

    /// Matters matching an upstream `$filter` expression.
    async fn filtered_matters(&self, filter: &str) -> Result<Vec<Matter>, ClientError>;

    /// History records of one matter, in upstream order.
    async fn matter_history(&self, matter_id: i64) -> Result<Vec<MatterHistoryEntry>, ClientError>;
}

/// Client for a running `legisight serve` instance.
pub struct ProxyClient {
    client: reqwest::Client,
    base_url: String,
}

impl ProxyClient {
    /// `base_url` should be like `http://localhost:3001` (no trailing slash).
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        info!(url = %url, "requesting from proxy");

        let resp = self.client.get(&url).query(query).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Server {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp.json().await?)
    }
}

#[async_trait]
impl MattersApi for ProxyClient {
    async fn recent_matters(&self) -> Result<Vec<Matter>, ClientError> {
        let matters: Vec<Matter> = self.get_json("/proxy/matters", &[]).await?;
        info!(count = matters.len(), "fetched recent matters");
        Ok(matters)
    }

    async fn filtered_matters(&self, filter: &str) -> Result<Vec<Matter>, ClientError> {
        let matters: Vec<Matter> = self
            .get_json("/proxy/filtered-matters", &[("filter", filter)])
            .await?;
        info!(count = matters.len(), "fetched filtered matters");
        Ok(matters)
    }

    async fn matter_history(&self, matter_id: i64) -> Result<Vec<MatterHistoryEntry>, ClientError> {
        let path = format!("/proxy/matterhistory/{matter_id}");
        let history: Vec<MatterHistoryEntry> = self.get_json(&path, &[]).await?;
        info!(matter_id, count = history.len(), "fetched matter history");
        Ok(history)
    }
}

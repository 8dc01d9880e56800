//! HTTP Page Fetcher

use async_trait::async_trait;
use tracing::info;

use crate::error::Result;
use crate::instrument::Operation;

// == Http Fetcher ==
/// Fetches a page body with a plain GET request.
///
/// Non-success statuses are not errors; their body is returned like any
/// other.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses an already configured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Operation for HttpFetcher {
    type Input = String;
    type Output = String;

    fn name(&self) -> &str {
        "get_page"
    }

    async fn call(&self, url: String) -> Result<String> {
        let response = self.client.get(&url).send().await?;
        info!(url = %url, status = %response.status(), "Fetched page");
        Ok(response.text().await?)
    }
}

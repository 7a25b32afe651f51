use crate::core::CatalogSource;
use crate::utils::error::{Result, ShopError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Fetches the catalog text over HTTP.
pub struct RemoteCatalogSource {
    url: String,
    client: Client,
}

impl RemoteCatalogSource {
    pub fn new(url: impl Into<String>, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl CatalogSource for RemoteCatalogSource {
    fn describe(&self) -> String {
        format!("url {}", self.url)
    }

    async fn fetch(&self) -> Result<String> {
        tracing::debug!("Requesting catalog from: {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        tracing::debug!("Catalog response status: {}", status);

        if !status.is_success() {
            return Err(ShopError::CatalogError {
                message: format!("{} answered with status {}", self.url, status),
            });
        }

        Ok(response.text().await?)
    }
}

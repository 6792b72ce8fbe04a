use crate::feed::model::ProductRecord;
use crate::utils::{FeedConfig, Result, ScoutError};
use reqwest::Client;
use std::time::Duration;

pub struct FeedClient {
    client: Client,
    url: String,
}

impl FeedClient {
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    /// Downloads the whole product feed. Any failure here is fatal to the run.
    pub async fn fetch(&self) -> Result<Vec<ProductRecord>> {
        tracing::info!(url = %self.url, "Fetching product feed");

        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ScoutError::Feed(format!(
                "feed returned {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let body = response.text().await?;
        let records: Vec<ProductRecord> = serde_json::from_str(&body)
            .map_err(|e| ScoutError::Feed(format!("undecodable feed body: {}", e)))?;

        tracing::info!(records = records.len(), "Product feed loaded");
        Ok(records)
    }
}

use crate::utils::{Result, ScoutError, TranslationConfig};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value as JsonValue;
use std::time::Duration;

/// Text translation with fixed source and target languages.
#[async_trait]
pub trait Translate: Send + Sync {
    async fn translate(&self, text: &str) -> Result<String>;
}

/// Client for the public Google Translate endpoint.
pub struct GoogleTranslateClient {
    client: Client,
    endpoint: String,
    source_lang: String,
    target_lang: String,
}

impl GoogleTranslateClient {
    pub fn new(config: &TranslationConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            source_lang: config.source_lang.clone(),
            target_lang: config.target_lang.clone(),
        })
    }

    async fn call_api(&self, text: &str) -> Result<JsonValue> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", self.source_lang.as_str()),
                ("tl", self.target_lang.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ScoutError::Translation(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl Translate for GoogleTranslateClient {
    async fn translate(&self, text: &str) -> Result<String> {
        let response = self.call_api(text).await?;
        parse_translation_response(&response)
    }
}

/// The response is a nested array; the first element lists sentence pieces
/// whose first item is the translated text.
fn parse_translation_response(response: &JsonValue) -> Result<String> {
    let sentences = response
        .get(0)
        .and_then(JsonValue::as_array)
        .ok_or_else(|| ScoutError::Translation("No sentences in response".to_string()))?;

    let translated: String = sentences
        .iter()
        .filter_map(|sentence| sentence.get(0).and_then(JsonValue::as_str))
        .collect();

    if translated.is_empty() {
        return Err(ScoutError::Translation(
            "No text content in response".to_string(),
        ));
    }

    Ok(translated)
}

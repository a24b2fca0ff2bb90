//! Client for the Gemini `generateContent` REST endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::{json, Value};

use crate::error::CuratorError;
use crate::TextGenerator;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";

pub struct GeminiClient {
    client: Client,
    api_key: String,
    endpoint: Url,
}

impl GeminiClient {
    /// # Errors
    ///
    /// Returns [`CuratorError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, CuratorError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Point the client at a different host, e.g. a wiremock server.
    ///
    /// # Errors
    ///
    /// Returns [`CuratorError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`CuratorError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, CuratorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("talkdb/0.1 (topic-curator)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(&format!("v1beta/models/{model}:generateContent")))
            .map_err(|e| CuratorError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
        })
    }

    fn request_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("key", &self.api_key);
        url
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, CuratorError> {
        let payload = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .client
            .post(self.request_url())
            .json(&payload)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(ToOwned::to_owned))
                .unwrap_or(body);
            return Err(CuratorError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let value: Value = serde_json::from_str(&body).map_err(|e| CuratorError::Deserialize {
            context: "generateContent".to_string(),
            source: e,
        })?;
        extract_text(&value)
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(value: &Value) -> Result<String, CuratorError> {
    if let Some(error) = value.get("error") {
        return Err(CuratorError::Api {
            status: 200,
            message: error["message"]
                .as_str()
                .unwrap_or("unknown error")
                .to_string(),
        });
    }

    let text: String = value["candidates"][0]["content"]["parts"]
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part["text"].as_str())
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(CuratorError::EmptyResponse);
    }
    Ok(text)
}

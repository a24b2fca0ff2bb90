//! HTTP client for the Naver news search API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::NewsError;
use crate::{NewsSearch, RawNewsItem};

const DEFAULT_BASE_URL: &str = "https://openapi.naver.com/";
const SEARCH_PATH: &str = "v1/search/news.json";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<RawNewsItem>,
}

/// Client for `GET /v1/search/news.json`.
///
/// Use [`NaverNewsClient::with_base_url`] to point at a mock server in tests.
pub struct NaverNewsClient {
    client: Client,
    client_id: String,
    client_secret: String,
    endpoint: Url,
}

impl NaverNewsClient {
    /// # Errors
    ///
    /// Returns [`NewsError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        client_id: &str,
        client_secret: &str,
        timeout_secs: u64,
    ) -> Result<Self, NewsError> {
        Self::with_base_url(client_id, client_secret, timeout_secs, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`NewsError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`NewsError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        client_id: &str,
        client_secret: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, NewsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("talkdb/0.1 (news-collector)")
            .build()?;

        // A single trailing slash keeps `join` appending instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(SEARCH_PATH))
            .map_err(|e| NewsError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            client_id: client_id.to_owned(),
            client_secret: client_secret.to_owned(),
            endpoint,
        })
    }

    fn build_url(&self, query: &str, display: u32) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("display", &display.to_string())
            .append_pair("sort", "date")
            .append_pair("start", "1");
        url
    }
}

#[async_trait]
impl NewsSearch for NaverNewsClient {
    async fn search(&self, query: &str, display: u32) -> Result<Vec<RawNewsItem>, NewsError> {
        let url = self.build_url(query, display);
        let response = self
            .client
            .get(url)
            .header("X-Naver-Client-Id", &self.client_id)
            .header("X-Naver-Client-Secret", &self.client_secret)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;

        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| NewsError::Deserialize {
                context: format!("news search(query={query})"),
                source: e,
            })?;
        Ok(parsed.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> NaverNewsClient {
        NaverNewsClient::with_base_url("id", "secret", 30, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_targets_search_endpoint() {
        let client = test_client("https://openapi.naver.com");
        let url = client.build_url("hello", 3);
        assert_eq!(
            url.as_str(),
            "https://openapi.naver.com/v1/search/news.json?query=hello&display=3&sort=date&start=1"
        );
    }

    #[test]
    fn build_url_tolerates_trailing_slash() {
        let client = test_client("http://127.0.0.1:9999/");
        let url = client.build_url("q", 1);
        assert!(url
            .as_str()
            .starts_with("http://127.0.0.1:9999/v1/search/news.json?"));
    }

    #[test]
    fn build_url_encodes_hangul_query() {
        let client = test_client("https://openapi.naver.com");
        let url = client.build_url("맛집", 3);
        assert!(
            url.as_str().contains("query=%EB%A7%9B%EC%A7%91"),
            "query should be percent-encoded: {url}"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = NaverNewsClient::with_base_url("id", "secret", 30, "not a url");
        assert!(matches!(result, Err(NewsError::InvalidBaseUrl { .. })));
    }
}

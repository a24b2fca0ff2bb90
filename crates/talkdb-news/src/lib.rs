//! News-search ingestion: the Naver search client, text cleanup helpers and
//! the collector that turns many small searches into one deduplicated list.

pub mod clean;
pub mod client;
pub mod collector;
pub mod error;

use async_trait::async_trait;
use serde::Deserialize;

pub use client::NaverNewsClient;
pub use collector::{collect_news, CollectionReport, CollectorSettings, SEARCH_QUERIES};
pub use error::NewsError;

/// One search hit as returned by the upstream API, before cleaning.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawNewsItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
    #[serde(default, rename = "originallink")]
    pub original_link: String,
    #[serde(default, rename = "pubDate")]
    pub pub_date: String,
}

/// Keyword search over a news source, newest first.
#[async_trait]
pub trait NewsSearch: Send + Sync {
    /// Return up to `display` items for `query`.
    async fn search(&self, query: &str, display: u32) -> Result<Vec<RawNewsItem>, NewsError>;
}

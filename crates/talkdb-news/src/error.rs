use thiserror::Error;

/// Errors returned by the news-search client.
#[derive(Debug, Error)]
pub enum NewsError {
    /// Network failure, timeout, or a non-2xx status from the search API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not match the expected search-result shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

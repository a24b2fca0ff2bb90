use talkdb_core::StoreError;
use talkdb_news::NewsError;
use thiserror::Error;

/// Errors from the generative-text client.
#[derive(Debug, Error)]
pub enum CuratorError {
    /// Network failure or timeout talking to the model API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The model API answered with an error payload or a non-2xx status.
    #[error("model API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The response carried no candidate text.
    #[error("model returned no text")]
    EmptyResponse,

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Step-level failures that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no news collected")]
    NoNewsCollected,

    #[error("persistence failed: {0}")]
    Store(#[from] StoreError),
}

/// Failure to build the live clients for a pipeline run.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("news client: {0}")]
    News(#[from] NewsError),

    #[error("model client: {0}")]
    Model(#[from] CuratorError),
}

//! Turns collected headlines into curated conversation topics: the Gemini
//! adapter, response parsing, batch classification and the daily pipeline.

pub mod blocklist;
pub mod classifier;
pub mod error;
pub mod fallback;
pub mod gemini;
pub mod parse;
pub mod pipeline;
pub mod prompt;
pub mod runner;

use async_trait::async_trait;

pub use classifier::{
    classify_news, BatchOutcome, BatchReport, ClassificationReport, ClassifierSettings,
};
pub use error::{CuratorError, PipelineError, SetupError};
pub use gemini::GeminiClient;
pub use parse::{parse_ai_response, CandidateTopic, ParseOutcome};
pub use pipeline::{run_daily_update, PipelineSettings, RunMode, RunSummary};
pub use runner::DailyUpdate;

/// Single-prompt text generation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, CuratorError>;
}

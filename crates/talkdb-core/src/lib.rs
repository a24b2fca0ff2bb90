mod app_config;
mod config;
pub mod elements;
pub mod keywords;
pub mod store;
pub mod talks;

pub use app_config::{AppConfig, Environment, PipelineCredentials};
pub use config::{load_app_config, load_app_config_from_env, DEV_CRON_SECRET};
pub use store::{StoreError, TalkStore};
pub use talks::{
    AgeGroup, Category, CronStatus, NewCronLog, NewTalk, NewsItem, Situation, TalkFilter,
    NEWS_SOURCE,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid {kind}: {value}")]
    InvalidTag { kind: &'static str, value: String },
    #[error("team analysis needs at least 2 members, got {0}")]
    TooFewMembers(usize),
}

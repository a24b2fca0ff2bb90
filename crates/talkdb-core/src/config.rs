use std::fmt::Display;
use std::str::FromStr;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Cron secret accepted in development when `TALKDB_CRON_SECRET` is unset.
pub const DEV_CRON_SECRET: &str = "dev-secret-12345";

/// Read `.env` (if present) and then the process environment into an [`AppConfig`].
///
/// # Errors
///
/// Returns `ConfigError` when a required variable is absent or a value fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Same as [`load_app_config`] but skips `.env`; the binaries call this
/// after loading `.env` themselves.
///
/// # Errors
///
/// Returns `ConfigError` when a required variable is absent or a value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

// Parsing is driven by a lookup closure so tests can feed a HashMap.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let database_url = require("DATABASE_URL")?;
    let env = parse_environment(&or_default("TALKDB_ENV", "development"));

    let cron_secret = match optional("TALKDB_CRON_SECRET") {
        Some(secret) => secret,
        None if env == Environment::Development => DEV_CRON_SECRET.to_string(),
        None => return Err(ConfigError::MissingEnvVar("TALKDB_CRON_SECRET".to_string())),
    };

    let bind_addr = parse_var(&lookup, "TALKDB_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("TALKDB_LOG_LEVEL", "info");

    let naver_client_id = optional("NAVER_CLIENT_ID");
    let naver_client_secret = optional("NAVER_CLIENT_SECRET");
    let gemini_api_key = optional("GEMINI_API_KEY");
    let gemini_model = or_default("TALKDB_GEMINI_MODEL", "gemini-1.5-flash");

    let db_max_connections = parse_var(&lookup, "TALKDB_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_var(&lookup, "TALKDB_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_var(&lookup, "TALKDB_DB_ACQUIRE_TIMEOUT_SECS", "10")?;
    let http_timeout_secs = parse_var(&lookup, "TALKDB_HTTP_TIMEOUT_SECS", "30")?;

    let pipeline_cron = or_default("TALKDB_PIPELINE_CRON", "0 0 0 * * *");

    let news_target_count = parse_var(&lookup, "TALKDB_NEWS_TARGET_COUNT", "100")?;
    let news_per_query = parse_var(&lookup, "TALKDB_NEWS_PER_QUERY", "3")?;
    let news_min_title_chars = parse_var(&lookup, "TALKDB_NEWS_MIN_TITLE_CHARS", "15")?;
    let news_query_delay_ms = parse_var(&lookup, "TALKDB_NEWS_QUERY_DELAY_MS", "150")?;
    let news_similarity_threshold: f64 =
        parse_var(&lookup, "TALKDB_NEWS_SIMILARITY_THRESHOLD", "0.7")?;
    if !(0.0..=1.0).contains(&news_similarity_threshold) {
        return Err(ConfigError::InvalidEnvVar {
            var: "TALKDB_NEWS_SIMILARITY_THRESHOLD".to_string(),
            reason: format!("must be within 0.0..=1.0, got {news_similarity_threshold}"),
        });
    }

    let ai_batch_size: usize = parse_var(&lookup, "TALKDB_AI_BATCH_SIZE", "5")?;
    if ai_batch_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "TALKDB_AI_BATCH_SIZE".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let ai_max_items = parse_var(&lookup, "TALKDB_AI_MAX_ITEMS", "50")?;
    let ai_batch_delay_ms = parse_var(&lookup, "TALKDB_AI_BATCH_DELAY_MS", "1500")?;

    let dedup_window_hours = parse_var(&lookup, "TALKDB_DEDUP_WINDOW_HOURS", "6")?;
    let fallback_limit = parse_var(&lookup, "TALKDB_FALLBACK_LIMIT", "10")?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        cron_secret,
        naver_client_id,
        naver_client_secret,
        gemini_api_key,
        gemini_model,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        http_timeout_secs,
        pipeline_cron,
        news_target_count,
        news_per_query,
        news_min_title_chars,
        news_query_delay_ms,
        news_similarity_threshold,
        ai_batch_size,
        ai_max_items,
        ai_batch_delay_ms,
        dedup_window_hours,
        fallback_limit,
    })
}

/// Read `var` (or `default` when unset) and parse it into `T`.
fn parse_var<T, F>(lookup: &F, var: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let raw = lookup(var).unwrap_or_else(|_| default.to_string());
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

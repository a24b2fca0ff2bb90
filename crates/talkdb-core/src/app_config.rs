use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub cron_secret: String,
    pub naver_client_id: Option<String>,
    pub naver_client_secret: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub http_timeout_secs: u64,
    pub pipeline_cron: String,
    pub news_target_count: usize,
    pub news_per_query: u32,
    pub news_min_title_chars: usize,
    pub news_query_delay_ms: u64,
    pub news_similarity_threshold: f64,
    pub ai_batch_size: usize,
    pub ai_max_items: usize,
    pub ai_batch_delay_ms: u64,
    pub dedup_window_hours: u32,
    pub fallback_limit: usize,
}

impl AppConfig {
    /// Naver client id/secret and Gemini key, when all three are configured.
    ///
    /// The ingestion pipeline cannot run without them; read endpoints can.
    #[must_use]
    pub fn pipeline_credentials(&self) -> Option<PipelineCredentials<'_>> {
        Some(PipelineCredentials {
            naver_client_id: self.naver_client_id.as_deref()?,
            naver_client_secret: self.naver_client_secret.as_deref()?,
            gemini_api_key: self.gemini_api_key.as_deref()?,
        })
    }
}

/// Borrowed view over the external-service credentials the pipeline needs.
#[derive(Clone, Copy)]
pub struct PipelineCredentials<'a> {
    pub naver_client_id: &'a str,
    pub naver_client_secret: &'a str,
    pub gemini_api_key: &'a str,
}

impl std::fmt::Debug for PipelineCredentials<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineCredentials")
            .field("naver_client_id", &self.naver_client_id)
            .field("naver_client_secret", &"[redacted]")
            .field("gemini_api_key", &"[redacted]")
            .finish()
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("cron_secret", &"[redacted]")
            .field("naver_client_id", &self.naver_client_id)
            .field(
                "naver_client_secret",
                &self.naver_client_secret.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("gemini_model", &self.gemini_model)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("pipeline_cron", &self.pipeline_cron)
            .field("news_target_count", &self.news_target_count)
            .field("news_per_query", &self.news_per_query)
            .field("news_min_title_chars", &self.news_min_title_chars)
            .field("news_query_delay_ms", &self.news_query_delay_ms)
            .field(
                "news_similarity_threshold",
                &self.news_similarity_threshold,
            )
            .field("ai_batch_size", &self.ai_batch_size)
            .field("ai_max_items", &self.ai_max_items)
            .field("ai_batch_delay_ms", &self.ai_batch_delay_ms)
            .field("dedup_window_hours", &self.dedup_window_hours)
            .field("fallback_limit", &self.fallback_limit)
            .finish()
    }
}

//! Live wiring of the daily update: search client, model client and settings
//! built from one [`AppConfig`].

use talkdb_core::{AppConfig, TalkStore};
use talkdb_news::NaverNewsClient;

use crate::error::{PipelineError, SetupError};
use crate::gemini::GeminiClient;
use crate::pipeline::{run_daily_update, PipelineSettings, RunSummary};

pub struct DailyUpdate {
    news: NaverNewsClient,
    generator: GeminiClient,
    settings: PipelineSettings,
}

impl DailyUpdate {
    /// `Ok(None)` when the search or model credentials are not configured.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] if either HTTP client cannot be constructed.
    pub fn from_app_config(config: &AppConfig) -> Result<Option<Self>, SetupError> {
        let Some(credentials) = config.pipeline_credentials() else {
            return Ok(None);
        };

        let news = NaverNewsClient::new(
            credentials.naver_client_id,
            credentials.naver_client_secret,
            config.http_timeout_secs,
        )?;
        let generator = GeminiClient::new(
            credentials.gemini_api_key,
            &config.gemini_model,
            config.http_timeout_secs,
        )?;

        Ok(Some(Self {
            news,
            generator,
            settings: PipelineSettings::from_app_config(config),
        }))
    }

    #[must_use]
    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Run one update against `store`; see [`run_daily_update`].
    ///
    /// # Errors
    ///
    /// Same as [`run_daily_update`].
    pub async fn run<S>(&self, store: &S) -> Result<RunSummary, PipelineError>
    where
        S: TalkStore + ?Sized,
    {
        run_daily_update(&self.news, &self.generator, store, &self.settings).await
    }
}

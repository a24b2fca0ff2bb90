//! The daily update bound to the server's Postgres pool.

use sqlx::PgPool;
use talkdb_core::AppConfig;
use talkdb_curator::{DailyUpdate, PipelineError, RunSummary};
use talkdb_db::PgTalkStore;

pub struct PipelineRunner {
    update: DailyUpdate,
}

impl PipelineRunner {
    /// `Ok(None)` when the search or model credentials are not configured.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be constructed.
    pub fn from_app_config(config: &AppConfig) -> anyhow::Result<Option<Self>> {
        Ok(DailyUpdate::from_app_config(config)?.map(|update| Self { update }))
    }

    pub async fn run(&self, pool: &PgPool) -> Result<RunSummary, PipelineError> {
        let store = PgTalkStore::new(pool.clone());
        self.update.run(&store).await
    }
}

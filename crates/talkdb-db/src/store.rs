//! Postgres-backed [`TalkStore`] used by the pipeline.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use talkdb_core::{NewCronLog, NewTalk, StoreError, TalkStore};

use crate::{cron_logs, talks, DbError};

#[derive(Debug, Clone)]
pub struct PgTalkStore {
    pool: PgPool,
}

impl PgTalkStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl From<DbError> for StoreError {
    fn from(e: DbError) -> Self {
        StoreError(e.to_string())
    }
}

#[async_trait]
impl TalkStore for PgTalkStore {
    async fn topics_created_since(&self, since: DateTime<Utc>) -> Result<Vec<String>, StoreError> {
        Ok(talks::list_topics_since(&self.pool, since).await?)
    }

    async fn insert_talks(&self, new_talks: &[NewTalk]) -> Result<usize, StoreError> {
        Ok(talks::insert_talks(&self.pool, new_talks).await?)
    }

    async fn append_cron_log(&self, log: &NewCronLog) -> Result<(), StoreError> {
        cron_logs::insert_cron_log(&self.pool, log).await?;
        Ok(())
    }
}

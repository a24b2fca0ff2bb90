//! Datastore seam used by the ingestion pipeline.
//!
//! The Postgres implementation lives in `talkdb-db`; pipeline tests use
//! in-memory fakes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::talks::{NewCronLog, NewTalk};

#[derive(Debug, Error)]
#[error("datastore error: {0}")]
pub struct StoreError(pub String);

#[async_trait]
pub trait TalkStore: Send + Sync {
    /// Topics of talks created at or after `since`, as stored.
    async fn topics_created_since(&self, since: DateTime<Utc>) -> Result<Vec<String>, StoreError>;

    /// Insert all talks in one statement and return how many rows were written.
    async fn insert_talks(&self, talks: &[NewTalk]) -> Result<usize, StoreError>;

    async fn append_cron_log(&self, log: &NewCronLog) -> Result<(), StoreError>;
}

//! Database operations for the append-only `cron_logs` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use talkdb_core::NewCronLog;

use crate::DbError;

/// A row from the `cron_logs` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CronLogRow {
    pub id: i64,
    pub run_at: DateTime<Utc>,
    pub status: String,
    pub error_message: Option<String>,
    pub news_collected: Option<i32>,
    pub topics_filtered: Option<i32>,
    pub topics_saved: Option<i32>,
    pub duration_ms: i64,
    pub created_at: DateTime<Utc>,
}

fn count_column(count: Option<usize>) -> Option<i32> {
    count.map(|n| i32::try_from(n).unwrap_or(i32::MAX))
}

/// Append one pipeline-run record.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_cron_log(pool: &PgPool, log: &NewCronLog) -> Result<CronLogRow, DbError> {
    let row = sqlx::query_as::<_, CronLogRow>(
        "INSERT INTO cron_logs \
             (status, error_message, news_collected, topics_filtered, topics_saved, duration_ms) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING id, run_at, status, error_message, news_collected, topics_filtered, topics_saved, \
                   duration_ms, created_at",
    )
    .bind(log.status.as_str())
    .bind(log.error_message.as_deref())
    .bind(count_column(log.news_collected))
    .bind(count_column(log.topics_filtered))
    .bind(count_column(log.topics_saved))
    .bind(i64::try_from(log.duration_ms).unwrap_or(i64::MAX))
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Most recent runs first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_cron_logs(pool: &PgPool, limit: i64) -> Result<Vec<CronLogRow>, DbError> {
    let rows = sqlx::query_as::<_, CronLogRow>(
        "SELECT id, run_at, status, error_message, news_collected, topics_filtered, topics_saved, \
                duration_ms, created_at \
         FROM cron_logs \
         ORDER BY run_at DESC, id DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

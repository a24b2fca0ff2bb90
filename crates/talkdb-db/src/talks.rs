//! Database operations for the `talks` table.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use talkdb_core::{NewTalk, Situation, TalkFilter};
use uuid::Uuid;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `talks` table. Tag columns hold their wire strings.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TalkRow {
    pub id: Uuid,
    pub talk_topic: String,
    pub description: Option<String>,
    pub conversation_tip: Option<String>,
    pub category: String,
    pub situation: Vec<String>,
    pub age_group: String,
    pub source: String,
    pub source_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub is_verified: bool,
    pub report_count: i64,
    pub view_count: i64,
    pub share_count: i64,
    pub like_count: i64,
    pub created_at: DateTime<Utc>,
}

impl TalkRow {
    /// Apply a browsing filter to this row.
    ///
    /// Rows with tags outside the known sets only pass an empty filter.
    #[must_use]
    pub fn matches(&self, filter: &TalkFilter) -> bool {
        let (Ok(category), Ok(age_group)) = (self.category.parse(), self.age_group.parse())
        else {
            return *filter == TalkFilter::default();
        };
        let situations: Vec<Situation> = self
            .situation
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        filter.matches(category, &situations, age_group)
    }
}

const TALK_COLUMNS: &str = "id, talk_topic, description, conversation_tip, category, situation, \
     age_group, source, source_url, published_at, is_verified, report_count, view_count, \
     share_count, like_count, created_at";

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Most recent talks first, at most `limit` rows.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_recent_talks(pool: &PgPool, limit: i64) -> Result<Vec<TalkRow>, DbError> {
    let rows = sqlx::query_as::<_, TalkRow>(&format!(
        "SELECT {TALK_COLUMNS} FROM talks \
         ORDER BY created_at DESC, id \
         LIMIT $1"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Topics of talks created at or after `since`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_topics_since(
    pool: &PgPool,
    since: DateTime<Utc>,
) -> Result<Vec<String>, DbError> {
    let topics = sqlx::query_scalar::<_, String>(
        "SELECT talk_topic FROM talks WHERE created_at >= $1",
    )
    .bind(since)
    .fetch_all(pool)
    .await?;

    Ok(topics)
}

/// `(talk_topic, description)` of the most recent `limit` talks, for keyword extraction.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_keyword_sources(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<(String, Option<String>)>, DbError> {
    let rows = sqlx::query_as::<_, (String, Option<String>)>(
        "SELECT talk_topic, description FROM talks \
         ORDER BY created_at DESC, id \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Insert all `talks` in one statement. Returns the number of rows written.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails; no rows are written in that case.
pub async fn insert_talks(pool: &PgPool, talks: &[NewTalk]) -> Result<usize, DbError> {
    if talks.is_empty() {
        return Ok(0);
    }

    let mut builder = QueryBuilder::<Postgres>::new(
        "INSERT INTO talks \
             (id, talk_topic, description, conversation_tip, category, situation, age_group, \
              source, source_url, published_at, is_verified) ",
    );
    builder.push_values(talks, |mut row, talk| {
        let situations: Vec<String> = talk
            .situations
            .iter()
            .map(|s| s.as_str().to_string())
            .collect();
        row.push_bind(Uuid::new_v4())
            .push_bind(talk.talk_topic.clone())
            .push_bind(talk.description.clone())
            .push_bind(talk.conversation_tip.clone())
            .push_bind(talk.category.as_str())
            .push_bind(situations)
            .push_bind(talk.age_group.as_str())
            .push_bind(talk.source.clone())
            .push_bind(talk.source_url.clone())
            .push_bind(talk.published_at)
            .push_bind(talk.is_verified);
    });

    let result = builder.build().execute(pool).await?;
    Ok(usize::try_from(result.rows_affected()).unwrap_or(usize::MAX))
}

/// Atomically add one view and return the new count.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no talk has `id`, or [`DbError::Sqlx`]
/// if the update fails.
pub async fn increment_view_count(pool: &PgPool, id: Uuid) -> Result<i64, DbError> {
    sqlx::query_scalar::<_, i64>(
        "UPDATE talks SET view_count = view_count + 1 WHERE id = $1 RETURNING view_count",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)
}

/// Atomically add one like and return the new count.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no talk has `id`, or [`DbError::Sqlx`]
/// if the update fails.
pub async fn increment_like_count(pool: &PgPool, id: Uuid) -> Result<i64, DbError> {
    sqlx::query_scalar::<_, i64>(
        "UPDATE talks SET like_count = like_count + 1 WHERE id = $1 RETURNING like_count",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)
}

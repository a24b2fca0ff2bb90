use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use talkdb_core::TalkFilter;
use talkdb_db::TalkRow;
use uuid::Uuid;

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct TalksQuery {
    pub limit: Option<i64>,
    pub situation: Option<String>,
    pub age_group: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct TalkItem {
    id: Uuid,
    talk_topic: String,
    description: Option<String>,
    conversation_tip: Option<String>,
    category: String,
    situation: Vec<String>,
    age_group: String,
    source: String,
    source_url: Option<String>,
    published_at: Option<DateTime<Utc>>,
    is_verified: bool,
    view_count: i64,
    like_count: i64,
    created_at: DateTime<Utc>,
}

impl From<TalkRow> for TalkItem {
    fn from(row: TalkRow) -> Self {
        Self {
            id: row.id,
            talk_topic: row.talk_topic,
            description: row.description,
            conversation_tip: row.conversation_tip,
            category: row.category,
            situation: row.situation,
            age_group: row.age_group,
            source: row.source,
            source_url: row.source_url,
            published_at: row.published_at,
            is_verified: row.is_verified,
            view_count: row.view_count,
            like_count: row.like_count,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ViewCount {
    id: Uuid,
    view_count: i64,
}

#[derive(Debug, Serialize)]
pub(super) struct LikeCount {
    id: Uuid,
    like_count: i64,
}

/// Newest page of talks; the filter narrows that page rather than paging
/// through matches.
pub(super) async fn list_talks(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<TalksQuery>,
) -> Result<Json<ApiResponse<Vec<TalkItem>>>, ApiError> {
    let filter = TalkFilter::from_params(
        query.situation.as_deref(),
        query.age_group.as_deref(),
        query.category.as_deref(),
    )
    .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?;

    let rows = talkdb_db::list_recent_talks(&state.pool, normalize_limit(query.limit))
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .filter(|row| row.matches(&filter))
        .map(TalkItem::from)
        .collect();

    Ok(Json(ApiResponse::new(data, req_id.0)))
}

pub(super) async fn record_view(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ViewCount>>, ApiError> {
    let view_count = talkdb_db::increment_view_count(&state.pool, id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(ViewCount { id, view_count }, req_id.0)))
}

pub(super) async fn record_like(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<LikeCount>>, ApiError> {
    let like_count = talkdb_db::increment_like_count(&state.pool, id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    tracing::debug!(%id, like_count, "talk liked");
    Ok(Json(ApiResponse::new(LikeCount { id, like_count }, req_id.0)))
}

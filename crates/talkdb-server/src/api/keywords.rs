use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use talkdb_core::keywords::{extract_keywords, KeywordConfig, KeywordTag};

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct KeywordsQuery {
    pub limit: Option<i64>,
}

/// Number of recent talks scanned for the cloud.
fn source_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(100).clamp(1, 500)
}

pub(super) async fn keyword_cloud(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<KeywordsQuery>,
) -> Result<Json<ApiResponse<Vec<KeywordTag>>>, ApiError> {
    let sources = talkdb_db::list_keyword_sources(&state.pool, source_limit(query.limit))
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let tags = extract_keywords(
        sources
            .iter()
            .map(|(topic, description)| (topic.as_str(), description.as_deref())),
        &KeywordConfig::default(),
    );

    Ok(Json(ApiResponse::new(tags, req_id.0)))
}

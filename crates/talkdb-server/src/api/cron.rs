use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use talkdb_core::{CronStatus, NewCronLog};
use talkdb_curator::RunSummary;
use talkdb_db::CronLogRow;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct CronLogsQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(super) struct CronLogItem {
    id: i64,
    run_at: DateTime<Utc>,
    status: String,
    error_message: Option<String>,
    news_collected: Option<i32>,
    topics_filtered: Option<i32>,
    topics_saved: Option<i32>,
    duration_ms: i64,
    created_at: DateTime<Utc>,
}

impl From<CronLogRow> for CronLogItem {
    fn from(row: CronLogRow) -> Self {
        Self {
            id: row.id,
            run_at: row.run_at,
            status: row.status,
            error_message: row.error_message,
            news_collected: row.news_collected,
            topics_filtered: row.topics_filtered,
            topics_saved: row.topics_saved,
            duration_ms: row.duration_ms,
            created_at: row.created_at,
        }
    }
}

const UNCONFIGURED: &str = "pipeline credentials are not configured";

fn logs_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(20).clamp(1, 100)
}

/// Run the daily update inline and report its summary. Every call appends
/// one cron-log row, including calls made without pipeline credentials.
pub(super) async fn daily_update(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<RunSummary>>, ApiError> {
    let Some(runner) = state.pipeline.as_ref() else {
        let log = NewCronLog {
            status: CronStatus::Error,
            error_message: Some(UNCONFIGURED.to_string()),
            news_collected: None,
            topics_filtered: None,
            topics_saved: None,
            duration_ms: 0,
        };
        if let Err(e) = talkdb_db::insert_cron_log(&state.pool, &log).await {
            tracing::warn!(error = %e, "failed to write cron log");
        }
        return Err(ApiError::new(req_id.0, "service_unavailable", UNCONFIGURED));
    };

    tracing::info!(request_id = %req_id.0, "daily update triggered over http");
    match runner.run(&state.pool).await {
        Ok(summary) => Ok(Json(ApiResponse::new(summary, req_id.0))),
        Err(e) => Err(ApiError::new(req_id.0, "pipeline_failed", e.to_string())),
    }
}

pub(super) async fn list_cron_logs(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<CronLogsQuery>,
) -> Result<Json<ApiResponse<Vec<CronLogItem>>>, ApiError> {
    let rows = talkdb_db::list_cron_logs(&state.pool, logs_limit(query.limit))
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows.into_iter().map(CronLogItem::from).collect();
    Ok(Json(ApiResponse::new(data, req_id.0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logs_limit_defaults_and_bounds() {
        assert_eq!(logs_limit(None), 20);
        assert_eq!(logs_limit(Some(-5)), 1);
        assert_eq!(logs_limit(Some(500)), 100);
    }

    #[test]
    fn cron_log_item_keeps_missing_counts_as_null() {
        let item = CronLogItem::from(CronLogRow {
            id: 7,
            run_at: Utc::now(),
            status: "error".to_string(),
            error_message: Some("no news collected".to_string()),
            news_collected: None,
            topics_filtered: None,
            topics_saved: None,
            duration_ms: 812,
            created_at: Utc::now(),
        });
        let json = serde_json::to_value(&item).expect("serialize CronLogItem");
        assert_eq!(json["status"], "error");
        assert!(json["topics_saved"].is_null());
        assert_eq!(json["duration_ms"], 812);
        assert!(json["run_at"].is_string());
    }
}

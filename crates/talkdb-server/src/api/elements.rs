use axum::{Extension, Json};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use talkdb_core::elements::{analyze_team, MemberProfile, TeamAnalysis};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse};

#[derive(Debug, Deserialize)]
pub(super) struct TeamRequest {
    pub members: Vec<MemberInput>,
}

#[derive(Debug, Deserialize)]
pub(super) struct MemberInput {
    pub name: String,
    /// `YYYY-MM-DD`
    pub birth_date: String,
    /// `HH:MM`
    pub birth_time: Option<String>,
}

fn parse_member(input: &MemberInput) -> Result<MemberProfile, String> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err("member name must not be empty".to_string());
    }
    let birth_date = NaiveDate::parse_from_str(input.birth_date.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid birth_date for {name}: {}", input.birth_date))?;
    let birth_time = input
        .birth_time
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| {
            NaiveTime::parse_from_str(t, "%H:%M")
                .map_err(|_| format!("invalid birth_time for {name}: {t}"))
        })
        .transpose()?;

    Ok(MemberProfile {
        name: name.to_string(),
        birth_date,
        birth_time,
    })
}

pub(super) async fn team_analysis(
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<TeamRequest>,
) -> Result<Json<ApiResponse<TeamAnalysis>>, ApiError> {
    let members = body
        .members
        .iter()
        .map(parse_member)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|message| ApiError::new(req_id.0.clone(), "validation_error", message))?;

    let analysis = analyze_team(&members)
        .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?;

    Ok(Json(ApiResponse::new(analysis, req_id.0)))
}

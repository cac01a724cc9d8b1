//! Axum route handlers for resume parsing.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interpreter::parse_resume;
use crate::models::resume::ResumeRecord;
use crate::state::AppState;
use crate::store;

#[derive(Debug, Deserialize)]
pub struct ParseResumeRequest {
    pub user_id: Uuid,
    pub resume_url: String,
}

#[derive(Debug, Serialize)]
pub struct ParseResumeResponse {
    pub record: ResumeRecord,
}

/// POST /api/v1/resume/parse
///
/// Fetches the uploaded resume document, parses it into a structured record,
/// and persists the record on the user's profile. A fetch or decode failure
/// propagates as `DocumentUnavailable`; nothing is written in that case.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    Json(request): Json<ParseResumeRequest>,
) -> Result<Json<ParseResumeResponse>, AppError> {
    if request.resume_url.trim().is_empty() {
        return Err(AppError::Validation("resume_url cannot be empty".to_string()));
    }

    let text = state.fetcher.fetch_text(&request.resume_url).await?;
    let record = parse_resume(&text, &state.dictionaries.skills);

    info!(
        user_id = %request.user_id,
        skills = record.skills.len(),
        experience = record.experience.len(),
        education = record.education.len(),
        "Parsed resume"
    );

    store::save_parsed_resume(&state.db, request.user_id, &record).await?;

    Ok(Json(ParseResumeResponse { record }))
}

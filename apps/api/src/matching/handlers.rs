//! Axum route handlers for job matching.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::{score_jobs, JobMatch, MatchPreferences, MatchWeights};
use crate::state::AppState;
use crate::store;

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub user_id: Uuid,
    /// Overrides the preferences stored on the profile when present.
    pub preferences: Option<MatchPreferences>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub matches: Vec<JobMatch>,
}

/// POST /api/v1/matches
///
/// Scores the user's parsed resume against the full job catalog and returns
/// the ranked matches. The result is also persisted on the profile so the
/// dashboard can re-render it without re-scoring. A catalog read failure is
/// fatal here (`CatalogUnavailable`) — unlike the recommender, which
/// tolerates an absent catalog.
pub async fn handle_match_jobs(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let profile = store::fetch_profile(&state.db, request.user_id).await?;

    let resume = profile
        .parsed_resume
        .as_ref()
        .map(|r| &r.0)
        .ok_or_else(|| {
            AppError::Validation("profile has no parsed resume; upload a resume first".to_string())
        })?;

    let jobs = store::fetch_jobs(&state.db).await?;

    let preferences = request
        .preferences
        .or_else(|| profile.job_preferences.as_ref().map(|p| (&p.0).into()));

    let matches = score_jobs(
        resume,
        &jobs,
        preferences.as_ref(),
        &MatchWeights::default(),
    );

    info!(
        user_id = %request.user_id,
        jobs = jobs.len(),
        "Scored job matches"
    );

    store::save_job_matches(&state.db, request.user_id, &matches).await?;

    Ok(Json(MatchResponse { matches }))
}

//! Axum route handlers for skill recommendations and progress insights.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::recommender::{recommend_skills, skill_insights, SkillInsight, SkillRecommendation};
use crate::state::AppState;
use crate::store;

const DEFAULT_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
pub struct RecommendationParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<SkillRecommendation>,
}

#[derive(Debug, Serialize)]
pub struct InsightResponse {
    pub insights: Vec<SkillInsight>,
}

/// GET /api/v1/recommendations/:user_id?limit=
///
/// Ranked skill-gap recommendations for the user. A catalog read failure is
/// tolerated here: the recommender runs against an empty catalog and returns
/// an empty list rather than erroring (intentional asymmetry with matching).
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<RecommendationParams>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let profile = store::fetch_profile(&state.db, user_id).await?;

    let jobs = match store::fetch_jobs(&state.db).await {
        Ok(jobs) => jobs,
        Err(e) => {
            warn!("Job catalog unavailable for recommendations, treating as empty: {e}");
            Vec::new()
        }
    };

    let recommendations = recommend_skills(
        profile.current_skills(),
        profile.target_roles(),
        &jobs,
        &state.dictionaries.catalog,
        params.limit.unwrap_or(DEFAULT_LIMIT),
    );

    Ok(Json(RecommendationResponse { recommendations }))
}

/// GET /api/v1/insights/:user_id
///
/// Learning-velocity insights derived from skill assessments and career
/// progression history.
pub async fn handle_insights(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<InsightResponse>, AppError> {
    let profile = store::fetch_profile(&state.db, user_id).await?;

    let insights = skill_insights(profile.assessments(), profile.progression(), Utc::now());

    Ok(Json(InsightResponse { insights }))
}

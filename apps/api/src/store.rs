//! Database access for profiles and the job catalog.
//!
//! Plain query functions over the shared pool. Catalog reads map their error
//! to `CatalogUnavailable` so callers can choose between propagating it (the
//! matcher) and degrading to an empty catalog (the recommender).

use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::JobMatch;
use crate::models::job::JobRow;
use crate::models::profile::ProfileRow;
use crate::models::resume::ResumeRecord;

/// Reads the full job catalog snapshot.
pub async fn fetch_jobs(pool: &PgPool) -> Result<Vec<JobRow>, AppError> {
    sqlx::query_as::<_, JobRow>(
        "SELECT id, title, company, description, required_skills, location, salary_range, \
         created_at, updated_at \
         FROM jobs ORDER BY created_at",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| AppError::CatalogUnavailable(e.to_string()))
}

/// Reads one profile, or `ProfileMissing`.
pub async fn fetch_profile(pool: &PgPool, user_id: Uuid) -> Result<ProfileRow, AppError> {
    sqlx::query_as::<_, ProfileRow>(
        "SELECT id, skills, career_goals, job_preferences, skill_assessments, \
         career_progression, parsed_resume \
         FROM profiles WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::ProfileMissing(user_id))
}

/// Persists a freshly parsed resume record on the profile.
pub async fn save_parsed_resume(
    pool: &PgPool,
    user_id: Uuid,
    record: &ResumeRecord,
) -> Result<(), AppError> {
    let result = sqlx::query("UPDATE profiles SET parsed_resume = $2, updated_at = now() WHERE id = $1")
        .bind(user_id)
        .bind(Json(record))
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::ProfileMissing(user_id));
    }
    Ok(())
}

/// Persists the latest ranked match list on the profile.
pub async fn save_job_matches(
    pool: &PgPool,
    user_id: Uuid,
    matches: &[JobMatch],
) -> Result<(), AppError> {
    let result = sqlx::query("UPDATE profiles SET job_matches = $2, updated_at = now() WHERE id = $1")
        .bind(user_id)
        .bind(Json(matches))
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::ProfileMissing(user_id));
    }
    Ok(())
}

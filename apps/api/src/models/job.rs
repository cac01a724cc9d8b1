use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A job posting from the catalog. Read-only snapshot: the engines never
/// mutate a posting, they only score against it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub description: Option<String>,
    /// Stored lower-cased; skill comparisons are case-insensitive anyway.
    pub required_skills: Vec<String>,
    pub location: Option<String>,
    /// Free-text range, e.g. "$120,000 - $150,000". The preference scorer
    /// extracts the minimum figure from it.
    pub salary_range: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

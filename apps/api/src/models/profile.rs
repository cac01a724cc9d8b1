#![allow(dead_code)]

//! Profile value types.
//!
//! The profile store keeps these as JSON columns; each column gets an
//! explicit value type with a validating constructor instead of a
//! loosely-typed blob. Field names serialize camelCase to stay compatible
//! with rows written by the web client.

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::resume::ResumeRecord;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerGoals {
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
    pub target_roles: Vec<String>,
    pub industries: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPreferences {
    pub preferred_locations: Vec<String>,
    pub minimum_salary: Option<f64>,
    pub remote_only: Option<bool>,
    #[serde(default)]
    pub industries: Vec<String>,
    #[serde(default)]
    pub company_types: Vec<String>,
}

/// Self-reported proficiency for one skill.
///
/// The level range is enforced on every path: `new` for constructed values
/// and `deserialize_level` for rows read back from the store, so downstream
/// arithmetic (`level - 1` in the insight velocity) can rely on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillAssessment {
    pub skill: String,
    /// 1 (novice) through 5 (expert).
    #[serde(deserialize_with = "deserialize_level")]
    pub level: u8,
    pub last_assessed: DateTime<Utc>,
    pub endorsements: u32,
}

fn deserialize_level<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let level = u8::deserialize(deserializer)?;
    if (1..=5).contains(&level) {
        Ok(level)
    } else {
        Err(serde::de::Error::custom(format!(
            "skill level must be between 1 and 5, got {level}"
        )))
    }
}

impl SkillAssessment {
    pub fn new(
        skill: impl Into<String>,
        level: u8,
        last_assessed: DateTime<Utc>,
        endorsements: u32,
    ) -> Result<Self> {
        let skill = skill.into();
        if skill.trim().is_empty() {
            bail!("skill name cannot be empty");
        }
        if !(1..=5).contains(&level) {
            bail!("skill level must be between 1 and 5, got {level}");
        }
        Ok(Self {
            skill,
            level,
            last_assessed,
            endorsements,
        })
    }
}

/// One milestone in the user's career history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerProgressionEntry {
    pub date: DateTime<Utc>,
    pub title: String,
    pub company: String,
    pub achievements: Vec<String>,
    pub skills_gained: Vec<String>,
}

impl CareerProgressionEntry {
    pub fn new(
        date: DateTime<Utc>,
        title: impl Into<String>,
        company: impl Into<String>,
    ) -> Result<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            bail!("progression entry title cannot be empty");
        }
        Ok(Self {
            date,
            title,
            company: company.into(),
            achievements: Vec::new(),
            skills_gained: Vec::new(),
        })
    }

    pub fn with_skills_gained(mut self, skills: Vec<String>) -> Self {
        self.skills_gained = skills;
        self
    }
}

/// Profile row as stored. JSON columns are nullable; absence of a column is
/// "user never filled this in", not an error.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub skills: Option<Vec<String>>,
    pub career_goals: Option<Json<CareerGoals>>,
    pub job_preferences: Option<Json<JobPreferences>>,
    pub skill_assessments: Option<Json<Vec<SkillAssessment>>>,
    pub career_progression: Option<Json<Vec<CareerProgressionEntry>>>,
    pub parsed_resume: Option<Json<ResumeRecord>>,
}

impl ProfileRow {
    pub fn current_skills(&self) -> &[String] {
        self.skills.as_deref().unwrap_or(&[])
    }

    pub fn target_roles(&self) -> &[String] {
        self.career_goals
            .as_ref()
            .map(|g| g.target_roles.as_slice())
            .unwrap_or(&[])
    }

    pub fn assessments(&self) -> &[SkillAssessment] {
        self.skill_assessments
            .as_ref()
            .map(|a| a.0.as_slice())
            .unwrap_or(&[])
    }

    pub fn progression(&self) -> &[CareerProgressionEntry] {
        self.career_progression
            .as_ref()
            .map(|p| p.0.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_assessment_rejects_out_of_range_level() {
        assert!(SkillAssessment::new("rust", 0, Utc::now(), 0).is_err());
        assert!(SkillAssessment::new("rust", 6, Utc::now(), 0).is_err());
        assert!(SkillAssessment::new("rust", 3, Utc::now(), 2).is_ok());
    }

    #[test]
    fn test_skill_assessment_rejects_empty_skill() {
        assert!(SkillAssessment::new("  ", 3, Utc::now(), 0).is_err());
    }

    #[test]
    fn test_progression_entry_requires_title() {
        assert!(CareerProgressionEntry::new(Utc::now(), "", "Acme").is_err());
        let entry = CareerProgressionEntry::new(Utc::now(), "Engineer", "Acme")
            .unwrap()
            .with_skills_gained(vec!["python".to_string()]);
        assert_eq!(entry.skills_gained, vec!["python"]);
    }

    #[test]
    fn test_skill_assessment_deserialization_rejects_invalid_level() {
        // Stored rows bypass `new`, so the range must also hold at
        // deserialization time or `level - 1` underflows downstream.
        let json = |level: u8| {
            format!(
                r#"{{"skill":"python","level":{level},"lastAssessed":"2026-01-01T00:00:00Z","endorsements":0}}"#
            )
        };
        assert!(serde_json::from_str::<SkillAssessment>(&json(0)).is_err());
        assert!(serde_json::from_str::<SkillAssessment>(&json(6)).is_err());

        let assessment: SkillAssessment = serde_json::from_str(&json(3)).unwrap();
        assert_eq!(assessment.level, 3);
    }

    #[test]
    fn test_job_preferences_camel_case_round_trip() {
        let json = r#"{
            "preferredLocations": ["Berlin", "Remote"],
            "minimumSalary": 90000,
            "remoteOnly": false
        }"#;
        let prefs: JobPreferences = serde_json::from_str(json).unwrap();
        assert_eq!(prefs.preferred_locations.len(), 2);
        assert_eq!(prefs.minimum_salary, Some(90000.0));
        assert_eq!(prefs.remote_only, Some(false));
        assert!(prefs.industries.is_empty());
    }

    #[test]
    fn test_career_goals_camel_case_field_names() {
        let goals = CareerGoals {
            target_roles: vec!["Backend Engineer".to_string()],
            ..Default::default()
        };
        let json = serde_json::to_value(&goals).unwrap();
        assert!(json.get("targetRoles").is_some());
        assert!(json.get("target_roles").is_none());
    }
}

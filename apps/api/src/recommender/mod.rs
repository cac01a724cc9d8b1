//! Skill Recommender — frequency-weighted skill gap recommendations over the
//! job catalog, plus qualitative progress insights over the user's
//! assessment history. Independent of the interpreter and the matcher; pure
//! computation over snapshots.

pub mod handlers;

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dictionaries::SkillCatalog;
use crate::models::job::JobRow;
use crate::models::profile::{CareerProgressionEntry, SkillAssessment};

/// How commonly a skill appears across the catalog, as a proxy for market
/// demand. Thresholds are strict: exactly 50% of postings is "stable".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthTrend {
    Rising,
    Stable,
    Declining,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecommendation {
    pub skill: String,
    pub relevance: f64,
    pub reason: String,
    /// Number of postings requiring this skill.
    pub required_by: u32,
    pub growth_trend: GrowthTrend,
    /// 1 = beginner, 5 = expert.
    pub difficulty: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsightKind {
    FastProgress,
    Stagnant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillInsight {
    pub skill: String,
    pub kind: InsightKind,
    pub message: String,
}

/// Ranks skills the candidate does not yet have by relevance to their target
/// roles, catalog demand, and complementarity with their current skills.
///
/// An empty catalog produces an empty list, never an error — the recommender
/// tolerates an absent catalog by treating every frequency as zero.
pub fn recommend_skills(
    current_skills: &[String],
    target_roles: &[String],
    jobs: &[JobRow],
    catalog: &SkillCatalog,
    limit: usize,
) -> Vec<SkillRecommendation> {
    let current: HashSet<&str> = current_skills.iter().map(String::as_str).collect();
    let total_jobs = jobs.len().max(1) as f64;

    // Frequency of each required skill across all postings. BTreeMap keeps
    // the iteration order deterministic.
    let mut frequency: BTreeMap<&str, u32> = BTreeMap::new();
    for job in jobs {
        for skill in &job.required_skills {
            *frequency.entry(skill.as_str()).or_insert(0) += 1;
        }
    }

    // Skills tied to the candidate's target roles via the role groups.
    let relevant: HashSet<&str> = target_roles
        .iter()
        .filter_map(|role| catalog.skills_for_role(role))
        .flatten()
        .map(String::as_str)
        .collect();

    let mut recommendations = Vec::new();

    for (skill, &required_by) in &frequency {
        if current.contains(skill) {
            continue;
        }
        let info = match catalog.info(skill) {
            Some(info) => info,
            None => continue,
        };

        let role_relevant = relevant.contains(skill);
        let complements = catalog.complementary_skills(skill);
        let complementary_score = if complements.is_empty() {
            0.0
        } else {
            complements.iter().filter(|s| current.contains(**s)).count() as f64
                / complements.len() as f64
        };

        let mut relevance = 0.0;
        if role_relevant {
            relevance += 0.4;
        }
        relevance += (f64::from(required_by) / total_jobs).min(0.3);
        relevance += complementary_score * 0.3;

        let reason = if role_relevant {
            format!("Required for {} roles", target_roles.join(" or "))
        } else if complementary_score > 0.0 {
            "Complements your current skill set".to_string()
        } else {
            "In-demand skill in your target industry".to_string()
        };

        let growth_trend = if f64::from(required_by) > total_jobs * 0.5 {
            GrowthTrend::Rising
        } else if f64::from(required_by) > total_jobs * 0.2 {
            GrowthTrend::Stable
        } else {
            GrowthTrend::Declining
        };

        recommendations.push(SkillRecommendation {
            skill: skill.to_string(),
            relevance,
            reason,
            required_by,
            growth_trend,
            difficulty: info.difficulty,
        });
    }

    recommendations.sort_by(|a, b| {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(Ordering::Equal)
    });
    recommendations.truncate(limit);
    recommendations
}

/// Learning-velocity insights: for each assessed skill, elapsed time since
/// the first progression entry that lists it as gained determines how fast
/// the user climbed from level 1 to their current level. Skills with no
/// matching progression entry produce no insight.
pub fn skill_insights(
    assessments: &[SkillAssessment],
    progression: &[CareerProgressionEntry],
    now: DateTime<Utc>,
) -> Vec<SkillInsight> {
    let mut insights = Vec::new();

    for assessment in assessments {
        let first_mention = progression
            .iter()
            .find(|entry| entry.skills_gained.contains(&assessment.skill));
        let entry = match first_mention {
            Some(entry) => entry,
            None => continue,
        };

        let days_elapsed = (now - entry.date).num_days() as f64;
        let velocity_per_month = f64::from(assessment.level - 1) / (days_elapsed / 30.0);

        if velocity_per_month > 0.5 {
            insights.push(SkillInsight {
                skill: assessment.skill.clone(),
                kind: InsightKind::FastProgress,
                message: format!(
                    "Great progress in {}! You're learning this skill quickly.",
                    assessment.skill
                ),
            });
        } else if velocity_per_month < 0.1 && days_elapsed > 90.0 {
            insights.push(SkillInsight {
                skill: assessment.skill.clone(),
                kind: InsightKind::Stagnant,
                message: format!(
                    "Consider focusing more on {} - progress has been slow.",
                    assessment.skill
                ),
            });
        }
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn job(required_skills: &[&str]) -> JobRow {
        JobRow {
            id: Uuid::new_v4(),
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            description: None,
            required_skills: required_skills.iter().map(|s| s.to_string()).collect(),
            location: None,
            salary_range: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn catalog() -> SkillCatalog {
        SkillCatalog::default()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_never_recommends_a_skill_already_held() {
        let jobs = vec![job(&["python", "sql"]), job(&["python"])];
        let recs = recommend_skills(&strings(&["python"]), &[], &jobs, &catalog(), 10);
        assert!(recs.iter().all(|r| r.skill != "python"));
        assert!(recs.iter().any(|r| r.skill == "sql"));
    }

    #[test]
    fn test_unknown_skills_are_skipped() {
        let jobs = vec![job(&["cobol"])];
        let recs = recommend_skills(&[], &[], &jobs, &catalog(), 10);
        assert!(recs.is_empty());
    }

    #[test]
    fn test_empty_catalog_returns_empty_list() {
        let recs = recommend_skills(&strings(&["python"]), &strings(&["Backend Developer"]), &[], &catalog(), 10);
        assert!(recs.is_empty());
    }

    #[test]
    fn test_target_role_reason_has_priority() {
        let jobs = vec![job(&["react"])];
        let recs = recommend_skills(
            &strings(&["javascript"]),
            &strings(&["Frontend Developer"]),
            &jobs,
            &catalog(),
            10,
        );
        let react = recs.iter().find(|r| r.skill == "react").unwrap();
        assert_eq!(react.reason, "Required for Frontend Developer roles");
    }

    #[test]
    fn test_complementary_reason_without_target_role() {
        let jobs = vec![job(&["react"])];
        let recs = recommend_skills(&strings(&["javascript"]), &[], &jobs, &catalog(), 10);
        let react = recs.iter().find(|r| r.skill == "react").unwrap();
        assert_eq!(react.reason, "Complements your current skill set");
    }

    #[test]
    fn test_in_demand_fallback_reason() {
        let jobs = vec![job(&["aws"])];
        let recs = recommend_skills(&[], &[], &jobs, &catalog(), 10);
        let aws = recs.iter().find(|r| r.skill == "aws").unwrap();
        assert_eq!(aws.reason, "In-demand skill in your target industry");
    }

    #[test]
    fn test_relevance_components_add_up() {
        // 4 jobs, "react" required by 1: target-role 0.4 + freq min(0.25, 0.3)
        // + complementarity 0.3 * (owned complements / all complements).
        // "react" groups: frontend [javascript, react, ui/ux] and fullstack
        // [javascript, react, node.js, sql] → 7 flattened, candidate owns
        // javascript twice → 2/7.
        let jobs = vec![job(&["react"]), job(&["sql"]), job(&["sql"]), job(&["sql"])];
        let recs = recommend_skills(
            &strings(&["javascript"]),
            &strings(&["Frontend Developer"]),
            &jobs,
            &catalog(),
            10,
        );
        let react = recs.iter().find(|r| r.skill == "react").unwrap();
        let expected = 0.4 + 0.25 + 0.3 * (2.0 / 7.0);
        assert!(
            (react.relevance - expected).abs() < 1e-9,
            "relevance was {}",
            react.relevance
        );
    }

    #[test]
    fn test_frequency_contribution_is_capped() {
        // Required by every posting: frequency ratio 1.0 capped at 0.3.
        let jobs = vec![job(&["aws"]), job(&["aws"])];
        let recs = recommend_skills(&[], &[], &jobs, &catalog(), 10);
        let aws = recs.iter().find(|r| r.skill == "aws").unwrap();
        assert!((aws.relevance - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_growth_trend_boundaries_are_strict() {
        // 4 jobs: freq 2 is exactly 50% → stable, not rising; freq 3 → rising.
        let jobs = vec![
            job(&["aws", "docker"]),
            job(&["aws", "docker"]),
            job(&["docker"]),
            job(&[]),
        ];
        let recs = recommend_skills(&[], &[], &jobs, &catalog(), 10);
        let aws = recs.iter().find(|r| r.skill == "aws").unwrap();
        assert_eq!(aws.growth_trend, GrowthTrend::Stable);
        let docker = recs.iter().find(|r| r.skill == "docker").unwrap();
        assert_eq!(docker.growth_trend, GrowthTrend::Rising);
    }

    #[test]
    fn test_low_frequency_is_declining() {
        // freq 1 of 5 = 20%, strict bound → declining.
        let jobs = vec![job(&["aws"]), job(&[]), job(&[]), job(&[]), job(&[])];
        let recs = recommend_skills(&[], &[], &jobs, &catalog(), 10);
        let aws = recs.iter().find(|r| r.skill == "aws").unwrap();
        assert_eq!(aws.growth_trend, GrowthTrend::Declining);
    }

    #[test]
    fn test_recommendations_sorted_and_truncated() {
        let jobs = vec![
            job(&["react", "sql", "aws", "docker"]),
            job(&["react"]),
            job(&["react"]),
        ];
        let recs = recommend_skills(
            &strings(&["javascript"]),
            &strings(&["Frontend Developer"]),
            &jobs,
            &catalog(),
            2,
        );
        assert_eq!(recs.len(), 2);
        assert!(recs[0].relevance >= recs[1].relevance);
        assert_eq!(recs[0].skill, "react");
    }

    #[test]
    fn test_difficulty_comes_from_catalog_metadata() {
        let jobs = vec![job(&["machine learning"])];
        let recs = recommend_skills(&[], &[], &jobs, &catalog(), 10);
        assert_eq!(recs[0].difficulty, 4);
    }

    fn assessment(skill: &str, level: u8, now: DateTime<Utc>) -> SkillAssessment {
        SkillAssessment::new(skill, level, now, 0).unwrap()
    }

    fn progression_entry(skill: &str, date: DateTime<Utc>) -> CareerProgressionEntry {
        CareerProgressionEntry::new(date, "Engineer", "Acme")
            .unwrap()
            .with_skills_gained(vec![skill.to_string()])
    }

    #[test]
    fn test_fast_progress_insight() {
        let now = Utc::now();
        // Level 3 in 60 days: (3-1)/(60/30) = 1.0 per month > 0.5.
        let insights = skill_insights(
            &[assessment("python", 3, now)],
            &[progression_entry("python", now - Duration::days(60))],
            now,
        );
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::FastProgress);
        assert!(insights[0].message.contains("python"));
    }

    #[test]
    fn test_stagnant_insight_needs_ninety_days() {
        let now = Utc::now();
        // Level 1 after 120 days: velocity 0 < 0.1 and elapsed > 90.
        let insights = skill_insights(
            &[assessment("sql", 1, now)],
            &[progression_entry("sql", now - Duration::days(120))],
            now,
        );
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Stagnant);

        // Same velocity but only 60 days elapsed: no insight yet.
        let insights = skill_insights(
            &[assessment("sql", 1, now)],
            &[progression_entry("sql", now - Duration::days(60))],
            now,
        );
        assert!(insights.is_empty());
    }

    #[test]
    fn test_moderate_velocity_produces_no_insight() {
        let now = Utc::now();
        // Level 2 in 120 days: (2-1)/(120/30) = 0.25 per month.
        let insights = skill_insights(
            &[assessment("docker", 2, now)],
            &[progression_entry("docker", now - Duration::days(120))],
            now,
        );
        assert!(insights.is_empty());
    }

    #[test]
    fn test_skill_without_progression_entry_has_no_insight() {
        let now = Utc::now();
        let insights = skill_insights(&[assessment("aws", 5, now)], &[], now);
        assert!(insights.is_empty());
    }
}

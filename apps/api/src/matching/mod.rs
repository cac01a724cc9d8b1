//! Job Match Scorer — scores a structured resume against the job catalog and
//! ranks postings by a weighted composite of skill, experience, education,
//! and preference fit. Pure computation over snapshots: identical inputs
//! always produce identical ordered output.

pub mod handlers;

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::job::JobRow;
use crate::models::profile::JobPreferences;
use crate::models::resume::{EducationEntry, ExperienceEntry, ResumeRecord};

/// Degree keywords by ordinal rank. Substring match on the degree text,
/// case-insensitive; first hit wins.
const EDUCATION_LEVELS: [(&str, f64); 5] = [
    ("phd", 5.0),
    ("master", 4.0),
    ("bachelor", 3.0),
    ("associate", 2.0),
    ("certificate", 1.0),
];

/// Domain fields looked up in job title + description for education
/// relevancy.
const TECHNICAL_FIELDS: [&str; 11] = [
    "computer science",
    "software",
    "engineering",
    "data science",
    "mathematics",
    "physics",
    "information technology",
    "business",
    "finance",
    "marketing",
    "design",
];

/// Minimum title word-overlap ratio for an experience entry to count as
/// relevant to a job.
const RELEVANCE_THRESHOLD: f64 = 0.3;

static DURATION_YEARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*year").expect("duration years regex"));
static DURATION_MONTHS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*month").expect("duration months regex"));
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W+").expect("non-word regex"));
static DEGREE_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"bachelor|master|phd|degree|of|in").expect("degree noise regex"));
static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("number regex"));

/// Weights for the composite score. Defaults mirror the shipped formula.
///
/// The experience sub-term mixes an unbounded raw year count with bounded
/// ratios, so the composite is NOT guaranteed to stay in [0,1] for long
/// careers. That is the shipped arithmetic and callers depend on the
/// ordering it produces; it is preserved here rather than renormalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchWeights {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub preferences: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            skills: 0.4,
            experience: 0.3,
            education: 0.2,
            preferences: 0.1,
        }
    }
}

/// The scoring subset of `JobPreferences`. Every field is optional; an
/// absent preference never penalizes a job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchPreferences {
    #[serde(default)]
    pub preferred_locations: Vec<String>,
    pub minimum_salary: Option<f64>,
    pub remote_only: Option<bool>,
}

impl From<&JobPreferences> for MatchPreferences {
    fn from(prefs: &JobPreferences) -> Self {
        Self {
            preferred_locations: prefs.preferred_locations.clone(),
            minimum_salary: prefs.minimum_salary,
            remote_only: prefs.remote_only,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceMatch {
    /// Total years parsed from all duration texts. Unbounded.
    pub years: f64,
    /// Fraction of those years spent in roles relevant to the job title.
    pub relevancy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationMatch {
    /// The highest-ranked degree text, or "none".
    pub degree_level: String,
    pub relevancy: f64,
}

/// A scored job posting. Created fresh per scoring call; never persisted by
/// the engine itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMatch {
    pub title: String,
    pub company: String,
    pub score: f64,
    pub matching_skills: Vec<String>,
    pub skill_match_percentage: f64,
    pub experience_match: ExperienceMatch,
    pub education_match: EducationMatch,
}

/// Scores every posting in the catalog against the resume and returns them
/// sorted descending by composite score. The sort is stable, so ties keep
/// catalog input order.
pub fn score_jobs(
    resume: &ResumeRecord,
    jobs: &[JobRow],
    preferences: Option<&MatchPreferences>,
    weights: &MatchWeights,
) -> Vec<JobMatch> {
    let mut matches: Vec<JobMatch> = jobs
        .iter()
        .map(|job| score_job(resume, job, preferences, weights))
        .collect();

    matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    matches
}

fn score_job(
    resume: &ResumeRecord,
    job: &JobRow,
    preferences: Option<&MatchPreferences>,
    weights: &MatchWeights,
) -> JobMatch {
    let skill_match_percentage = skill_match(&resume.skills, &job.required_skills);
    let experience_match = experience_match(&resume.experience, job);
    let education_match = education_match(&resume.education, job);
    let preference_score = preference_score(job, preferences);

    let experience_score = experience_match.years * 0.4 + experience_match.relevancy * 0.6;
    let education_score =
        degree_level(&education_match.degree_level) / 5.0 * 0.4 + education_match.relevancy * 0.6;

    let score = skill_match_percentage * weights.skills
        + experience_score * weights.experience
        + education_score * weights.education
        + preference_score * weights.preferences;

    let required: HashSet<String> = job
        .required_skills
        .iter()
        .map(|s| s.to_lowercase())
        .collect();
    let matching_skills = resume
        .skills
        .iter()
        .filter(|s| required.contains(&s.to_lowercase()))
        .cloned()
        .collect();

    JobMatch {
        title: job.title.clone(),
        company: job.company.clone(),
        score,
        matching_skills,
        skill_match_percentage,
        experience_match,
        education_match,
    }
}

/// `0.7 * coverage + 0.3 * relevance`, where coverage is the fraction of
/// required skills the candidate has and relevance is the fraction of
/// candidate skills the job asks for. Either ratio is 0 when its denominator
/// is empty.
fn skill_match(candidate_skills: &[String], required_skills: &[String]) -> f64 {
    let candidate: HashSet<String> = candidate_skills.iter().map(|s| s.to_lowercase()).collect();
    let required: HashSet<String> = required_skills.iter().map(|s| s.to_lowercase()).collect();

    let matching = candidate.intersection(&required).count() as f64;

    let coverage = if required.is_empty() {
        0.0
    } else {
        matching / required.len() as f64
    };
    let relevance = if candidate.is_empty() {
        0.0
    } else {
        matching / candidate.len() as f64
    };

    coverage * 0.7 + relevance * 0.3
}

fn experience_match(experience: &[ExperienceEntry], job: &JobRow) -> ExperienceMatch {
    let mut total_years = 0.0;
    let mut relevant_years = 0.0;

    for entry in experience {
        let years = parse_duration_years(&entry.duration);
        total_years += years;
        if is_experience_relevant(entry, job) {
            relevant_years += years;
        }
    }

    ExperienceMatch {
        years: total_years,
        relevancy: if total_years > 0.0 {
            relevant_years / total_years
        } else {
            0.0
        },
    }
}

/// Extracts a year count from free-text duration, e.g. "2 years 6 months"
/// parses to 2.5.
fn parse_duration_years(duration: &str) -> f64 {
    let mut years = 0.0;
    if let Some(caps) = DURATION_YEARS.captures(duration) {
        years += caps[1].parse::<f64>().unwrap_or(0.0);
    }
    if let Some(caps) = DURATION_MONTHS.captures(duration) {
        years += caps[1].parse::<f64>().unwrap_or(0.0) / 12.0;
    }
    years
}

fn word_set(text: &str) -> HashSet<String> {
    NON_WORD
        .split(&text.to_lowercase())
        .filter(|w| !w.is_empty())
        .map(String::from)
        .collect()
}

/// An entry is relevant when its title words overlap the job title words by
/// at least `RELEVANCE_THRESHOLD` of the smaller set.
fn is_experience_relevant(entry: &ExperienceEntry, job: &JobRow) -> bool {
    let job_words = word_set(&job.title);
    let entry_words = word_set(&entry.title);

    let smaller = job_words.len().min(entry_words.len());
    if smaller == 0 {
        return false;
    }

    let overlap = job_words.intersection(&entry_words).count() as f64;
    overlap / smaller as f64 >= RELEVANCE_THRESHOLD
}

fn education_match(education: &[EducationEntry], job: &JobRow) -> EducationMatch {
    let highest = match find_highest_degree(education) {
        Some(entry) => entry,
        None => {
            return EducationMatch {
                degree_level: "none".to_string(),
                relevancy: 0.0,
            }
        }
    };

    EducationMatch {
        degree_level: highest.degree.clone(),
        relevancy: degree_relevancy(&highest.degree, job),
    }
}

/// The entry with the highest degree ordinal; ties keep the first
/// encountered.
fn find_highest_degree(education: &[EducationEntry]) -> Option<&EducationEntry> {
    let mut best: Option<&EducationEntry> = None;
    for entry in education {
        match best {
            Some(current) if degree_level(&entry.degree) <= degree_level(&current.degree) => {}
            _ => best = Some(entry),
        }
    }
    best
}

/// Ordinal rank of a degree text, 0 if no known keyword appears.
fn degree_level(degree: &str) -> f64 {
    let degree = degree.to_lowercase();
    for (keyword, level) in EDUCATION_LEVELS {
        if degree.contains(keyword) {
            return level;
        }
    }
    0.0
}

/// Fraction of the job's domain fields that appear (as substrings) among the
/// degree's field tokens.
fn degree_relevancy(degree: &str, job: &JobRow) -> f64 {
    let job_fields = extract_job_fields(&job.title, job.description.as_deref().unwrap_or(""));
    let degree_fields = extract_degree_fields(degree);

    let overlap = job_fields
        .iter()
        .filter(|field| degree_fields.iter().any(|df| df.contains(*field)))
        .count() as f64;

    overlap / (job_fields.len().max(1)) as f64
}

fn extract_job_fields(title: &str, description: &str) -> Vec<&'static str> {
    let title = title.to_lowercase();
    let description = description.to_lowercase();
    TECHNICAL_FIELDS
        .into_iter()
        .filter(|field| title.contains(field) || description.contains(field))
        .collect()
}

/// Strips degree-level words (as substrings, matching the shipped behavior)
/// and splits the remainder into field tokens.
fn extract_degree_fields(degree: &str) -> Vec<String> {
    let degree = degree.to_lowercase();
    let cleaned = DEGREE_NOISE.replace_all(&degree, "");
    cleaned
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Fraction of stated preference dimensions the job satisfies; 1.0 when no
/// preferences are stated (absence of preference never penalizes). The
/// salary dimension only counts when the posting carries a salary range.
fn preference_score(job: &JobRow, preferences: Option<&MatchPreferences>) -> f64 {
    let preferences = match preferences {
        Some(p) => p,
        None => return 1.0,
    };

    let location = job.location.as_deref().unwrap_or("").to_lowercase();
    let mut factors = 0u32;
    let mut score = 0u32;

    if !preferences.preferred_locations.is_empty() {
        factors += 1;
        if preferences
            .preferred_locations
            .iter()
            .any(|loc| location.contains(&loc.to_lowercase()))
        {
            score += 1;
        }
    }

    // A zero minimum is treated as unset, so the dimension is only counted
    // when both a real minimum and a posted range exist.
    let minimum_salary = preferences.minimum_salary.filter(|m| *m != 0.0);
    if let (Some(minimum), Some(range)) = (minimum_salary, &job.salary_range) {
        factors += 1;
        if extract_min_salary(range) >= minimum {
            score += 1;
        }
    }

    if let Some(remote_only) = preferences.remote_only {
        factors += 1;
        let is_remote = location.contains("remote");
        if !remote_only || is_remote {
            score += 1;
        }
    }

    if factors > 0 {
        f64::from(score) / f64::from(factors)
    } else {
        1.0
    }
}

/// Smallest integer found in the salary range text, 0 if none.
fn extract_min_salary(salary_range: &str) -> f64 {
    NUMBER
        .find_iter(salary_range)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .fold(None::<f64>, |min, n| Some(min.map_or(n, |m| m.min(n))))
        .unwrap_or(0.0)
}

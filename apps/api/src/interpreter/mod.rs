//! Resume Interpreter — converts unstructured resume text into a structured
//! `ResumeRecord` (skills, experience, education) using keyword and pattern
//! matching. Pure computation: no I/O, deterministic for a given input and
//! dictionary. Document fetching lives behind the `DocumentFetcher` trait in
//! `document`.

pub mod document;
pub mod handlers;

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::dictionaries::SkillDictionary;
use crate::models::resume::{EducationEntry, ExperienceEntry, ResumeRecord};

/// A date span that opens a new experience entry, e.g. "Jan 2020 - Mar 2023",
/// "2019-2021", "2021 to present".
static DATE_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]* \d{4}\s*(-|–|to)\s*(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]* \d{4}|\b\d{4}\s*(-|–|to)\s*\d{4}|\b\d{4}\s*(-|–|to)\s*present\b",
    )
    .expect("date span regex")
});

/// A line containing a seniority or role keyword becomes the entry title.
static ROLE_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(senior|lead|principal|software|developer|engineer|architect|manager|director|consultant)\b")
        .expect("role keyword regex")
});

/// Degree keyword followed (non-greedily) by a 4-digit year in 1900–2099.
static EDUCATION_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:Bachelor|Master|PhD|B\.?S\.?|M\.?S\.?|Ph\.?D\.?|Degree)\b.*?\b(?:19|20)\d{2}\b")
        .expect("education span regex")
});

static EDUCATION_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+at\s+|\s+from\s+|\s+,\s+").expect("education split regex"));

static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(19|20)\d{2}\b").expect("year regex"));

/// Parses raw resume text into a structured record.
///
/// Never fails: unrecognized text simply yields empty sections. Fetch and
/// decode failures are the caller's concern (`DocumentUnavailable`).
pub fn parse_resume(text: &str, dictionary: &SkillDictionary) -> ResumeRecord {
    ResumeRecord {
        skills: extract_skills(text, dictionary),
        experience: extract_experience(text),
        education: extract_education(text),
    }
}

/// Lower-cases, strips everything outside `[a-z0-9\s]`, splits on whitespace.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .map(String::from)
        .collect()
}

/// A phrase that survives tokenization unchanged can be matched token-wise;
/// anything with whitespace or punctuation ("node.js", "ci/cd", "machine
/// learning") needs a substring check against the raw lower-cased text.
fn is_plain_token(phrase: &str) -> bool {
    !phrase.is_empty() && phrase.chars().all(|c| c.is_ascii_alphanumeric())
}

fn extract_skills(text: &str, dictionary: &SkillDictionary) -> Vec<String> {
    let lowered = text.to_lowercase();
    let tokens: BTreeSet<String> = tokenize(text).into_iter().collect();

    let found: BTreeSet<String> = dictionary
        .phrases
        .iter()
        .filter(|phrase| {
            let phrase = phrase.to_lowercase();
            if is_plain_token(&phrase) {
                tokens.contains(&phrase)
            } else {
                lowered.contains(&phrase)
            }
        })
        .map(|phrase| phrase.to_lowercase())
        .collect();

    found.into_iter().collect()
}

#[derive(Default)]
struct PendingExperience {
    title: Option<String>,
    duration: String,
    description: Vec<String>,
}

impl PendingExperience {
    fn flush(self, out: &mut Vec<ExperienceEntry>) {
        if let Some(title) = self.title {
            out.push(ExperienceEntry {
                title,
                company: String::new(), // employer is never extracted reliably
                duration: self.duration,
                description: self.description,
            });
        }
    }
}

/// Line-oriented state machine: a date-span line flushes the current entry
/// (only if it already has a title) and opens a new one; a role-keyword line
/// sets the title; any other line longer than 30 characters becomes
/// description once a title exists.
fn extract_experience(text: &str) -> Vec<ExperienceEntry> {
    let mut entries = Vec::new();
    let mut current = PendingExperience::default();

    for line in text.lines() {
        let line = line.trim();

        if let Some(span) = DATE_SPAN.find(line) {
            let next = PendingExperience {
                duration: span.as_str().to_string(),
                ..Default::default()
            };
            std::mem::replace(&mut current, next).flush(&mut entries);
        } else if ROLE_KEYWORD.is_match(line) {
            current.title = Some(line.to_string());
        } else if line.len() > 30 && current.title.is_some() {
            current.description.push(line.to_string());
        }
    }

    current.flush(&mut entries);
    entries
}

fn extract_education(text: &str) -> Vec<EducationEntry> {
    EDUCATION_SPAN
        .find_iter(text)
        .map(|span| {
            let span = span.as_str();
            let mut parts = EDUCATION_SPLIT.split(span);
            let degree = parts.next().unwrap_or("").to_string();
            let institution = parts.next().unwrap_or("").to_string();
            let year = YEAR
                .find(span)
                .map(|y| y.as_str().to_string())
                .unwrap_or_default();
            EducationEntry {
                degree,
                institution,
                year,
            }
        })
        .collect()
}

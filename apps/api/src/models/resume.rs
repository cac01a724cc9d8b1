//! Structured resume record produced by the interpreter.
//!
//! Immutable after creation: the interpreter builds it once per document and
//! every downstream consumer (matcher, profile store) reads it as a snapshot.

use serde::{Deserialize, Serialize};

/// One employment entry recovered from the resume text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    /// Never populated by the current extraction pass. The line format of
    /// real resumes does not mark the employer reliably, so this stays blank
    /// rather than guessing. Known gap.
    pub company: String,
    /// Raw duration span as matched in the text, e.g. "Jan 2020 - Mar 2023".
    pub duration: String,
    pub description: Vec<String>,
}

/// One education entry recovered from the resume text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    /// First 4-digit year found in the matched span, or empty.
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    /// Deduplicated, sorted, lower-cased skill phrases.
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
}

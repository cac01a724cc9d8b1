//! Skill and role lookup tables.
//!
//! The interpreter and recommender both run off small static dictionaries in
//! the original product. They are value types here, carried in `AppState` and
//! passed into the engines, so tests can substitute reduced fixtures.

use serde::{Deserialize, Serialize};

/// Known skill phrases the resume interpreter scans for. Single-word phrases
/// are matched as tokens; multi-word phrases as substrings of the full text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDictionary {
    pub phrases: Vec<String>,
}

impl SkillDictionary {
    pub fn new(phrases: Vec<String>) -> Self {
        Self { phrases }
    }
}

impl Default for SkillDictionary {
    fn default() -> Self {
        Self::new(
            [
                "javascript",
                "typescript",
                "python",
                "java",
                "c++",
                "react",
                "angular",
                "vue",
                "node.js",
                "express",
                "mongodb",
                "sql",
                "postgresql",
                "aws",
                "azure",
                "docker",
                "kubernetes",
                "git",
                "agile",
                "scrum",
                "machine learning",
                "data science",
                "artificial intelligence",
                "devops",
                "ci/cd",
                "test driven development",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        )
    }
}

/// Category and learning difficulty for a recommendable skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillInfo {
    pub category: String,
    /// 1 = beginner, 5 = expert.
    pub difficulty: u8,
}

/// Skill metadata plus role-category skill groups for the recommender.
///
/// Role groups are ordered: target-role lookup takes the first group whose
/// key is a substring of the role string, so insertion order is part of the
/// contract (e.g. "fullstack developer" must hit "fullstack", not "full").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<(String, SkillInfo)>,
    pub role_groups: Vec<(String, Vec<String>)>,
}

impl SkillCatalog {
    pub fn info(&self, skill: &str) -> Option<&SkillInfo> {
        self.skills.iter().find(|(s, _)| s == skill).map(|(_, i)| i)
    }

    /// Skills associated with the first role group whose key appears in the
    /// (lower-cased) target role string.
    pub fn skills_for_role(&self, role: &str) -> Option<&[String]> {
        let role = role.to_lowercase();
        self.role_groups
            .iter()
            .find(|(key, _)| role.contains(key))
            .map(|(_, skills)| skills.as_slice())
    }

    /// All skills grouped with `skill`, flattened across every group that
    /// contains it. Duplicates across groups are kept; the complementary
    /// ratio in the recommender counts them the same way.
    pub fn complementary_skills(&self, skill: &str) -> Vec<&str> {
        self.role_groups
            .iter()
            .filter(|(_, skills)| skills.iter().any(|s| s == skill))
            .flat_map(|(_, skills)| skills.iter().map(String::as_str))
            .collect()
    }
}

impl Default for SkillCatalog {
    fn default() -> Self {
        let skill = |name: &str, category: &str, difficulty: u8| {
            (
                name.to_string(),
                SkillInfo {
                    category: category.to_string(),
                    difficulty,
                },
            )
        };
        let group = |key: &str, skills: &[&str]| {
            (
                key.to_string(),
                skills.iter().map(|s| s.to_string()).collect(),
            )
        };

        Self {
            skills: vec![
                skill("javascript", "programming", 2),
                skill("python", "programming", 2),
                skill("react", "frontend", 3),
                skill("node.js", "backend", 3),
                skill("sql", "database", 2),
                skill("aws", "cloud", 4),
                skill("docker", "devops", 3),
                skill("machine learning", "ai", 4),
                skill("data analysis", "data", 3),
                skill("product management", "business", 4),
                skill("agile", "methodology", 2),
                skill("ui/ux", "design", 3),
            ],
            role_groups: vec![
                group("frontend", &["javascript", "react", "ui/ux"]),
                group("backend", &["node.js", "python", "sql"]),
                group("fullstack", &["javascript", "react", "node.js", "sql"]),
                group("data science", &["python", "machine learning", "data analysis"]),
                group("devops", &["docker", "aws", "python"]),
                group("product", &["agile", "product management", "ui/ux"]),
            ],
        }
    }
}

/// Bundle of all engine dictionaries, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct EngineDictionaries {
    pub skills: SkillDictionary,
    pub catalog: SkillCatalog,
}

//! Skill vocabulary: known technology tokens, category membership and
//! display casing.
//!
//! Tokens are stored unescaped ("c++", "next.js"); the recognizers are built
//! from them once, escaping metacharacters and adding word boundaries only on
//! edges that are word characters, so "C++" and "C#" still match at the end
//! of a list item.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::resume::SkillCategory;

const KNOWN_SKILLS: &[&str] = &[
    // Programming languages
    "javascript", "typescript", "python", "java", "c++", "c#", "ruby", "php", "swift",
    "kotlin", "go", "rust", "scala", "perl", "r", "matlab", "dart", "objective-c",
    // Frontend
    "react", "vue", "angular", "svelte", "html", "css", "sass", "less", "tailwind",
    "bootstrap", "jquery", "webpack", "vite", "next.js", "nuxt", "gatsby",
    // Backend
    "node.js", "express", "django", "flask", "spring", "laravel", "rails", "asp.net",
    "fastapi", "nestjs",
    // Databases
    "sql", "mysql", "postgresql", "mongodb", "redis", "elasticsearch", "oracle", "sqlite",
    "dynamodb", "cassandra", "neo4j", "firebase",
    // Cloud & DevOps
    "aws", "azure", "gcp", "docker", "kubernetes", "jenkins", "gitlab", "github actions",
    "terraform", "ansible", "ci/cd", "circleci", "travis",
    // Tools & other
    "git", "linux", "agile", "scrum", "jira", "figma", "photoshop", "illustrator",
    "tensorflow", "pytorch", "machine learning", "deep learning", "nlp", "computer vision",
    "rest api", "graphql", "microservices", "serverless", "blockchain", "websocket",
];

/// Category membership, checked in this order. First match wins.
const CATEGORY_MEMBERS: &[(SkillCategory, &[&str])] = &[
    (
        SkillCategory::Language,
        &["javascript", "typescript", "python", "java", "c++", "c#", "ruby", "php", "go", "rust"],
    ),
    (
        SkillCategory::Frontend,
        &["react", "vue", "angular", "html", "css", "sass", "tailwind", "bootstrap"],
    ),
    (
        SkillCategory::Backend,
        &["node.js", "express", "django", "flask", "spring", "laravel"],
    ),
    (
        SkillCategory::Database,
        &["sql", "mysql", "postgresql", "mongodb", "redis", "elasticsearch"],
    ),
    (
        SkillCategory::Cloud,
        &["aws", "azure", "gcp", "docker", "kubernetes"],
    ),
    (SkillCategory::Tool, &["git", "jira", "figma", "webpack", "vite"]),
];

const DISPLAY_NAMES: &[(&str, &str)] = &[
    ("javascript", "JavaScript"),
    ("typescript", "TypeScript"),
    ("c++", "C++"),
    ("c#", "C#"),
    ("php", "PHP"),
    ("objective-c", "Objective-C"),
    ("matlab", "MATLAB"),
    ("html", "HTML"),
    ("css", "CSS"),
    ("sass", "SASS"),
    ("jquery", "jQuery"),
    ("next.js", "Next.js"),
    ("node.js", "Node.js"),
    ("asp.net", "ASP.NET"),
    ("fastapi", "FastAPI"),
    ("nestjs", "NestJS"),
    ("sql", "SQL"),
    ("nosql", "NoSQL"),
    ("mysql", "MySQL"),
    ("postgresql", "PostgreSQL"),
    ("mongodb", "MongoDB"),
    ("sqlite", "SQLite"),
    ("dynamodb", "DynamoDB"),
    ("neo4j", "Neo4j"),
    ("aws", "AWS"),
    ("gcp", "GCP"),
    ("gitlab", "GitLab"),
    ("github actions", "GitHub Actions"),
    ("ci/cd", "CI/CD"),
    ("circleci", "CircleCI"),
    ("tensorflow", "TensorFlow"),
    ("pytorch", "PyTorch"),
    ("nlp", "NLP"),
    ("rest api", "REST API"),
    ("graphql", "GraphQL"),
    ("websocket", "WebSocket"),
    ("api", "API"),
    ("json", "JSON"),
    ("xml", "XML"),
    ("ml", "ML"),
    ("ai", "AI"),
];

/// A vocabulary token and its compiled recognizer.
pub struct SkillPattern {
    pub token: &'static str,
    pub regex: Regex,
}

static SKILL_PATTERNS: Lazy<Vec<SkillPattern>> = Lazy::new(|| {
    KNOWN_SKILLS
        .iter()
        .map(|token| SkillPattern {
            token: *token,
            regex: Regex::new(&token_pattern(token)).unwrap(),
        })
        .collect()
});

/// Known skill recognizers in vocabulary order.
pub fn known_skills() -> &'static [SkillPattern] {
    &SKILL_PATTERNS
}

fn token_pattern(token: &str) -> String {
    let body = token
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    let is_word = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() || c == '_');
    let lead = if is_word(token.chars().next()) { r"\b" } else { "" };
    let trail = if is_word(token.chars().last()) { r"\b" } else { "" };
    format!("(?i){lead}{body}{trail}")
}

/// Lower-cased, whitespace-collapsed form used for de-duplication.
pub fn canonical(skill: &str) -> String {
    skill
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Category for a canonical skill name: the first category in table order
/// with a member contained in the name. Containment, not equality, so
/// "mongodb" lands in `language` through "go".
pub fn categorize(canonical_skill: &str) -> SkillCategory {
    CATEGORY_MEMBERS
        .iter()
        .find(|(_, members)| members.iter().any(|m| canonical_skill.contains(m)))
        .map(|(category, _)| *category)
        .unwrap_or_default()
}

/// Display casing: fixed spellings for well-known names, otherwise first
/// letter upper and the rest lower.
pub fn display_name(matched: &str) -> String {
    let key = canonical(matched);
    if let Some((_, display)) = DISPLAY_NAMES.iter().find(|(k, _)| *k == key) {
        return display.to_string();
    }
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(token: &str, text: &str) -> Option<String> {
        known_skills()
            .iter()
            .find(|p| p.token == token)
            .and_then(|p| p.regex.find(text))
            .map(|m| m.as_str().to_string())
    }

    #[test]
    fn test_symbolic_tokens_match() {
        assert_eq!(find("c++", "Languages: C++, Python").as_deref(), Some("C++"));
        assert_eq!(find("c#", "C# and .NET").as_deref(), Some("C#"));
        assert_eq!(find("node.js", "Built on Node.js").as_deref(), Some("Node.js"));
        assert_eq!(find("ci/cd", "CI/CD pipelines").as_deref(), Some("CI/CD"));
    }

    #[test]
    fn test_word_boundaries_respected() {
        assert_eq!(find("java", "JavaScript only"), None);
        assert_eq!(find("go", "Django and MongoDB"), None);
        assert_eq!(find("r", "React"), None);
    }

    #[test]
    fn test_multi_word_tokens_allow_any_spacing() {
        assert_eq!(
            find("github actions", "GitHub   Actions").as_deref(),
            Some("GitHub   Actions")
        );
        assert_eq!(
            find("machine learning", "applied machine\nlearning").as_deref(),
            Some("machine\nlearning")
        );
    }

    #[test]
    fn test_categorize_first_containing_category_wins() {
        assert_eq!(categorize("javascript"), SkillCategory::Language);
        assert_eq!(categorize("webpack"), SkillCategory::Tool);
        assert_eq!(categorize("reactjs"), SkillCategory::Frontend);
        assert_eq!(categorize("flask"), SkillCategory::Backend);
        assert_eq!(categorize("postgresql"), SkillCategory::Database);
        assert_eq!(categorize("blockchain"), SkillCategory::Other);
        // Language is checked first, and "go" is a substring of both.
        assert_eq!(categorize("mongodb"), SkillCategory::Language);
        assert_eq!(categorize("django"), SkillCategory::Language);
        assert_eq!(categorize("mysql"), SkillCategory::Database);
    }

    #[test]
    fn test_display_name_casing() {
        assert_eq!(display_name("javascript"), "JavaScript");
        assert_eq!(display_name("POSTGRESQL"), "PostgreSQL");
        assert_eq!(display_name("python"), "Python");
        assert_eq!(display_name("Machine  Learning"), "Machine learning");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn test_canonical_collapses_whitespace() {
        assert_eq!(canonical("  GitHub \n Actions "), "github actions");
    }
}

//! Field Parsers: turn one section block into typed records.
//!
//! Every parser splits its block into entries first; what counts as an entry
//! is decided by [`split_entries`]. Missing fields stay empty rather than
//! failing the entry.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::ExtractionError;
use crate::extraction::entries::{entry_lines, split_entries};
use crate::extraction::patterns::{self, DEGREE, GPA};
use crate::extraction::segmenter::SectionMap;
use crate::extraction::skills::{canonical, categorize, display_name, known_skills};
use crate::models::resume::{SectionKey, SkillCategory};

const BULLET_GLYPHS: [char; 3] = ['-', '•', '*'];

/// Comma-list tokens must be longer than this...
const MIN_LIST_SKILL_CHARS: usize = 2;
/// ...and shorter than this.
const MAX_LIST_SKILL_CHARS: usize = 30;
const MAX_LIST_SKILL_WORDS: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub title: String,
    /// Title and company are not separated by the rule-based parser.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub gpa: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub name: String,
    pub category: SkillCategory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    pub url: String,
    pub highlights: Vec<String>,
    /// Left empty here; reserved for callers with richer extraction.
    pub technologies: Vec<String>,
}

/// Typed records for the sections that have a dedicated parser. A field is
/// `Some` exactly when its section was present in the [`SectionMap`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredSections {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<Vec<ExperienceEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<Vec<EducationEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<SkillRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<ProjectEntry>>,
}

/// Output of a single section parser.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedSection {
    Experience(Vec<ExperienceEntry>),
    Education(Vec<EducationEntry>),
    Skills(Vec<SkillRecord>),
    Projects(Vec<ProjectEntry>),
}

/// Runs the parser for `key` against its block.
///
/// Callers are expected to check presence first; asking for an absent
/// section, or for one without a parser, is a precondition failure.
pub fn parse_section(
    sections: &SectionMap,
    key: SectionKey,
) -> Result<ParsedSection, ExtractionError> {
    let block = sections.get(key).ok_or_else(|| {
        ExtractionError::PreconditionFailed(format!(
            "section '{}' is not present in the document",
            key.as_str()
        ))
    })?;

    match key {
        SectionKey::Experience => Ok(ParsedSection::Experience(parse_experience(block))),
        SectionKey::Education => Ok(ParsedSection::Education(parse_education(block))),
        SectionKey::Skills => Ok(ParsedSection::Skills(parse_skills(block))),
        SectionKey::Projects => Ok(ParsedSection::Projects(parse_projects(block))),
        other => Err(ExtractionError::PreconditionFailed(format!(
            "section '{}' has no structured parser",
            other.as_str()
        ))),
    }
}

/// Parses every section that has a parser and is present.
pub fn structure_sections(sections: &SectionMap) -> Result<StructuredSections, ExtractionError> {
    let mut structured = StructuredSections::default();

    for key in [
        SectionKey::Experience,
        SectionKey::Education,
        SectionKey::Skills,
        SectionKey::Projects,
    ] {
        if !sections.contains(key) {
            continue;
        }
        match parse_section(sections, key)? {
            ParsedSection::Experience(v) => structured.experience = Some(v),
            ParsedSection::Education(v) => structured.education = Some(v),
            ParsedSection::Skills(v) => structured.skills = Some(v),
            ParsedSection::Projects(v) => structured.projects = Some(v),
        }
    }

    Ok(structured)
}

pub fn parse_experience(block: &str) -> Vec<ExperienceEntry> {
    split_entries(block)
        .iter()
        .filter_map(|entry| {
            let lines = entry_lines(entry);
            let (title, rest) = lines.split_first()?;
            let (start_date, end_date) = match distinct_dates(entry).as_slice() {
                [start, end, ..] => (start.clone(), end.clone()),
                [start] => (start.clone(), String::new()),
                [] => (String::new(), String::new()),
            };

            Some(ExperienceEntry {
                title: title.to_string(),
                company: None,
                location: String::new(),
                start_date,
                end_date,
                description: description_of(rest),
                highlights: highlights_of(&lines),
            })
        })
        .collect()
}

pub fn parse_education(block: &str) -> Vec<EducationEntry> {
    split_entries(block)
        .iter()
        .filter_map(|entry| {
            let lines = entry_lines(entry);
            let institution = lines.first()?;
            // A lone date on an education entry is almost always the graduation date.
            let (start_date, end_date) = match distinct_dates(entry).as_slice() {
                [start, end, ..] => (start.clone(), end.clone()),
                [end] => (String::new(), end.clone()),
                [] => (String::new(), String::new()),
            };

            Some(EducationEntry {
                institution: institution.to_string(),
                degree: DEGREE
                    .find(entry)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
                field: None,
                start_date,
                end_date,
                gpa: GPA
                    .captures(entry)
                    .and_then(|caps| caps.get(1))
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
                description: String::new(),
            })
        })
        .collect()
}

/// Two passes feed one de-duplicated list: the known vocabulary first, then
/// free-form items from comma-separated lines.
pub fn parse_skills(block: &str) -> Vec<SkillRecord> {
    let mut skills = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for pattern in known_skills() {
        let Some(m) = pattern.regex.find(block) else {
            continue;
        };
        let key = canonical(m.as_str());
        if seen.insert(key.clone()) {
            skills.push(SkillRecord {
                name: display_name(m.as_str()),
                category: categorize(&key),
            });
        }
    }

    for line in block.lines().filter(|line| line.contains(',')) {
        for part in line.split(',').map(list_item) {
            let len = part.chars().count();
            if len <= MIN_LIST_SKILL_CHARS || len >= MAX_LIST_SKILL_CHARS {
                continue;
            }
            if looks_like_skill(part) && seen.insert(canonical(part)) {
                skills.push(SkillRecord {
                    name: part.to_string(),
                    category: SkillCategory::Other,
                });
            }
        }
    }

    skills
}

pub fn parse_projects(block: &str) -> Vec<ProjectEntry> {
    split_entries(block)
        .iter()
        .filter_map(|entry| {
            let lines = entry_lines(entry);
            let (name, rest) = lines.split_first()?;

            Some(ProjectEntry {
                name: name.to_string(),
                description: description_of(rest),
                url: patterns::URL
                    .find(entry)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
                highlights: highlights_of(&lines),
                technologies: Vec::new(),
            })
        })
        .collect()
}

/// Date tokens of an entry with repeats removed, in document order.
fn distinct_dates(entry: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    patterns::extract_dates(entry)
        .into_iter()
        .filter(|date| seen.insert(date.to_lowercase()))
        .collect()
}

fn is_bullet(line: &str) -> bool {
    line.starts_with(BULLET_GLYPHS)
}

fn highlights_of(lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .filter(|line| is_bullet(line))
        .map(|line| line.trim_start_matches(BULLET_GLYPHS).trim().to_string())
        .collect()
}

fn description_of(lines: &[&str]) -> String {
    lines
        .iter()
        .filter(|line| !is_bullet(line))
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Trims a comma-list item and drops a leading "Label:" so
/// "Languages: Rust" yields "Rust".
fn list_item(raw: &str) -> &str {
    let item = raw.trim();
    match item.rsplit_once(':') {
        Some((_, value)) => value.trim(),
        None => item,
    }
}

/// Crude sentence filter: short, at most three words, and not opening with a
/// capitalized word followed by more text.
fn looks_like_skill(text: &str) -> bool {
    text.chars().count() < MAX_LIST_SKILL_CHARS
        && text.split(' ').count() <= MAX_LIST_SKILL_WORDS
        && !starts_like_sentence(text)
}

fn starts_like_sentence(text: &str) -> bool {
    let mut chars = text.chars();
    if !chars.next().is_some_and(|c| c.is_ascii_uppercase()) {
        return false;
    }
    let rest = chars.as_str();
    let lower_run = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_lowercase()).len();
    lower_run > 0 && rest[lower_run..].starts_with(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::segmenter::segment;

    fn names(skills: &[SkillRecord]) -> Vec<&str> {
        skills.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_experience_scenario() {
        let block = "Senior Software Engineer\nTech Corp Inc.\nJanuary 2020 - Present\n- Led development";
        let entries = parse_experience(block);
        assert_eq!(entries.len(), 1);
        let exp = &entries[0];
        assert_eq!(exp.title, "Senior Software Engineer");
        assert_eq!(exp.start_date, "January 2020");
        assert_eq!(exp.end_date, "Present");
        assert_eq!(exp.highlights, vec!["Led development"]);
        assert_eq!(exp.description, "Tech Corp Inc. January 2020 - Present");
        assert_eq!(exp.company, None);
    }

    #[test]
    fn test_experience_single_date_is_start() {
        let entries = parse_experience("Backend Engineer at Foo\nSince March 2021\n• Shipped billing");
        assert_eq!(entries[0].start_date, "March 2021");
        assert_eq!(entries[0].end_date, "");
        assert_eq!(entries[0].highlights, vec!["Shipped billing"]);
    }

    #[test]
    fn test_experience_multiple_entries() {
        let block = "Staff Engineer, Example Corp\n2019 - 2022\n\nJunior Developer, Startup LLC\n2016 - 2019";
        let entries = parse_experience(block);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].start_date, "2019");
        assert_eq!(entries[0].end_date, "2022");
        assert_eq!(entries[1].title, "Junior Developer, Startup LLC");
        assert_eq!(entries[1].start_date, "2016");
    }

    #[test]
    fn test_education_two_dates() {
        let entries = parse_education("University X\n2016-2020");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].institution, "University X");
        assert_eq!(entries[0].start_date, "2016");
        assert_eq!(entries[0].end_date, "2020");
    }

    #[test]
    fn test_education_single_date_is_end() {
        let entries =
            parse_education("State University\nB.S. in Computer Science, May 2018\nGPA: 3.8");
        let edu = &entries[0];
        assert_eq!(edu.degree, "B.S.");
        assert_eq!(edu.start_date, "");
        assert_eq!(edu.end_date, "May 2018");
        assert_eq!(edu.gpa, "3.8");
        assert_eq!(edu.field, None);
    }

    #[test]
    fn test_skills_scenario() {
        let skills = parse_skills("Programming Languages: JavaScript, TypeScript, Python");
        assert_eq!(names(&skills), vec!["JavaScript", "TypeScript", "Python"]);
        assert!(skills.iter().all(|s| s.category == SkillCategory::Language));
    }

    #[test]
    fn test_skills_list_items_added_as_other() {
        let skills = parse_skills("Docker, Kubernetes, Prometheus, OpenTelemetry");
        assert_eq!(
            names(&skills),
            vec!["Docker", "Kubernetes", "Prometheus", "OpenTelemetry"]
        );
        let prom = skills.iter().find(|s| s.name == "Prometheus").unwrap();
        assert_eq!(prom.category, SkillCategory::Other);
        let docker = skills.iter().find(|s| s.name == "Docker").unwrap();
        assert_eq!(docker.category, SkillCategory::Cloud);
    }

    #[test]
    fn test_skills_sentence_fragments_rejected() {
        let skills = parse_skills(
            "Strong communicator, works well in teams, Terraform, a very long phrase that goes on and on",
        );
        assert_eq!(names(&skills), vec!["Terraform"]);
    }

    #[test]
    fn test_skills_category_follows_table_order() {
        let skills = parse_skills("Django, MongoDB");
        assert_eq!(names(&skills), vec!["Django", "MongoDB"]);
        assert!(skills.iter().all(|s| s.category == SkillCategory::Language));
    }

    #[test]
    fn test_skills_case_insensitive_dedup() {
        let skills = parse_skills("python, PYTHON, Python\nRust");
        assert_eq!(names(&skills), vec!["Python", "Rust"]);
    }

    #[test]
    fn test_projects_fields() {
        let block = "Resume Parser\nRule-based extraction engine\nhttps://github.com/jane/parser\n- 95% field accuracy\n* Zero dependencies on ML";
        let projects = parse_projects(block);
        assert_eq!(projects.len(), 1);
        let p = &projects[0];
        assert_eq!(p.name, "Resume Parser");
        assert_eq!(p.url, "https://github.com/jane/parser");
        assert_eq!(p.highlights, vec!["95% field accuracy", "Zero dependencies on ML"]);
        assert_eq!(
            p.description,
            "Rule-based extraction engine https://github.com/jane/parser"
        );
        assert!(p.technologies.is_empty());
    }

    #[test]
    fn test_parse_section_absent_is_precondition_failure() {
        let sections = segment("Jane Roe\njane@example.com");
        let err = parse_section(&sections, SectionKey::Experience).unwrap_err();
        assert!(matches!(err, ExtractionError::PreconditionFailed(_)));
    }

    #[test]
    fn test_parse_section_without_parser_fails() {
        let sections = segment("Awards\nHackathon winner, Rust Nation 2021");
        let err = parse_section(&sections, SectionKey::Awards).unwrap_err();
        assert!(matches!(err, ExtractionError::PreconditionFailed(_)));
    }

    #[test]
    fn test_structure_sections_only_present_keys() {
        let sections = segment("Jane Roe\nEducation\nUniversity of Somewhere\n2015 - 2019");
        let structured = structure_sections(&sections).unwrap();
        assert!(structured.experience.is_none());
        assert!(structured.skills.is_none());
        assert_eq!(structured.education.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_sentence_heuristic() {
        assert!(starts_like_sentence("Strong communicator"));
        assert!(!starts_like_sentence("GraphQL APIs"));
        assert!(!starts_like_sentence("Grafana"));
        assert!(starts_like_sentence("Grafana Loki"));
        assert!(!starts_like_sentence("rust tooling"));
    }
}

//! Profile Mapper: assembles the APP document from normalized contact
//! entities and structured sections.

use chrono::Utc;

use crate::extraction::entities::ContactEntities;
use crate::extraction::fields::{
    EducationEntry, ExperienceEntry, ProjectEntry, SkillRecord, StructuredSections,
};
use crate::extraction::normalize::normalize_date;
use crate::extraction::patterns::{self, CITY_REGION, GITHUB_URL, LINKEDIN_URL};
use crate::extraction::segmenter::SectionMap;
use crate::models::profile::{
    AppProfile, Basics, Credential, EducationItem, LanguageItem, Location, Metadata,
    ProjectItem, Protocol, SkillItem, SocialProfile, WorkItem,
};
use crate::models::resume::SectionKey;

pub const MAX_SUMMARY_CHARS: usize = 1000;
/// Header lines longer than this read as prose rather than contact details.
const MIN_SUMMARY_LINE_CHARS: usize = 50;

const DEFAULT_SKILL_LEVEL: &str = "intermediate";
const DEFAULT_FLUENCY: &str = "professional";
const CREDENTIAL_KIND: &str = "certification";

pub fn map_to_profile(
    contact: &ContactEntities,
    sections: &SectionMap,
    structured: &StructuredSections,
) -> AppProfile {
    let now = Utc::now();

    AppProfile {
        protocol: Protocol::generate(),
        basics: map_basics(contact, sections),
        experience: structured
            .experience
            .iter()
            .flatten()
            .map(map_experience)
            .collect(),
        education: structured
            .education
            .iter()
            .flatten()
            .map(map_education)
            .collect(),
        skills: structured.skills.iter().flatten().map(map_skill).collect(),
        projects: structured
            .projects
            .iter()
            .flatten()
            .map(map_project)
            .collect(),
        credentials: sections
            .get(SectionKey::Certifications)
            .map(map_credentials)
            .unwrap_or_default(),
        languages: sections
            .get(SectionKey::Languages)
            .map(map_languages)
            .unwrap_or_default(),
        metadata: Metadata::stamped(now),
    }
}

fn map_basics(contact: &ContactEntities, sections: &SectionMap) -> Basics {
    let mut profiles = Vec::new();
    if let Some(url) = &contact.linkedin {
        profiles.push(SocialProfile {
            network: "LinkedIn".to_string(),
            url: url.clone(),
            username: username_from(&LINKEDIN_URL, url),
        });
    }
    if let Some(url) = &contact.github {
        profiles.push(SocialProfile {
            network: "GitHub".to_string(),
            url: url.clone(),
            username: username_from(&GITHUB_URL, url),
        });
    }

    Basics {
        name: contact.name.clone().unwrap_or_default(),
        email: contact.email.clone().unwrap_or_default(),
        phone: contact.phone.clone().unwrap_or_default(),
        url: contact
            .website
            .as_ref()
            .or(contact.linkedin.as_ref())
            .cloned()
            .unwrap_or_default(),
        summary: summary_from(sections),
        location: contact.location.as_deref().map(map_location),
        profiles,
    }
}

fn username_from(re: &regex::Regex, url: &str) -> String {
    re.captures(url)
        .and_then(|caps| caps.name("username"))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// The summary section verbatim, or else the prose lines of the header.
fn summary_from(sections: &SectionMap) -> Option<String> {
    if let Some(summary) = sections.get(SectionKey::Summary) {
        return Some(truncate(summary, MAX_SUMMARY_CHARS));
    }

    let prose: Vec<&str> = sections
        .get(SectionKey::Header)?
        .lines()
        .map(str::trim)
        .filter(|line| {
            line.chars().count() > MIN_SUMMARY_LINE_CHARS && !patterns::is_contact_line(line)
        })
        .collect();

    if prose.is_empty() {
        None
    } else {
        Some(truncate(&prose.join(" "), MAX_SUMMARY_CHARS))
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn map_location(address: &str) -> Location {
    let caps = CITY_REGION.captures(address);
    Location {
        address: address.to_string(),
        city: caps
            .as_ref()
            .and_then(|c| c.name("city"))
            .map(|m| m.as_str().to_string()),
        region: caps
            .as_ref()
            .and_then(|c| c.name("region"))
            .map(|m| m.as_str().to_string()),
    }
}

fn map_experience(exp: &ExperienceEntry) -> WorkItem {
    WorkItem {
        title: exp.title.clone(),
        company: exp.company.clone().unwrap_or_default(),
        location: exp.location.clone(),
        start_date: normalize_date(&exp.start_date),
        end_date: normalize_date(&exp.end_date),
        summary: exp.description.clone(),
        highlights: exp.highlights.clone(),
    }
}

fn map_education(edu: &EducationEntry) -> EducationItem {
    EducationItem {
        institution: edu.institution.clone(),
        study_type: edu.degree.clone(),
        area: edu.field.clone().unwrap_or_default(),
        start_date: normalize_date(&edu.start_date),
        end_date: normalize_date(&edu.end_date),
        score: edu.gpa.clone(),
        courses: Vec::new(),
    }
}

fn map_skill(skill: &SkillRecord) -> SkillItem {
    SkillItem {
        name: skill.name.clone(),
        level: DEFAULT_SKILL_LEVEL.to_string(),
        keywords: vec![skill.name.clone()],
        category: skill.category,
    }
}

fn map_project(project: &ProjectEntry) -> ProjectItem {
    ProjectItem {
        name: project.name.clone(),
        description: project.description.clone(),
        url: project.url.clone(),
        highlights: project.highlights.clone(),
        keywords: project.technologies.clone(),
    }
}

/// One credential per non-blank line of the certifications block.
fn map_credentials(block: &str) -> Vec<Credential> {
    block
        .lines()
        .map(strip_bullet)
        .filter(|line| !line.is_empty())
        .map(|line| Credential {
            kind: CREDENTIAL_KIND.to_string(),
            name: line.to_string(),
            issuer: String::new(),
            date: patterns::extract_dates(line)
                .first()
                .map(|d| normalize_date(d))
                .unwrap_or_default(),
        })
        .collect()
}

/// Languages listed one per line or comma-separated, with an optional
/// fluency in parentheses or after a dash/colon: "Spanish (Fluent)",
/// "German - Basic".
fn map_languages(block: &str) -> Vec<LanguageItem> {
    block
        .lines()
        .map(strip_bullet)
        .flat_map(|line| line.split(','))
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            let (language, fluency) = split_fluency(item);
            LanguageItem {
                language: language.to_string(),
                fluency: fluency.unwrap_or(DEFAULT_FLUENCY).to_string(),
            }
        })
        .collect()
}

fn split_fluency(item: &str) -> (&str, Option<&str>) {
    if let Some((language, rest)) = item.split_once('(') {
        let fluency = rest.trim_end_matches(')').trim();
        return (language.trim(), Some(fluency).filter(|f| !f.is_empty()));
    }
    for separator in [" - ", " – ", ":"] {
        if let Some((language, fluency)) = item.split_once(separator) {
            let fluency = fluency.trim();
            return (language.trim(), Some(fluency).filter(|f| !f.is_empty()));
        }
    }
    (item, None)
}

fn strip_bullet(line: &str) -> &str {
    line.trim().trim_start_matches(['-', '•', '*']).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::fields::structure_sections;
    use crate::extraction::segmenter::segment;
    use crate::models::resume::SkillCategory;

    fn contact() -> ContactEntities {
        ContactEntities {
            name: Some("John Doe".to_string()),
            email: Some("john.doe@example.com".to_string()),
            phone: Some("5551234567".to_string()),
            location: Some("Austin, TX".to_string()),
            linkedin: Some("https://linkedin.com/in/johndoe".to_string()),
            github: Some("https://github.com/jdoe".to_string()),
            website: None,
        }
    }

    fn build(text: &str, contact: &ContactEntities) -> AppProfile {
        let sections = segment(text);
        let structured = structure_sections(&sections).unwrap();
        map_to_profile(contact, &sections, &structured)
    }

    #[test]
    fn test_basics_and_profiles() {
        let profile = build("John Doe", &contact());
        let basics = &profile.basics;
        assert_eq!(basics.email, "john.doe@example.com");
        assert_eq!(basics.url, "https://linkedin.com/in/johndoe");
        assert_eq!(basics.profiles.len(), 2);
        assert_eq!(basics.profiles[0].network, "LinkedIn");
        assert_eq!(basics.profiles[0].username, "johndoe");
        assert_eq!(basics.profiles[1].network, "GitHub");
        assert_eq!(basics.profiles[1].username, "jdoe");
        let location = basics.location.as_ref().unwrap();
        assert_eq!(location.city.as_deref(), Some("Austin"));
        assert_eq!(location.region.as_deref(), Some("TX"));
    }

    #[test]
    fn test_website_preferred_over_linkedin() {
        let mut c = contact();
        c.website = Some("https://johndoe.dev".to_string());
        assert_eq!(build("", &c).basics.url, "https://johndoe.dev");
    }

    #[test]
    fn test_summary_section_truncated() {
        let long = "x".repeat(MAX_SUMMARY_CHARS + 200);
        let profile = build(&format!("Summary\n{long}"), &contact());
        assert_eq!(
            profile.basics.summary.map(|s| s.chars().count()),
            Some(MAX_SUMMARY_CHARS)
        );
    }

    #[test]
    fn test_summary_synthesized_from_header_prose() {
        let text = "John Doe\n\
            john.doe@example.com | (555) 123-4567\n\
            Backend engineer with a decade of shipping reliable payment systems at scale";
        let profile = build(text, &contact());
        assert_eq!(
            profile.basics.summary.as_deref(),
            Some("Backend engineer with a decade of shipping reliable payment systems at scale")
        );
    }

    #[test]
    fn test_no_summary_when_header_is_short() {
        let profile = build("John Doe\njohn.doe@example.com", &ContactEntities::default());
        assert_eq!(profile.basics.summary, None);
        assert_eq!(profile.basics.location, None);
        assert!(profile.basics.profiles.is_empty());
    }

    #[test]
    fn test_field_renames_and_dates() {
        let text = "Experience\n\
            Senior Software Engineer\n\
            January 2020 - Present\n\
            - Led development\n\
            Education\n\
            State University\n\
            B.S. Computer Science 2014 - 2018\n\
            GPA: 3.9";
        let profile = build(text, &contact());

        let work = &profile.experience[0];
        assert_eq!(work.start_date, "2020-01");
        assert_eq!(work.end_date, "Present");
        assert_eq!(work.company, "");
        assert_eq!(work.summary, "January 2020 - Present");

        let edu = &profile.education[0];
        assert_eq!(edu.study_type, "B.S.");
        assert_eq!(edu.score, "3.9");
        assert_eq!(edu.start_date, "2014");
        assert_eq!(edu.end_date, "2018");
        assert!(edu.courses.is_empty());
    }

    #[test]
    fn test_skills_carry_level_and_keywords() {
        let profile = build("Skills\nRust, PostgreSQL, Kubernetes", &contact());
        let rust = profile.skills.iter().find(|s| s.name == "Rust").unwrap();
        assert_eq!(rust.level, "intermediate");
        assert_eq!(rust.keywords, vec!["Rust"]);
        assert_eq!(rust.category, SkillCategory::Language);
    }

    #[test]
    fn test_credentials_and_languages() {
        let text = "Certifications\n\
            - AWS Certified Solutions Architect, March 2021\n\
            Languages\n\
            English (Native), Spanish - Fluent\n\
            German";
        let profile = build(text, &contact());

        assert_eq!(profile.credentials.len(), 1);
        assert_eq!(profile.credentials[0].kind, "certification");
        assert_eq!(profile.credentials[0].date, "2021-03");

        let langs: Vec<_> = profile
            .languages
            .iter()
            .map(|l| (l.language.as_str(), l.fluency.as_str()))
            .collect();
        assert_eq!(
            langs,
            vec![
                ("English", "Native"),
                ("Spanish", "Fluent"),
                ("German", "professional")
            ]
        );
    }

    #[test]
    fn test_no_null_top_level_keys() {
        let profile = build("", &ContactEntities::default());
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.as_object().unwrap().values().all(|v| !v.is_null()));
        let basics = json["basics"].as_object().unwrap();
        assert!(basics.values().all(|v| !v.is_null()));
    }
}

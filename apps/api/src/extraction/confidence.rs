use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::models::profile::{AppProfile, Basics};

/// Per-section scores in `0..=100` plus the weighted overall score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceReport {
    pub basics: u32,
    pub experience: u32,
    pub education: u32,
    pub skills: u32,
    pub projects: u32,
    pub overall: u32,
    /// `basics.<field>` → 100 or 0 for each basics field, then one entry per
    /// array section holding its score.
    pub breakdown: IndexMap<String, u32>,
}

/// Points per basics field; sums to 100.
const BASICS_POINTS: &[(&str, u32)] = &[
    ("name", 30),
    ("email", 25),
    ("phone", 15),
    ("url", 10),
    ("summary", 10),
    ("location", 5),
    ("profiles", 5),
];

const SECTION_WEIGHTS: &[(&str, f64)] = &[
    ("basics", 0.35),
    ("experience", 0.25),
    ("education", 0.15),
    ("skills", 0.15),
    ("projects", 0.10),
];

const FIELD_PRESENT: u32 = 100;

/// Projects score when there are none; missing projects is a mild signal.
const PROJECTS_FLOOR: u32 = 20;
const MAX_SCORE: u32 = 100;

pub fn score_confidence(profile: &AppProfile) -> ConfidenceReport {
    let mut breakdown = IndexMap::new();
    let mut basics = 0;
    for (field, points) in BASICS_POINTS {
        let present = basics_field_present(&profile.basics, field);
        if present {
            basics += points;
        }
        breakdown.insert(
            format!("basics.{field}"),
            if present { FIELD_PRESENT } else { 0 },
        );
    }

    let experience = count_score(profile.experience.len(), 30, 15, 0);
    let education = count_score(profile.education.len(), 40, 20, 0);
    let skills = count_score(profile.skills.len(), 0, 5, 0);
    let projects = count_score(profile.projects.len(), 30, 20, PROJECTS_FLOOR);
    for (section, score) in [
        ("experience", experience),
        ("education", education),
        ("skills", skills),
        ("projects", projects),
    ] {
        breakdown.insert(section.to_string(), score);
    }

    let overall = SECTION_WEIGHTS
        .iter()
        .map(|(section, weight)| {
            let score = match *section {
                "basics" => basics,
                "experience" => experience,
                "education" => education,
                "skills" => skills,
                "projects" => projects,
                _ => 0,
            };
            f64::from(score) * weight
        })
        .sum::<f64>()
        .round() as u32;

    ConfidenceReport {
        basics,
        experience,
        education,
        skills,
        projects,
        overall: overall.min(MAX_SCORE),
        breakdown,
    }
}

fn basics_field_present(basics: &Basics, field: &str) -> bool {
    match field {
        "name" => !basics.name.is_empty(),
        "email" => !basics.email.is_empty(),
        "phone" => !basics.phone.is_empty(),
        "url" => !basics.url.is_empty(),
        "summary" => basics.summary.as_deref().is_some_and(|s| !s.is_empty()),
        "location" => basics.location.is_some(),
        "profiles" => !basics.profiles.is_empty(),
        _ => false,
    }
}

/// `base + per_entry * count`, capped at 100; `empty` when there are no entries.
fn count_score(count: usize, base: u32, per_entry: u32, empty: u32) -> u32 {
    if count == 0 {
        return empty;
    }
    let count = u32::try_from(count).unwrap_or(u32::MAX);
    per_entry
        .saturating_mul(count)
        .saturating_add(base)
        .min(MAX_SCORE)
}

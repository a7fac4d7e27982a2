//! Entity Extractor: contact facts scanned from the whole document,
//! independent of section boundaries.

use serde::{Deserialize, Serialize};

use crate::extraction::patterns::{self, CITY_REGION, EMAIL, PERSON_NAME, PHONE};

/// Only the top of the document is searched for the candidate's name.
const NAME_SCAN_LINES: usize = 5;
const MIN_NAME_CHARS: usize = 3;
const MAX_NAME_CHARS: usize = 50;

const EMAIL_CONFIDENCE: f32 = 0.95;
const PHONE_CONFIDENCE: f32 = 0.85;
const SOCIAL_CONFIDENCE: f32 = 0.90;
const WEBSITE_CONFIDENCE: f32 = 0.80;
const NAME_CONFIDENCE: f32 = 0.75;
const LOCATION_CONFIDENCE: f32 = 0.70;

/// Atomic contact facts. Every field is optional; absence of a match is not
/// an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactEntities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Name,
    Email,
    Phone,
    Location,
    Linkedin,
    Github,
    Website,
}

/// One recognizer hit with the fixed confidence of the recognizer that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityEvidence {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub raw_value: String,
    pub confidence: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedEntities {
    pub contact: ContactEntities,
    pub evidence: Vec<EntityEvidence>,
}

impl ExtractedEntities {
    fn record(&mut self, kind: EntityKind, raw_value: &str, confidence: f32) {
        self.evidence.push(EntityEvidence {
            kind,
            raw_value: raw_value.to_string(),
            confidence,
        });
    }
}

/// Scans `text` for contact entities. Values are returned exactly as they
/// appear, except the e-mail which is lower-cased; cleanup is left to the
/// normalizer.
pub fn extract_entities(text: &str) -> ExtractedEntities {
    let mut out = ExtractedEntities::default();

    if let Some(m) = EMAIL.find(text) {
        out.contact.email = Some(m.as_str().to_lowercase());
        out.record(EntityKind::Email, m.as_str(), EMAIL_CONFIDENCE);
    }

    if let Some(m) = PHONE.find(text) {
        let phone = m.as_str().trim();
        out.contact.phone = Some(phone.to_string());
        out.record(EntityKind::Phone, phone, PHONE_CONFIDENCE);
    }

    for url in patterns::find_urls(text) {
        let lower = url.to_lowercase();
        if lower.contains("linkedin.com") {
            out.contact.linkedin.get_or_insert_with(|| url.to_string());
            out.record(EntityKind::Linkedin, url, SOCIAL_CONFIDENCE);
        } else if lower.contains("github.com") {
            out.contact.github.get_or_insert_with(|| url.to_string());
            out.record(EntityKind::Github, url, SOCIAL_CONFIDENCE);
        } else if out.contact.website.is_none() {
            out.contact.website = Some(url.to_string());
            out.record(EntityKind::Website, url, WEBSITE_CONFIDENCE);
        }
    }

    if let Some(name) = find_name(text) {
        out.contact.name = Some(name.to_string());
        out.record(EntityKind::Name, name, NAME_CONFIDENCE);
    }

    if let Some(m) = CITY_REGION.find(text) {
        out.contact.location = Some(m.as_str().to_string());
        out.record(EntityKind::Location, m.as_str(), LOCATION_CONFIDENCE);
    }

    out
}

fn find_name(text: &str) -> Option<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(NAME_SCAN_LINES)
        .find(|line| {
            let len = line.chars().count();
            len > MIN_NAME_CHARS
                && len < MAX_NAME_CHARS
                && PERSON_NAME.is_match(line)
                && !patterns::is_contact_line(line)
        })
}

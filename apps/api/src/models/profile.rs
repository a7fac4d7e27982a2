//! Applicant Profile Protocol (APP) document model.
//!
//! Field names serialize in camelCase to match the published protocol shape.
//! Optional values that were never found are skipped instead of emitted as `null`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::resume::SkillCategory;

pub const PROTOCOL_NAME: &str = "ApplicantProfileProtocol";
pub const PROTOCOL_SHORT_NAME: &str = "APP";
pub const PROTOCOL_VERSION: &str = "1.0.0";
pub const PROTOCOL_URI: &str = "https://app-protocol.org";
pub const METADATA_SOURCE: &str = "pdf-extractor";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppProfile {
    pub protocol: Protocol,
    pub basics: Basics,
    #[serde(default)]
    pub experience: Vec<WorkItem>,
    #[serde(default)]
    pub education: Vec<EducationItem>,
    #[serde(default)]
    pub skills: Vec<SkillItem>,
    #[serde(default)]
    pub projects: Vec<ProjectItem>,
    #[serde(default)]
    pub credentials: Vec<Credential>,
    #[serde(default)]
    pub languages: Vec<LanguageItem>,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Protocol {
    pub name: String,
    pub short_name: String,
    pub version: String,
    pub uri: String,
    pub id: Uuid,
}

impl Protocol {
    /// Protocol header with a freshly generated document id.
    pub fn generate() -> Self {
        Self {
            name: PROTOCOL_NAME.to_string(),
            short_name: PROTOCOL_SHORT_NAME.to_string(),
            version: PROTOCOL_VERSION.to_string(),
            uri: PROTOCOL_URI.to_string(),
            id: Uuid::new_v4(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Basics {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default)]
    pub profiles: Vec<SocialProfile>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialProfile {
    pub network: String,
    pub url: String,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    pub title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub summary: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationItem {
    pub institution: String,
    pub study_type: String,
    pub area: String,
    pub start_date: String,
    pub end_date: String,
    pub score: String,
    #[serde(default)]
    pub courses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillItem {
    pub name: String,
    pub level: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub category: SkillCategory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectItem {
    pub name: String,
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub issuer: String,
    #[serde(default)]
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageItem {
    pub language: String,
    pub fluency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub source: String,
    pub version: String,
}

impl Metadata {
    pub fn stamped(now: DateTime<Utc>) -> Self {
        Self {
            created_at: now,
            updated_at: now,
            source: METADATA_SOURCE.to_string(),
            version: PROTOCOL_VERSION.to_string(),
        }
    }
}

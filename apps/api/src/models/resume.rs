use serde::{Deserialize, Serialize};

/// Labeled region of a resume. `Header` collects everything before the first
/// recognized heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    Header,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Languages,
    Summary,
    Awards,
    Publications,
    Volunteer,
}

impl SectionKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Header => "header",
            SectionKey::Experience => "experience",
            SectionKey::Education => "education",
            SectionKey::Skills => "skills",
            SectionKey::Projects => "projects",
            SectionKey::Certifications => "certifications",
            SectionKey::Languages => "languages",
            SectionKey::Summary => "summary",
            SectionKey::Awards => "awards",
            SectionKey::Publications => "publications",
            SectionKey::Volunteer => "volunteer",
        }
    }
}

/// Coarse technology bucket attached to every extracted skill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Language,
    Frontend,
    Backend,
    Database,
    Cloud,
    Tool,
    #[default]
    Other,
}

//! End-to-end extraction: raw text in, APP document plus diagnostics out.
//!
//! Synchronous and stateless; concurrent calls share only the compiled
//! recognizers. Logging carries counts and scores, never resume text.

use serde::Serialize;
use tracing::{debug, info};

use crate::errors::ExtractionError;
use crate::extraction::confidence::{score_confidence, ConfidenceReport};
use crate::extraction::entities::{extract_entities, ExtractedEntities};
use crate::extraction::fields::structure_sections;
use crate::extraction::mapper::map_to_profile;
use crate::extraction::normalize::normalize;
use crate::extraction::segmenter::{segment, SectionMap};
use crate::extraction::validation::{ProfileValidator, ValidationReport};
use crate::models::profile::AppProfile;

#[derive(Debug, Clone, Serialize)]
pub struct ProcessingResult {
    pub sections: SectionMap,
    pub entities: ExtractedEntities,
    pub profile: AppProfile,
    pub validation: ValidationReport,
    pub confidence: ConfidenceReport,
}

pub fn process(
    text: &str,
    validator: &dyn ProfileValidator,
) -> Result<ProcessingResult, ExtractionError> {
    if text.trim().is_empty() {
        return Err(ExtractionError::InvalidInput(
            "resume text is empty".to_string(),
        ));
    }

    let sections = segment(text);
    let keys: Vec<&str> = sections.keys().map(|k| k.as_str()).collect();
    debug!(sections = sections.len(), ?keys, "Segmented resume text");

    let structured = structure_sections(&sections)?;

    let entities = extract_entities(text);
    debug!(evidence = entities.evidence.len(), "Extracted contact entities");

    let contact = normalize(&entities.contact);
    let profile = map_to_profile(&contact, &sections, &structured);

    let validation = validator.validate(&profile);
    if !validation.valid {
        info!(
            validator = validator.name(),
            errors = validation.errors.len(),
            "Profile failed validation; returning best-effort result"
        );
    }

    let confidence = score_confidence(&profile);
    info!(
        experience = profile.experience.len(),
        education = profile.education.len(),
        skills = profile.skills.len(),
        projects = profile.projects.len(),
        overall = confidence.overall,
        "Extracted profile"
    );

    Ok(ProcessingResult {
        sections,
        entities,
        profile,
        validation,
        confidence,
    })
}

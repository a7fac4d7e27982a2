//! Schema Validator: pluggable check of an assembled APP document.
//!
//! Default: `StructuralValidator` (required protocol fields, e-mail shape,
//! missing-contact warnings). A failing report never discards the profile;
//! callers return it alongside the document.
//!
//! `AppState` holds an `Arc<dyn ProfileValidator>`.

use serde::{Deserialize, Serialize};

use crate::extraction::patterns::EMAIL;
use crate::models::profile::AppProfile;

// ────────────────────────────────────────────────────────────────────────────
// Report models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(path: &str, message: &str) -> Self {
        Self {
            path: path.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn from_issues(errors: Vec<ValidationIssue>, warnings: Vec<ValidationIssue>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to plug in a stricter schema check without touching the
/// pipeline or handlers.
pub trait ProfileValidator: Send + Sync {
    fn validate(&self, profile: &AppProfile) -> ValidationReport;

    /// Backend identifier, logged with each validation.
    fn name(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// StructuralValidator
// ────────────────────────────────────────────────────────────────────────────

pub struct StructuralValidator;

impl ProfileValidator for StructuralValidator {
    fn validate(&self, profile: &AppProfile) -> ValidationReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if profile.protocol.name.trim().is_empty() {
            errors.push(ValidationIssue::new("protocol.name", "Missing protocol.name"));
        }
        if profile.protocol.id.is_nil() {
            errors.push(ValidationIssue::new("protocol.id", "Missing protocol.id"));
        }

        let basics = &profile.basics;
        if basics.name.trim().is_empty() {
            warnings.push(ValidationIssue::new("basics.name", "Missing basics.name"));
        }
        if basics.email.trim().is_empty() {
            warnings.push(ValidationIssue::new("basics.email", "Missing basics.email"));
        } else if !is_email(&basics.email) {
            errors.push(ValidationIssue::new(
                "basics.email",
                "basics.email is not a valid e-mail address",
            ));
        }

        ValidationReport::from_issues(errors, warnings)
    }

    fn name(&self) -> &'static str {
        "structural"
    }
}

/// The whole value must be a single address, not merely contain one.
fn is_email(value: &str) -> bool {
    let value = value.trim();
    EMAIL
        .find(value)
        .is_some_and(|m| m.start() == 0 && m.end() == value.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{Basics, Metadata, Protocol};
    use chrono::Utc;
    use uuid::Uuid;

    fn profile(name: &str, email: &str) -> AppProfile {
        AppProfile {
            protocol: Protocol::generate(),
            basics: Basics {
                name: name.to_string(),
                email: email.to_string(),
                ..Default::default()
            },
            experience: vec![],
            education: vec![],
            skills: vec![],
            projects: vec![],
            credentials: vec![],
            languages: vec![],
            metadata: Metadata::stamped(Utc::now()),
        }
    }

    #[test]
    fn test_complete_profile_is_valid() {
        let report = StructuralValidator.validate(&profile("Jane Roe", "jane@example.com"));
        assert!(report.valid);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_missing_contact_only_warns() {
        let report = StructuralValidator.validate(&profile("", ""));
        assert!(report.valid);
        let paths: Vec<_> = report.warnings.iter().map(|w| w.path.as_str()).collect();
        assert_eq!(paths, vec!["basics.name", "basics.email"]);
    }

    #[test]
    fn test_missing_protocol_fields_are_errors() {
        let mut p = profile("Jane Roe", "jane@example.com");
        p.protocol.name = String::new();
        p.protocol.id = Uuid::nil();
        let report = StructuralValidator.validate(&p);
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn test_malformed_email_is_an_error() {
        let report = StructuralValidator.validate(&profile("Jane Roe", "not-an-email"));
        assert!(!report.valid);
        assert_eq!(report.errors[0].path, "basics.email");

        let report =
            StructuralValidator.validate(&profile("Jane Roe", "jane@example.com and more"));
        assert!(!report.valid);
    }
}

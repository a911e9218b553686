//! Consistency checks for game-system definitions and character records.
//!
//! Definitions must be internally consistent before they enter a catalog:
//! every skill names an attribute the system defines, and no name is both an
//! attribute and a skill. Character records are checked against their
//! system so stray keys show up as warnings instead of silently rolling as 0.

use std::collections::HashSet;

use crate::rules::GameSystemDefinition;
use crate::sheet::CharacterRecord;

/// A warning or error found during validation.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// What the issue was found on (system key or character name).
    pub subject: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}: {}", self.subject, self.message)
    }
}

/// Validate a definition's internal consistency.
pub fn validate_definition(definition: &GameSystemDefinition) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let subject = format!("system '{}'", definition.key);
    let mut push = |message: String, is_error: bool| {
        issues.push(ValidationIssue {
            subject: subject.clone(),
            message,
            is_error,
        });
    };

    if definition.attributes.is_empty() {
        push("no attributes defined".to_string(), true);
    }

    let mut seen = HashSet::new();
    for attr in &definition.attributes {
        if attr.is_empty() {
            push("empty attribute name".to_string(), true);
        } else if !seen.insert(attr.as_str()) {
            push(format!("attribute '{attr}' is listed twice"), true);
        }
    }

    for (skill, attr) in &definition.skills {
        if !definition.is_attribute(attr) {
            push(
                format!("skill '{skill}' refers to unknown attribute '{attr}'"),
                true,
            );
        }
        if definition.is_attribute(skill) {
            push(
                format!("'{skill}' is both an attribute and a skill"),
                true,
            );
        }
    }

    if definition.skills.is_empty() {
        push("no skills defined".to_string(), false);
    }

    issues
}

/// Validate a character record against the system it is rolled in.
pub fn validate_character(
    definition: &GameSystemDefinition,
    character: &CharacterRecord,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut push = |message: String, is_error: bool| {
        issues.push(ValidationIssue {
            subject: character.name.clone(),
            message,
            is_error,
        });
    };

    if !character.system.eq_ignore_ascii_case(&definition.key) {
        push(
            format!(
                "record belongs to system '{}', not '{}'",
                character.system, definition.key
            ),
            true,
        );
    }

    for attr in character.attributes.keys() {
        if !definition.is_attribute(&crate::rules::normalize_key(attr)) {
            push(
                format!("unknown attribute '{attr}' in system '{}'", definition.key),
                false,
            );
        }
    }

    for attr in &definition.attributes {
        if character.attribute_score(attr).is_none() {
            push(format!("attribute '{attr}' is missing, rolls as 0"), false);
        }
    }

    let skill_keys = character
        .skills
        .keys()
        .chain(character.skill_proficiency.keys());
    for skill in skill_keys {
        if definition
            .skill_attribute(&crate::rules::normalize_key(skill))
            .is_none()
        {
            push(
                format!("unknown skill '{skill}' in system '{}'", definition.key),
                false,
            );
        }
    }

    issues
}

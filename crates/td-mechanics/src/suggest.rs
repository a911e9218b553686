//! Autocomplete choices for check names.

use serde::{Deserialize, Serialize};

use crate::rules::GameSystemDefinition;

/// Most choices a single suggestion list returns.
pub const MAX_CHOICES: usize = 25;

/// One autocomplete entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Label shown to the user.
    pub name: String,
    /// Value submitted when the choice is picked.
    pub value: String,
}

impl Choice {
    /// Create a choice.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Turn a key into a label: `sleight_of_hand` becomes `Sleight of hand`.
pub fn display_name(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Keep choices whose label or value contains `typed` (case-insensitive),
/// capped at [`MAX_CHOICES`].
pub fn filter_choices(choices: Vec<Choice>, typed: &str) -> Vec<Choice> {
    let typed = typed.trim().to_lowercase();
    choices
        .into_iter()
        .filter(|c| {
            typed.is_empty()
                || c.name.to_lowercase().contains(&typed)
                || c.value.to_lowercase().contains(&typed)
        })
        .take(MAX_CHOICES)
        .collect()
}

/// Attribute and skill choices for a system, sorted by label.
pub fn check_choices(definition: &GameSystemDefinition, typed: &str) -> Vec<Choice> {
    let mut choices: Vec<Choice> = definition
        .attributes
        .iter()
        .map(|a| Choice::new(format!("Attribute: {}", display_name(a)), a.clone()))
        .chain(
            definition
                .skills
                .keys()
                .map(|s| Choice::new(format!("Skill: {}", display_name(s)), s.clone())),
        )
        .collect();
    choices.sort_by(|a, b| a.name.cmp(&b.name));
    filter_choices(choices, typed)
}

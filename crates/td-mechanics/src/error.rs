//! Error types for the mechanics engine.

/// Errors that can occur during mechanics operations.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// The game-system catalog could not be read or parsed.
    #[error("cannot load game systems: {0}")]
    CatalogLoad(String),

    /// A game-system definition failed validation.
    #[error("invalid game system '{system}': {reason}")]
    InvalidDefinition {
        /// Key of the offending system.
        system: String,
        /// Why the definition was rejected.
        reason: String,
    },

    /// The requested system key is not in the catalog.
    #[error("unknown game system '{key}' (available: {})", available.join(", "))]
    UnknownSystem {
        /// The key that was requested.
        key: String,
        /// Keys that do exist.
        available: Vec<String>,
    },

    /// The requested check matches neither an attribute nor a skill.
    #[error(
        "unknown check '{requested}' (normalized: {normalized}) for {system}\n  attributes: {}\n  skills: {}{}",
        list_or_none(attributes),
        list_or_none(skills),
        suggestion.as_ref().map(|s| format!("\n  did you mean '{s}'?")).unwrap_or_default()
    )]
    UnknownCheck {
        /// The check name as the caller typed it.
        requested: String,
        /// The normalized lookup key.
        normalized: String,
        /// Display name of the game system.
        system: String,
        /// Valid attribute keys.
        attributes: Vec<String>,
        /// Valid skill keys.
        skills: Vec<String>,
        /// Closest known check name, if any is close enough.
        suggestion: Option<String>,
    },

    /// A dice expression does not match `[N]dM[+|-K]`.
    #[error("invalid dice expression '{0}': use [N]dM[+|-K], e.g. 1d20, 2d6+3")]
    InvalidDiceExpression(String),

    /// A dice expression is well-formed but outside the allowed bounds.
    #[error("dice out of range in '{expression}': {reason}")]
    DiceCountOutOfRange {
        /// The offending expression.
        expression: String,
        /// Which bound was violated.
        reason: String,
    },

    /// The die size is not in the caller's allow-list.
    #[error("d{sides} is not allowed here (allowed: {})", allowed.iter().map(|s| format!("d{s}")).collect::<Vec<_>>().join(", "))]
    UnsupportedDie {
        /// The requested number of sides.
        sides: u32,
        /// Allowed die sizes.
        allowed: Vec<u32>,
    },
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none defined".to_string()
    } else {
        items.join(", ")
    }
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_check_lists_everything() {
        let err = MechError::UnknownCheck {
            requested: "Sneaky Stuff".to_string(),
            normalized: "sneaky_stuff".to_string(),
            system: "D&D 5e".to_string(),
            attributes: vec!["str".to_string(), "dex".to_string()],
            skills: vec!["stealth".to_string()],
            suggestion: None,
        };
        let msg = err.to_string();
        assert!(msg.contains("'Sneaky Stuff'"));
        assert!(msg.contains("normalized: sneaky_stuff"));
        assert!(msg.contains("attributes: str, dex"));
        assert!(msg.contains("skills: stealth"));
        assert!(!msg.contains("did you mean"));
    }

    #[test]
    fn unknown_check_with_suggestion() {
        let err = MechError::UnknownCheck {
            requested: "stelth".to_string(),
            normalized: "stelth".to_string(),
            system: "D&D 5e".to_string(),
            attributes: vec![],
            skills: vec!["stealth".to_string()],
            suggestion: Some("stealth".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("attributes: none defined"));
        assert!(msg.contains("did you mean 'stealth'?"));
    }

    #[test]
    fn unsupported_die_lists_allowed() {
        let err = MechError::UnsupportedDie {
            sides: 7,
            allowed: vec![4, 6],
        };
        assert_eq!(err.to_string(), "d7 is not allowed here (allowed: d4, d6)");
    }
}

//! The list of known dice styles and the rule for which one applies.

use std::path::Path;

use td_mechanics::CharacterRecord;

use crate::config::DEFAULT_DICE_STYLE;
use crate::error::{StoreError, StoreResult};
use crate::fsutil;
use crate::settings::GroupSettings;

/// Dice styles that have face images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceStyles {
    names: Vec<String>,
}

impl Default for DiceStyles {
    fn default() -> Self {
        Self {
            names: vec![DEFAULT_DICE_STYLE.to_string()],
        }
    }
}

impl DiceStyles {
    /// Build from a list of names.
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Read the style list (a JSON array of names). A missing file yields the
    /// default style only.
    pub fn load(path: &Path) -> StoreResult<Self> {
        match fsutil::read_json::<Vec<String>>(path)? {
            Some(names) => Ok(Self::new(names)),
            None => {
                tracing::debug!(path = %path.display(), "no dice style list, using default");
                Ok(Self::default())
            }
        }
    }

    /// Known style names.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Whether a style is known.
    pub fn contains(&self, style: &str) -> bool {
        self.names.iter().any(|n| n == style)
    }

    /// Accept a known style, reject anything else.
    pub fn validate(&self, style: &str) -> StoreResult<()> {
        if self.contains(style) {
            Ok(())
        } else {
            Err(StoreError::UnknownDiceStyle {
                style: style.to_string(),
                available: self.names.clone(),
            })
        }
    }
}

/// The style to render with: the character's own, then the group's, then
/// `default`.
pub fn effective_style(
    character: Option<&CharacterRecord>,
    group: &GroupSettings,
    default: &str,
) -> String {
    character
        .and_then(|c| c.dice_style.clone())
        .or_else(|| group.dice_style.clone())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_has_default_style() {
        let dir = TempDir::new().unwrap();
        let styles = DiceStyles::load(&dir.path().join("dice_styles.json")).unwrap();
        assert_eq!(styles.names(), [DEFAULT_DICE_STYLE.to_string()]);
    }

    #[test]
    fn loads_and_validates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dice_styles.json");
        std::fs::write(&path, r#"["gold", "obsidian"]"#).unwrap();
        let styles = DiceStyles::load(&path).unwrap();
        assert!(styles.validate("gold").is_ok());

        let err = styles.validate("pink").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown dice style 'pink' (available: gold, obsidian)"
        );
    }

    #[test]
    fn character_style_wins() {
        let mut record = CharacterRecord::new("Garra", "dnd5e");
        record.dice_style = Some("gold".to_string());
        let group = GroupSettings {
            dice_style: Some("obsidian".to_string()),
            ..GroupSettings::default()
        };
        assert_eq!(effective_style(Some(&record), &group, "plain"), "gold");
    }

    #[test]
    fn group_style_then_default() {
        let record = CharacterRecord::new("Garra", "dnd5e");
        let group = GroupSettings {
            dice_style: Some("obsidian".to_string()),
            ..GroupSettings::default()
        };
        assert_eq!(effective_style(Some(&record), &group, "plain"), "obsidian");
        assert_eq!(effective_style(None, &GroupSettings::default(), "plain"), "plain");
    }
}

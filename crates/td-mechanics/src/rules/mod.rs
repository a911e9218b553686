//! Game-system definitions: attributes, skills, and the math that ties them.
//!
//! A [`GameSystemDefinition`] carries everything the check resolver needs to
//! know about a rule system. Systems differ only in data: the
//! [`ModifierFormula`] turns a raw attribute score into a bonus and the
//! [`SkillComposition`] combines that bonus with skill levels and
//! proficiency. Adding a new system means adding a definition, never code.
//!
//! Definitions are usually loaded through a [`Catalog`]; the reference
//! systems in [`preset`] are available without any file.

pub mod catalog;
pub mod preset;

pub use catalog::{Catalog, CatalogHandle, RejectedSystem};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dice::DiceExpression;
use crate::error::{MechError, MechResult};
use crate::validate;

/// Normalize a user-supplied name into a lookup key.
///
/// Lowercases, trims, and collapses every whitespace run into a single
/// underscore: `"Sleight  of Hand"` becomes `"sleight_of_hand"`.
pub fn normalize_key(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// How a raw attribute score becomes a bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", from = "String")]
pub enum ModifierFormula {
    /// `floor((score - 10) / 2)`, the classic ability modifier.
    LinearMod,
    /// The score is the bonus.
    DirectStat,
    /// The score is the bonus; used when a system names no known formula.
    #[default]
    AddRaw,
}

impl ModifierFormula {
    /// Apply the formula to a raw score. Computed in `i64` so any stored
    /// score is in range.
    pub fn apply(self, score: i32) -> i64 {
        let score = i64::from(score);
        match self {
            // div_euclid floors for a positive divisor: 7 -> -2, not -1.
            Self::LinearMod => (score - 10).div_euclid(2),
            Self::DirectStat | Self::AddRaw => score,
        }
    }

    /// Resolve a formula name. Unrecognized names fall back to [`Self::AddRaw`].
    ///
    /// Besides the canonical names this accepts the older spellings
    /// `(score - 10) / 2` and `score_is_modifier`.
    pub fn from_name(name: &str) -> Self {
        let compact: String = name
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();
        match compact.as_str() {
            "linear_mod" | "linearmod" | "(score-10)/2" => Self::LinearMod,
            "direct_stat" | "directstat" | "score_is_modifier" => Self::DirectStat,
            _ => Self::AddRaw,
        }
    }
}

impl From<String> for ModifierFormula {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl std::fmt::Display for ModifierFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LinearMod => write!(f, "LINEAR_MOD"),
            Self::DirectStat => write!(f, "DIRECT_STAT"),
            Self::AddRaw => write!(f, "ADD_RAW"),
        }
    }
}

/// How a skill check combines the governing attribute with skill data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", from = "String")]
pub enum SkillComposition {
    /// Attribute modifier, plus the proficiency bonus when proficient.
    ProficiencyGated,
    /// Raw attribute score plus skill level.
    StatSum,
    /// Attribute modifier plus skill level.
    #[default]
    ModifierPlusLevel,
}

impl SkillComposition {
    /// Resolve a composition name. Unrecognized names fall back to
    /// [`Self::ModifierPlusLevel`].
    pub fn from_name(name: &str) -> Self {
        match normalize_key(name).as_str() {
            "proficiency_gated" => Self::ProficiencyGated,
            "stat_sum" => Self::StatSum,
            _ => Self::ModifierPlusLevel,
        }
    }

    /// The composition a definition gets when it names none, paired with its
    /// modifier formula the way the reference systems pair them.
    pub fn implied_by(formula: ModifierFormula) -> Self {
        match formula {
            ModifierFormula::LinearMod => Self::ProficiencyGated,
            ModifierFormula::DirectStat => Self::StatSum,
            ModifierFormula::AddRaw => Self::ModifierPlusLevel,
        }
    }
}

impl From<String> for SkillComposition {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl std::fmt::Display for SkillComposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProficiencyGated => write!(f, "PROFICIENCY_GATED"),
            Self::StatSum => write!(f, "STAT_SUM"),
            Self::ModifierPlusLevel => write!(f, "MODIFIER_PLUS_LEVEL"),
        }
    }
}

/// A complete, validated rule system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSystemDefinition {
    /// Unique system key (e.g. `dnd5e`).
    pub key: String,
    /// Display name (e.g. "D&D 5e").
    pub name: String,
    /// Attribute keys, in presentation order.
    pub attributes: Vec<String>,
    /// Skill key to governing attribute key.
    pub skills: BTreeMap<String, String>,
    /// Attribute score to bonus.
    pub modifier_formula: ModifierFormula,
    /// Skill bonus composition.
    pub skill_composition: SkillComposition,
    /// Notation for every attribute and skill roll (e.g. `1d20`).
    pub dice_notation: String,
    /// `dice_notation`, parsed.
    #[serde(skip)]
    pub primary_check: DiceExpression,
}

impl GameSystemDefinition {
    /// Build and validate a definition from its raw source form.
    pub fn from_raw(key: &str, raw: RawDefinition) -> MechResult<Self> {
        let invalid = |reason: String| MechError::InvalidDefinition {
            system: key.to_string(),
            reason,
        };

        let dice_notation = raw
            .dice_notation
            .or_else(|| raw.dice.and_then(|d| d.primary_check))
            .ok_or_else(|| invalid("no dice notation for the primary check".to_string()))?;
        let primary_check =
            DiceExpression::parse(&dice_notation).map_err(|e| invalid(e.to_string()))?;

        let modifier_formula = raw.modifier_formula.unwrap_or_default();
        let skill_composition = raw
            .skill_composition
            .unwrap_or_else(|| SkillComposition::implied_by(modifier_formula));

        let definition = Self {
            key: key.to_string(),
            name: raw.name.unwrap_or_else(|| key.to_string()),
            attributes: raw.attributes.iter().map(|a| normalize_key(a)).collect(),
            skills: raw
                .skills
                .iter()
                .map(|(skill, attr)| (normalize_key(skill), normalize_key(attr)))
                .collect(),
            modifier_formula,
            skill_composition,
            dice_notation,
            primary_check,
        };

        let issues = validate::validate_definition(&definition);
        if let Some(error) = issues.iter().find(|i| i.is_error) {
            return Err(invalid(error.message.clone()));
        }
        for warning in issues.iter().filter(|i| !i.is_error) {
            tracing::warn!(system = key, "{}", warning.message);
        }

        Ok(definition)
    }

    /// True if `key` (already normalized) names an attribute.
    pub fn is_attribute(&self, key: &str) -> bool {
        self.attributes.iter().any(|a| a == key)
    }

    /// The governing attribute of a skill (key already normalized).
    pub fn skill_attribute(&self, key: &str) -> Option<&str> {
        self.skills.get(key).map(String::as_str)
    }

    /// All skill keys, sorted.
    pub fn skill_names(&self) -> Vec<String> {
        self.skills.keys().cloned().collect()
    }

    /// Every valid check name: attributes first, then skills.
    pub fn check_names(&self) -> Vec<String> {
        self.attributes
            .iter()
            .cloned()
            .chain(self.skills.keys().cloned())
            .collect()
    }
}

impl std::fmt::Display for GameSystemDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.key)
    }
}

/// A definition as it appears in the source file, before validation.
///
/// Accepts both the current field names and the older
/// `attributeModifierFormula` / `dice.primaryCheck` layout.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDefinition {
    /// Display name.
    pub name: Option<String>,
    /// Attribute keys.
    #[serde(default)]
    pub attributes: Vec<String>,
    /// Skill key to governing attribute key.
    #[serde(default)]
    pub skills: BTreeMap<String, String>,
    /// Formula name.
    #[serde(default, alias = "attributeModifierFormula")]
    pub modifier_formula: Option<ModifierFormula>,
    /// Composition name.
    #[serde(default)]
    pub skill_composition: Option<SkillComposition>,
    /// Primary check notation.
    #[serde(default)]
    pub dice_notation: Option<String>,
    /// Older nested dice block.
    #[serde(default)]
    pub dice: Option<RawDice>,
}

/// The older nested `dice` block of a definition.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDice {
    /// Primary check notation.
    pub primary_check: Option<String>,
}

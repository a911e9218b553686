//! Check resolution: turning a check name into a bonus and a roll.
//!
//! [`resolve`] finds out whether a check names an attribute or a skill,
//! applies the system's [`ModifierFormula`] and [`SkillComposition`], and
//! records every contributing term so the final reply can show its work.
//! [`perform_check`] adds the roll of the system's primary check notation.
//!
//! [`ModifierFormula`]: crate::rules::ModifierFormula
//! [`SkillComposition`]: crate::rules::SkillComposition

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use crate::dice::DiceRollResult;
use crate::error::{MechError, MechResult};
use crate::rules::{GameSystemDefinition, ModifierFormula, SkillComposition, normalize_key};
use crate::sheet::CharacterRecord;

/// Minimum similarity for a "did you mean" suggestion (0.0-1.0).
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Whether a check tests an attribute directly or a skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckKind {
    /// A pure attribute check.
    Attribute,
    /// A skill check governed by an attribute.
    Skill {
        /// The governing attribute key.
        attribute: String,
    },
}

/// One term contributing to a check's bonus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusTerm {
    /// An attribute score, optionally converted to a modifier.
    Attribute {
        /// Attribute key.
        key: String,
        /// Raw score on the character record.
        score: i32,
        /// The derived modifier, when the formula converts the score.
        modifier: Option<i64>,
    },
    /// The proficiency bonus of a proficient skill.
    Proficiency {
        /// Bonus added.
        bonus: i32,
    },
    /// A skill level stacked on the attribute.
    SkillLevel {
        /// Skill key.
        key: String,
        /// Level on the character record.
        level: i32,
    },
}

impl BonusTerm {
    /// How much this term adds to the bonus.
    pub fn value(&self) -> i64 {
        match self {
            Self::Attribute {
                score, modifier, ..
            } => modifier.unwrap_or(i64::from(*score)),
            Self::Proficiency { bonus } => i64::from(*bonus),
            Self::SkillLevel { level, .. } => i64::from(*level),
        }
    }
}

fn label(key: &str) -> String {
    key.replace('_', " ").to_uppercase()
}

fn signed(n: impl Into<i64>) -> String {
    let n = n.into();
    if n >= 0 { format!("+{n}") } else { n.to_string() }
}

impl std::fmt::Display for BonusTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attribute {
                key,
                score,
                modifier: Some(m),
            } => write!(f, "{} {score} (mod {})", label(key), signed(*m)),
            Self::Attribute {
                key,
                score,
                modifier: None,
            } => write!(f, "{} {score}", label(key)),
            Self::Proficiency { bonus } => write!(f, "Prof. {}", signed(*bonus)),
            Self::SkillLevel { key, level } => write!(f, "{} {level}", label(key)),
        }
    }
}

/// The bonus side of a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResolution {
    /// The normalized check key.
    pub check: String,
    /// Attribute or skill check.
    pub kind: CheckKind,
    /// Sum of all term values.
    pub base_value: i64,
    /// Every term contributing to `base_value`.
    pub terms: Vec<BonusTerm>,
    /// Terms rendered for display, e.g. `DEX 14 (mod +2) + Prof. +3`.
    pub description: String,
}

impl CheckResolution {
    fn from_terms(check: String, kind: CheckKind, terms: Vec<BonusTerm>) -> Self {
        let base_value = terms.iter().map(BonusTerm::value).sum();
        let description = terms
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" + ");
        Self {
            check,
            kind,
            base_value,
            terms,
            description,
        }
    }
}

/// Attribute term for a score under a formula.
fn attribute_term(formula: ModifierFormula, key: &str, score: i32) -> BonusTerm {
    let modifier = match formula {
        ModifierFormula::LinearMod => Some(formula.apply(score)),
        ModifierFormula::DirectStat | ModifierFormula::AddRaw => None,
    };
    BonusTerm::Attribute {
        key: key.to_string(),
        score,
        modifier,
    }
}

/// Compute the bonus for a check without rolling.
///
/// A missing attribute score counts as 0.
pub fn resolve(
    definition: &GameSystemDefinition,
    character: &CharacterRecord,
    requested: &str,
) -> MechResult<CheckResolution> {
    let check = normalize_key(requested);
    let formula = definition.modifier_formula;

    if definition.is_attribute(&check) {
        let score = character.attribute_score(&check).unwrap_or(0);
        let terms = vec![attribute_term(formula, &check, score)];
        return Ok(CheckResolution::from_terms(
            check,
            CheckKind::Attribute,
            terms,
        ));
    }

    let Some(attribute) = definition.skill_attribute(&check) else {
        return Err(unknown_check(definition, requested, check));
    };
    let score = character.attribute_score(attribute).unwrap_or(0);

    let terms = match definition.skill_composition {
        SkillComposition::ProficiencyGated => {
            let mut terms = vec![attribute_term(formula, attribute, score)];
            if character.is_proficient(&check) {
                terms.push(BonusTerm::Proficiency {
                    bonus: character.proficiency_bonus,
                });
            }
            terms
        }
        // Raw score, not the modifier: levels stack directly on the stat.
        SkillComposition::StatSum => vec![
            BonusTerm::Attribute {
                key: attribute.to_string(),
                score,
                modifier: None,
            },
            BonusTerm::SkillLevel {
                key: check.clone(),
                level: character.skill_level(&check),
            },
        ],
        SkillComposition::ModifierPlusLevel => vec![
            attribute_term(formula, attribute, score),
            BonusTerm::SkillLevel {
                key: check.clone(),
                level: character.skill_level(&check),
            },
        ],
    };

    let kind = CheckKind::Skill {
        attribute: attribute.to_string(),
    };
    Ok(CheckResolution::from_terms(check, kind, terms))
}

fn unknown_check(definition: &GameSystemDefinition, requested: &str, check: String) -> MechError {
    let suggestion = definition
        .check_names()
        .into_iter()
        .map(|name| (jaro_winkler(&check, &name), name))
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, name)| name);

    MechError::UnknownCheck {
        requested: requested.to_string(),
        normalized: check,
        system: definition.name.clone(),
        attributes: definition.attributes.clone(),
        skills: definition.skill_names(),
        suggestion,
    }
}

/// A fully resolved and rolled check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckOutcome {
    /// Character name.
    pub character: String,
    /// Display name of the game system.
    pub system: String,
    /// The check as requested.
    pub requested: String,
    /// The bonus side.
    pub resolution: CheckResolution,
    /// The primary check roll.
    pub roll: DiceRollResult,
    /// `roll.total + resolution.base_value`.
    pub total: i64,
}

/// Resolve a check and roll the system's primary check notation.
pub fn perform_check(
    definition: &GameSystemDefinition,
    character: &CharacterRecord,
    requested: &str,
    rng: &mut StdRng,
) -> MechResult<CheckOutcome> {
    perform_check_with(definition, character, requested, |sides| {
        rng.random_range(1..=sides)
    })
}

/// [`perform_check`] with die values supplied by `roll_die`.
pub fn perform_check_with(
    definition: &GameSystemDefinition,
    character: &CharacterRecord,
    requested: &str,
    roll_die: impl FnMut(u32) -> u32,
) -> MechResult<CheckOutcome> {
    let resolution = resolve(definition, character, requested)?;
    let roll = definition.primary_check.evaluate_with(roll_die);
    let total = roll.total + resolution.base_value;

    tracing::debug!(
        character = %character.name,
        system = %definition.key,
        check = %resolution.check,
        base = resolution.base_value,
        roll = roll.total,
        total,
        "check resolved"
    );

    Ok(CheckOutcome {
        character: character.name.clone(),
        system: definition.name.clone(),
        requested: requested.to_string(),
        resolution,
        roll,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::preset;
    use rand::SeedableRng;

    fn garra() -> CharacterRecord {
        let mut record = CharacterRecord::new("Garra", "dnd5e");
        for (attr, score) in [
            ("str", 16),
            ("dex", 14),
            ("con", 12),
            ("int", 7),
            ("wis", 10),
            ("cha", 9),
        ] {
            record.attributes.insert(attr.to_string(), score);
        }
        record.skill_proficiency.insert("stealth".to_string(), true);
        record
            .skill_proficiency
            .insert("acrobatics".to_string(), false);
        record.proficiency_bonus = 3;
        record
    }

    fn razor() -> CharacterRecord {
        let mut record = CharacterRecord::new("Razor", "cyberpunkRed");
        record.attributes.insert("ref".to_string(), 8);
        record.attributes.insert("body".to_string(), 6);
        record.attributes.insert("dex".to_string(), 6);
        record.skills.insert("athletics".to_string(), 4);
        record
    }

    #[test]
    fn linear_mod_attribute_check() {
        let r = resolve(&preset::dnd5e(), &garra(), "STR").unwrap();
        assert_eq!(r.check, "str");
        assert_eq!(r.kind, CheckKind::Attribute);
        assert_eq!(r.base_value, 3);
        assert_eq!(r.description, "STR 16 (mod +3)");
    }

    #[test]
    fn linear_mod_negative_floors() {
        let r = resolve(&preset::dnd5e(), &garra(), "int").unwrap();
        assert_eq!(r.base_value, -2);
        assert_eq!(r.description, "INT 7 (mod -2)");
    }

    #[test]
    fn direct_stat_attribute_check() {
        let r = resolve(&preset::cyberpunk_red(), &razor(), "ref").unwrap();
        assert_eq!(r.base_value, 8);
        assert_eq!(r.description, "REF 8");
    }

    #[test]
    fn add_raw_attribute_check() {
        let mut def = preset::cyberpunk_red();
        def.modifier_formula = ModifierFormula::AddRaw;
        let r = resolve(&def, &razor(), "body").unwrap();
        assert_eq!(r.base_value, 6);
    }

    #[test]
    fn missing_attribute_counts_as_zero() {
        let r = resolve(&preset::cyberpunk_red(), &razor(), "luck").unwrap();
        assert_eq!(r.base_value, 0);
    }

    #[test]
    fn proficient_skill_adds_bonus() {
        let r = resolve(&preset::dnd5e(), &garra(), "Stealth").unwrap();
        assert_eq!(
            r.kind,
            CheckKind::Skill {
                attribute: "dex".to_string()
            }
        );
        assert_eq!(r.base_value, 5);
        assert_eq!(r.description, "DEX 14 (mod +2) + Prof. +3");
    }

    #[test]
    fn non_proficient_skill_is_modifier_only() {
        let r = resolve(&preset::dnd5e(), &garra(), "acrobatics").unwrap();
        assert_eq!(r.base_value, 2);
        assert_eq!(r.terms.len(), 1);

        let r = resolve(&preset::dnd5e(), &garra(), "sleight of hand").unwrap();
        assert_eq!(r.check, "sleight_of_hand");
        assert_eq!(r.base_value, 2);
    }

    #[test]
    fn stat_sum_uses_raw_score() {
        let r = resolve(&preset::cyberpunk_red(), &razor(), "athletics").unwrap();
        assert_eq!(r.base_value, 10);
        assert_eq!(r.description, "DEX 6 + ATHLETICS 4");
    }

    #[test]
    fn stat_sum_untrained_skill() {
        let r = resolve(&preset::cyberpunk_red(), &razor(), "Human Perception").unwrap();
        assert_eq!(r.check, "human_perception");
        assert_eq!(r.base_value, 0);
        assert_eq!(r.description, "EMP 0 + HUMAN PERCEPTION 0");
    }

    #[test]
    fn legacy_dnd_catalog_adds_proficiency() {
        let catalog = crate::rules::Catalog::from_json(
            r#"{"dnd5e": {
                "name": "D&D 5e",
                "attributes": ["str", "dex"],
                "skills": {"stealth": "dex"},
                "attributeModifierFormula": "(score - 10) / 2",
                "dice": {"primaryCheck": "1d20"}
            }}"#,
        )
        .unwrap();
        let r = resolve(catalog.get("dnd5e").unwrap(), &garra(), "stealth").unwrap();
        assert_eq!(r.base_value, 5);
        assert_eq!(r.description, "DEX 14 (mod +2) + Prof. +3");
    }

    #[test]
    fn extreme_values_do_not_overflow() {
        let mut record = CharacterRecord::new("Outlier", "dnd5e");
        record.attributes.insert("str".to_string(), i32::MIN);
        record.attributes.insert("dex".to_string(), i32::MAX);
        record.skill_proficiency.insert("stealth".to_string(), true);
        record.proficiency_bonus = i32::MAX;

        let r = resolve(&preset::dnd5e(), &record, "str").unwrap();
        assert_eq!(r.base_value, -1_073_741_829);

        let r = resolve(&preset::dnd5e(), &record, "stealth").unwrap();
        assert_eq!(r.base_value, 1_073_741_818 + i64::from(i32::MAX));

        let mut record = CharacterRecord::new("Outlier", "cyberpunkRed");
        record.attributes.insert("dex".to_string(), i32::MAX);
        record.skills.insert("athletics".to_string(), i32::MAX);
        let outcome =
            perform_check_with(&preset::cyberpunk_red(), &record, "athletics", |_| 10).unwrap();
        assert_eq!(outcome.total, 2 * i64::from(i32::MAX) + 10);
    }

    #[test]
    fn fallback_composition_uses_modifier_plus_level() {
        let mut def = preset::dnd5e();
        def.skill_composition = SkillComposition::ModifierPlusLevel;
        let mut record = garra();
        record.skills.insert("athletics".to_string(), 2);
        let r = resolve(&def, &record, "athletics").unwrap();
        // STR 16 -> +3, plus level 2
        assert_eq!(r.base_value, 5);
        assert_eq!(r.description, "STR 16 (mod +3) + ATHLETICS 2");
    }

    #[test]
    fn unknown_check_lists_names() {
        let err = resolve(&preset::dnd5e(), &garra(), "nonexistent_skill").unwrap_err();
        match err {
            MechError::UnknownCheck {
                normalized,
                attributes,
                skills,
                suggestion,
                ..
            } => {
                assert_eq!(normalized, "nonexistent_skill");
                assert_eq!(attributes.len(), 6);
                assert_eq!(skills.len(), 18);
                assert!(skills.contains(&"stealth".to_string()));
                assert_eq!(suggestion, None);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_check_suggests_close_match() {
        let err = resolve(&preset::dnd5e(), &garra(), "stelth").unwrap_err();
        assert!(matches!(
            err,
            MechError::UnknownCheck { suggestion: Some(ref s), .. } if s == "stealth"
        ));
    }

    #[test]
    fn perform_check_adds_roll_and_bonus() {
        let outcome =
            perform_check_with(&preset::dnd5e(), &garra(), "stealth", |_| 15).unwrap();
        assert_eq!(outcome.roll.rolls, vec![15]);
        assert_eq!(outcome.resolution.base_value, 5);
        assert_eq!(outcome.total, 20);
        assert_eq!(outcome.system, "D&D 5e");
        assert_eq!(outcome.character, "Garra");
    }

    #[test]
    fn perform_check_rolls_primary_notation() {
        let mut rng = StdRng::seed_from_u64(42);
        let outcome = perform_check(&preset::cyberpunk_red(), &razor(), "ref", &mut rng).unwrap();
        assert_eq!(outcome.roll.rolls.len(), 1);
        assert!((1..=10).contains(&outcome.roll.rolls[0]));
        assert_eq!(outcome.total, outcome.roll.total + 8);
    }

    #[test]
    fn perform_check_fails_before_rolling() {
        let mut rolled = false;
        let result = perform_check_with(&preset::dnd5e(), &garra(), "flying", |_| {
            rolled = true;
            1
        });
        assert!(result.is_err());
        assert!(!rolled);
    }

    #[test]
    fn term_display() {
        assert_eq!(BonusTerm::Proficiency { bonus: -1 }.to_string(), "Prof. -1");
        assert_eq!(
            BonusTerm::SkillLevel {
                key: "basic_tech".to_string(),
                level: 3
            }
            .to_string(),
            "BASIC TECH 3"
        );
    }
}

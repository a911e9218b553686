//! Reference game systems that need no catalog file.
//!
//! These produce the same [`GameSystemDefinition`] the equivalent catalog
//! entry would.

use std::collections::BTreeMap;

use crate::dice::DiceExpression;
use crate::rules::{GameSystemDefinition, ModifierFormula, SkillComposition};

fn skills(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(skill, attr)| ((*skill).to_string(), (*attr).to_string()))
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// D&D 5th edition.
///
/// Roll 1d20 plus `floor((score - 10) / 2)`. Skills add the proficiency
/// bonus when the character is proficient.
pub fn dnd5e() -> GameSystemDefinition {
    GameSystemDefinition {
        key: "dnd5e".to_string(),
        name: "D&D 5e".to_string(),
        attributes: strings(&["str", "dex", "con", "int", "wis", "cha"]),
        skills: skills(&[
            ("acrobatics", "dex"),
            ("animal_handling", "wis"),
            ("arcana", "int"),
            ("athletics", "str"),
            ("deception", "cha"),
            ("history", "int"),
            ("insight", "wis"),
            ("intimidation", "cha"),
            ("investigation", "int"),
            ("medicine", "wis"),
            ("nature", "int"),
            ("perception", "wis"),
            ("performance", "cha"),
            ("persuasion", "cha"),
            ("religion", "int"),
            ("sleight_of_hand", "dex"),
            ("stealth", "dex"),
            ("survival", "wis"),
        ]),
        modifier_formula: ModifierFormula::LinearMod,
        skill_composition: SkillComposition::ProficiencyGated,
        dice_notation: "1d20".to_string(),
        primary_check: DiceExpression {
            count: 1,
            sides: 20,
            modifier: 0,
        },
    }
}

/// Cyberpunk RED.
///
/// Roll 1d10 plus the raw STAT; skills stack their level on top of it.
pub fn cyberpunk_red() -> GameSystemDefinition {
    GameSystemDefinition {
        key: "cyberpunkRed".to_string(),
        name: "Cyberpunk RED".to_string(),
        attributes: strings(&[
            "int", "ref", "dex", "tech", "cool", "will", "luck", "move", "body", "emp",
        ]),
        skills: skills(&[
            ("athletics", "dex"),
            ("basic_tech", "tech"),
            ("brawling", "dex"),
            ("concentration", "will"),
            ("conversation", "emp"),
            ("cybertech", "tech"),
            ("drive_land_vehicle", "ref"),
            ("education", "int"),
            ("evasion", "dex"),
            ("first_aid", "tech"),
            ("handgun", "ref"),
            ("human_perception", "emp"),
            ("interrogation", "cool"),
            ("melee_weapon", "dex"),
            ("perception", "int"),
            ("persuasion", "cool"),
            ("resist_torture_drugs", "will"),
            ("shoulder_arms", "ref"),
            ("stealth", "dex"),
            ("streetwise", "cool"),
            ("tracking", "int"),
        ]),
        modifier_formula: ModifierFormula::DirectStat,
        skill_composition: SkillComposition::StatSum,
        dice_notation: "1d10".to_string(),
        primary_check: DiceExpression {
            count: 1,
            sides: 10,
            modifier: 0,
        },
    }
}

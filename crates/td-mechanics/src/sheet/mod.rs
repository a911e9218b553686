//! Character records: the numbers a check is resolved against.
//!
//! Records are owned by an external store and read here as immutable
//! snapshots. Lookups match keys case-insensitively so hand-edited files with
//! `STR` or `Sleight of Hand` keys still resolve.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::rules::normalize_key;

/// A character's stats within one game system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    /// Character name.
    pub name: String,
    /// Key of the game system this record belongs to.
    pub system: String,
    /// Attribute scores (e.g. str: 14).
    #[serde(default)]
    pub attributes: BTreeMap<String, i32>,
    /// Skill levels, for systems that stack levels on stats.
    #[serde(default)]
    pub skills: BTreeMap<String, i32>,
    /// Skill proficiency flags, for proficiency-gated systems.
    #[serde(default, alias = "skills_proficiency")]
    pub skill_proficiency: BTreeMap<String, bool>,
    /// Bonus added to proficient skills.
    #[serde(default)]
    pub proficiency_bonus: i32,
    /// Preferred dice style for rendering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dice_style: Option<String>,
}

impl CharacterRecord {
    /// Create an empty record for a character in a system.
    pub fn new(name: impl Into<String>, system: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system: system.into(),
            ..Self::default()
        }
    }

    /// The score for an attribute, if the record has one.
    pub fn attribute_score(&self, key: &str) -> Option<i32> {
        lookup(&self.attributes, key).copied()
    }

    /// The level of a skill, 0 if untrained.
    pub fn skill_level(&self, key: &str) -> i32 {
        lookup(&self.skills, key).copied().unwrap_or(0)
    }

    /// Whether the character is proficient in a skill.
    pub fn is_proficient(&self, key: &str) -> bool {
        lookup(&self.skill_proficiency, key).copied().unwrap_or(false)
    }
}

/// Exact match first, then a match on the normalized key.
fn lookup<'a, V>(map: &'a BTreeMap<String, V>, key: &str) -> Option<&'a V> {
    map.get(key).or_else(|| {
        let wanted = normalize_key(key);
        map.iter()
            .find(|(k, _)| normalize_key(k) == wanted)
            .map(|(_, v)| v)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_record_file() {
        let json = r#"{
            "name": "Garra",
            "system": "dnd5e",
            "attributes": {"str": 14, "dex": 8},
            "skills_proficiency": {"athletics": true, "stealth": false},
            "proficiencyBonus": 3,
            "diceStyle": "gemstone_red"
        }"#;
        let record: CharacterRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "Garra");
        assert_eq!(record.attribute_score("str"), Some(14));
        assert!(record.is_proficient("athletics"));
        assert!(!record.is_proficient("stealth"));
        assert!(!record.is_proficient("arcana"));
        assert_eq!(record.proficiency_bonus, 3);
        assert_eq!(record.dice_style.as_deref(), Some("gemstone_red"));
        assert!(record.skills.is_empty());
    }

    #[test]
    fn serializes_camel_case() {
        let mut record = CharacterRecord::new("Razor", "cyberpunkRed");
        record.skill_proficiency.insert("handgun".to_string(), true);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"skillProficiency\""));
        assert!(json.contains("\"proficiencyBonus\":0"));
        assert!(!json.contains("diceStyle"));
    }

    #[test]
    fn lookups_ignore_case_and_spacing() {
        let mut record = CharacterRecord::new("Razor", "cyberpunkRed");
        record.attributes.insert("REF".to_string(), 8);
        record.skills.insert("Human Perception".to_string(), 4);
        assert_eq!(record.attribute_score("ref"), Some(8));
        assert_eq!(record.skill_level("human_perception"), 4);
        assert_eq!(record.skill_level("stealth"), 0);
        assert_eq!(record.attribute_score("body"), None);
    }
}

//! Check resolution and dice evaluation for Tirada.
//!
//! Provides a dice-notation evaluator, a catalog of pluggable game systems,
//! character records, and the resolver that turns "Garra rolls Stealth" into
//! a bonus, a roll, and a total. Ships with two reference systems:
//! D&D 5e and Cyberpunk RED.

pub mod dice;
pub mod error;
pub mod resolution;
pub mod rules;
pub mod sheet;
pub mod suggest;
pub mod validate;

pub use dice::{DiceExpression, DiceRollResult, RollPolicy};
pub use error::{MechError, MechResult};
pub use resolution::{
    BonusTerm, CheckKind, CheckOutcome, CheckResolution, perform_check, perform_check_with,
    resolve,
};
pub use rules::{
    Catalog, CatalogHandle, GameSystemDefinition, ModifierFormula, SkillComposition,
    normalize_key,
};
pub use sheet::CharacterRecord;
pub use suggest::Choice;
pub use validate::{ValidationIssue, validate_character, validate_definition};

//! Dice roll results and aggregation.

use serde::{Deserialize, Serialize};

use super::DiceExpression;

/// The outcome of evaluating a [`DiceExpression`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRollResult {
    /// The expression that was rolled.
    pub expression: DiceExpression,
    /// Individual die values, in roll order.
    pub rolls: Vec<u32>,
    /// Sum of all die values before the modifier.
    pub base_roll_sum: i64,
    /// The signed modifier from the expression.
    pub modifier: i32,
    /// `base_roll_sum + modifier`.
    pub total: i64,
}

impl DiceRollResult {
    /// Aggregate raw die values for an expression.
    pub fn new(expression: DiceExpression, rolls: Vec<u32>) -> Self {
        let base_roll_sum: i64 = rolls.iter().map(|&r| i64::from(r)).sum();
        Self {
            expression,
            base_roll_sum,
            modifier: expression.modifier,
            total: base_roll_sum + i64::from(expression.modifier),
            rolls,
        }
    }

    /// Rolls joined for display, e.g. `3, 5`.
    pub fn rolls_joined(&self) -> String {
        self.rolls
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for DiceRollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) = {}",
            self.expression,
            self.rolls_joined(),
            self.total
        )
    }
}

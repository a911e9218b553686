//! Dice notation parsing and rolling.
//!
//! Expressions follow `[N]dM[+|-K]`: an optional dice count (default 1),
//! the die size, and an optional signed modifier. Parsing is
//! case-insensitive and ignores whitespace. The evaluator itself only bounds
//! the dice count (1..=100) and requires at least one side; callers that need
//! tighter limits (an allow-list of die sizes, a smaller count) layer a
//! [`RollPolicy`] on top.

pub mod roll;

pub use roll::DiceRollResult;

use std::str::FromStr;
use std::sync::LazyLock;

use rand::Rng;
use rand::rngs::StdRng;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// Hard ceiling on the number of dice in one expression.
pub const MAX_DICE: u32 = 100;

/// Die sizes with a physical counterpart.
pub const STANDARD_SIDES: [u32; 7] = [4, 6, 8, 10, 12, 20, 100];

static NOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)?d([0-9]+)([+-][0-9]+)?$").expect("dice notation pattern is valid")
});

/// A parsed dice expression such as `2d6+3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceExpression {
    /// Number of dice to roll.
    pub count: u32,
    /// Sides on each die.
    pub sides: u32,
    /// Signed modifier added to the dice sum.
    pub modifier: i32,
}

impl DiceExpression {
    /// Parse an expression like `d20`, `3d8`, `1d100+10` or `2D12 - 4`.
    pub fn parse(input: &str) -> MechResult<Self> {
        let cleaned: String = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();

        let caps = NOTATION
            .captures(&cleaned)
            .ok_or_else(|| MechError::InvalidDiceExpression(input.to_string()))?;

        let out_of_range = |reason: &str| MechError::DiceCountOutOfRange {
            expression: input.to_string(),
            reason: reason.to_string(),
        };

        let count = match caps.get(1) {
            Some(m) => m
                .as_str()
                .parse::<u32>()
                .map_err(|_| out_of_range("too many dice"))?,
            None => 1,
        };
        let sides = caps[2]
            .parse::<u32>()
            .map_err(|_| out_of_range("die has too many sides"))?;
        let modifier = match caps.get(3) {
            Some(m) => m
                .as_str()
                .parse::<i32>()
                .map_err(|_| out_of_range("modifier too large"))?,
            None => 0,
        };

        if count == 0 {
            return Err(out_of_range("roll at least one die"));
        }
        if count > MAX_DICE {
            return Err(out_of_range(&format!(
                "cannot roll more than {MAX_DICE} dice at once"
            )));
        }
        if sides == 0 {
            return Err(out_of_range("a die needs at least one side"));
        }

        Ok(Self {
            count,
            sides,
            modifier,
        })
    }

    /// Roll the expression using the given RNG.
    pub fn evaluate(&self, rng: &mut StdRng) -> DiceRollResult {
        self.evaluate_with(|sides| rng.random_range(1..=sides))
    }

    /// Roll the expression, asking `roll_die` for each die value in order.
    ///
    /// `roll_die` receives the die size and must return a value in
    /// `1..=sides`.
    pub fn evaluate_with(&self, mut roll_die: impl FnMut(u32) -> u32) -> DiceRollResult {
        let rolls = (0..self.count).map(|_| roll_die(self.sides)).collect();
        DiceRollResult::new(*self, rolls)
    }
}

impl FromStr for DiceExpression {
    type Err = MechError;

    fn from_str(s: &str) -> MechResult<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{m}"),
            m => write!(f, "{m}"),
        }
    }
}

/// Parse and roll an expression in one step.
pub fn roll(expression: &str, rng: &mut StdRng) -> MechResult<DiceRollResult> {
    let expr = DiceExpression::parse(expression)?;
    let result = expr.evaluate(rng);
    tracing::debug!(%expr, rolls = ?result.rolls, total = result.total, "rolled dice");
    Ok(result)
}

/// Caller-side limits applied on top of the evaluator's own bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollPolicy {
    /// Maximum dice per expression (never above [`MAX_DICE`]).
    pub max_dice: u32,
    /// Permitted die sizes, or `None` for any size.
    pub allowed_sides: Option<Vec<u32>>,
}

impl RollPolicy {
    /// Standard polyhedral dice only, at most 10 per roll.
    pub fn free_roll() -> Self {
        Self {
            max_dice: 10,
            allowed_sides: Some(STANDARD_SIDES.to_vec()),
        }
    }

    /// Only the evaluator's own limits.
    pub fn unrestricted() -> Self {
        Self {
            max_dice: MAX_DICE,
            allowed_sides: None,
        }
    }

    /// Set the dice ceiling (clamped to 1..=[`MAX_DICE`]).
    pub fn with_max_dice(mut self, max_dice: u32) -> Self {
        self.max_dice = max_dice.clamp(1, MAX_DICE);
        self
    }

    /// Check an already parsed expression against this policy.
    pub fn check(&self, expr: &DiceExpression) -> MechResult<()> {
        if let Some(allowed) = &self.allowed_sides
            && !allowed.contains(&expr.sides)
        {
            return Err(MechError::UnsupportedDie {
                sides: expr.sides,
                allowed: allowed.clone(),
            });
        }
        if expr.count > self.max_dice {
            return Err(MechError::DiceCountOutOfRange {
                expression: expr.to_string(),
                reason: format!("at most {} dice per roll here", self.max_dice),
            });
        }
        Ok(())
    }

    /// Parse an expression and check it against this policy.
    pub fn parse(&self, input: &str) -> MechResult<DiceExpression> {
        let expr = DiceExpression::parse(input)?;
        self.check(&expr)?;
        Ok(expr)
    }
}

impl Default for RollPolicy {
    fn default() -> Self {
        Self::unrestricted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    #[test]
    fn parse_full_expression() {
        let expr = DiceExpression::parse("1d20+5").unwrap();
        assert_eq!(
            expr,
            DiceExpression {
                count: 1,
                sides: 20,
                modifier: 5
            }
        );
    }

    #[test]
    fn parse_defaults_count_to_one() {
        let expr: DiceExpression = "d6".parse().unwrap();
        assert_eq!(expr.count, 1);
        assert_eq!(expr.sides, 6);
        assert_eq!(expr.modifier, 0);
    }

    #[test]
    fn parse_ignores_case_and_whitespace() {
        let expr = DiceExpression::parse(" 2D12 - 4 ").unwrap();
        assert_eq!(expr.count, 2);
        assert_eq!(expr.sides, 12);
        assert_eq!(expr.modifier, -4);
    }

    #[test]
    fn parse_rejects_garbage() {
        for bad in [
            "d6x",
            "",
            "2d",
            "dd6",
            "2d6+",
            "2d6+-1",
            "1d20*2",
            "abc",
            "\u{0663}d6",
            "1d\u{0663}",
            "1d6+\u{0663}",
        ] {
            assert!(
                matches!(
                    DiceExpression::parse(bad),
                    Err(MechError::InvalidDiceExpression(_))
                ),
                "{bad:?} should be invalid"
            );
        }
    }

    #[test]
    fn parse_rejects_too_many_dice() {
        assert!(matches!(
            DiceExpression::parse("150d6"),
            Err(MechError::DiceCountOutOfRange { .. })
        ));
        assert!(DiceExpression::parse("100d6").is_ok());
    }

    #[test]
    fn parse_rejects_zero_dice_and_zero_sides() {
        assert!(matches!(
            DiceExpression::parse("0d6"),
            Err(MechError::DiceCountOutOfRange { .. })
        ));
        assert!(matches!(
            DiceExpression::parse("1d0"),
            Err(MechError::DiceCountOutOfRange { .. })
        ));
    }

    #[test]
    fn parse_rejects_overflowing_numbers() {
        assert!(matches!(
            DiceExpression::parse("99999999999d6"),
            Err(MechError::DiceCountOutOfRange { .. })
        ));
    }

    #[test]
    fn evaluator_allows_odd_sides() {
        let expr = DiceExpression::parse("3d7").unwrap();
        assert_eq!(expr.sides, 7);
    }

    #[test]
    fn fixed_rolls_total() {
        let expr = DiceExpression::parse("1d20+5").unwrap();
        let result = expr.evaluate_with(|_| 15);
        assert_eq!(result.rolls, vec![15]);
        assert_eq!(result.base_roll_sum, 15);
        assert_eq!(result.modifier, 5);
        assert_eq!(result.total, 20);
    }

    #[test]
    fn negative_modifier_can_go_below_zero() {
        let expr = DiceExpression::parse("2d4-10").unwrap();
        let result = expr.evaluate_with(|_| 1);
        assert_eq!(result.base_roll_sum, 2);
        assert_eq!(result.total, -8);
    }

    #[test]
    fn roll_order_preserved() {
        let expr = DiceExpression::parse("4d6").unwrap();
        let mut next = 0;
        let result = expr.evaluate_with(|_| {
            next += 1;
            next
        });
        assert_eq!(result.rolls, vec![1, 2, 3, 4]);
    }

    #[test]
    fn display_round_trip_forms() {
        assert_eq!(DiceExpression::parse("d20").unwrap().to_string(), "1d20");
        assert_eq!(DiceExpression::parse("2d6+3").unwrap().to_string(), "2d6+3");
        assert_eq!(DiceExpression::parse("2d6-3").unwrap().to_string(), "2d6-3");
        assert_eq!(DiceExpression::parse("2d6+0").unwrap().to_string(), "2d6");
    }

    #[test]
    fn roll_helper_parses_and_rolls() {
        let mut rng = StdRng::seed_from_u64(7);
        let result = roll("3d6+1", &mut rng).unwrap();
        assert_eq!(result.rolls.len(), 3);
        assert!(roll("nope", &mut rng).is_err());
    }

    #[test]
    fn free_roll_policy() {
        let policy = RollPolicy::free_roll();
        assert!(policy.parse("10d20").is_ok());
        assert!(matches!(
            policy.parse("11d20"),
            Err(MechError::DiceCountOutOfRange { .. })
        ));
        assert!(matches!(
            policy.parse("1d7"),
            Err(MechError::UnsupportedDie { sides: 7, .. })
        ));
    }

    #[test]
    fn unrestricted_policy() {
        let policy = RollPolicy::unrestricted();
        assert!(policy.parse("100d7").is_ok());
        assert!(policy.parse("101d7").is_err());
    }

    #[test]
    fn with_max_dice_is_clamped() {
        assert_eq!(RollPolicy::free_roll().with_max_dice(500).max_dice, MAX_DICE);
        assert_eq!(RollPolicy::free_roll().with_max_dice(0).max_dice, 1);
    }

    proptest! {
        #[test]
        fn evaluate_respects_bounds(
            count in 1u32..=MAX_DICE,
            sides in 1u32..=1000,
            modifier in -1000i32..=1000,
            seed in any::<u64>(),
        ) {
            let expr = DiceExpression { count, sides, modifier };
            let mut rng = StdRng::seed_from_u64(seed);
            let result = expr.evaluate(&mut rng);

            prop_assert_eq!(result.rolls.len(), count as usize);
            prop_assert!(result.rolls.iter().all(|r| (1..=sides).contains(r)));
            let sum: i64 = result.rolls.iter().map(|&r| i64::from(r)).sum();
            prop_assert_eq!(result.base_roll_sum, sum);
            prop_assert_eq!(result.total, sum + i64::from(modifier));
        }

        #[test]
        fn parse_accepts_rendered_expressions(
            count in 1u32..=MAX_DICE,
            sides in 1u32..=1000,
            modifier in -1000i32..=1000,
        ) {
            let expr = DiceExpression { count, sides, modifier };
            prop_assert_eq!(DiceExpression::parse(&expr.to_string()).unwrap(), expr);
        }
    }
}

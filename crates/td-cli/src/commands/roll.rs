use colored::Colorize;
use td_mechanics::RollPolicy;
use td_store::effective_style;

use super::Context;

pub fn run(
    ctx: &Context,
    expression: &str,
    any: bool,
    faces: bool,
    group: Option<&str>,
) -> Result<(), String> {
    let policy = if any {
        RollPolicy::unrestricted()
    } else {
        ctx.config.roll_policy()
    };
    let expr = policy.parse(expression).map_err(|e| e.to_string())?;

    let mut rng = ctx.rng();
    let result = expr.evaluate(&mut rng);

    println!("  {}", result.to_string().bold());
    println!();
    println!("  rolls:     {}", result.rolls_joined());
    println!("  sum:       {}", result.base_roll_sum);
    println!("  modifier:  {:+}", result.modifier);
    println!("  total:     {}", result.total.to_string().bold().green());

    if faces {
        let settings = ctx
            .settings()
            .get(ctx.group(group))
            .map_err(|e| e.to_string())?;
        let style = effective_style(None, &settings, &ctx.config.default_dice_style);
        println!();
        println!("  {} {}", "Faces".bold(), format!("({style})").dimmed());
        for face in ctx.faces().faces(&style, &result) {
            println!("    {face}");
        }
    }

    Ok(())
}

use colored::Colorize;
use td_mechanics::suggest::display_name;
use td_mechanics::{perform_check, validate_character};

use super::Context;

pub fn run(
    ctx: &Context,
    character: &str,
    check: &str,
    system: Option<&str>,
    group: Option<&str>,
) -> Result<(), String> {
    let group = ctx.group(group);
    let catalog = ctx.catalog()?;
    let key = ctx.system_key(&catalog, system, group)?;
    let definition = catalog.get(&key).map_err(|e| e.to_string())?;

    let record = ctx
        .characters()
        .load(character, &definition.key)
        .map_err(|e| e.to_string())?;
    for issue in validate_character(definition, &record) {
        tracing::warn!("{issue}");
    }

    let mut rng = ctx.rng();
    let outcome =
        perform_check(definition, &record, check, &mut rng).map_err(|e| e.to_string())?;
    let resolution = &outcome.resolution;

    println!(
        "  {} rolls {} {}",
        outcome.character.bold(),
        display_name(&resolution.check).bold(),
        format!("({})", outcome.system).dimmed()
    );
    println!();
    println!("  dice:   {}", outcome.roll);
    println!(
        "  bonus:  {:+}  {}",
        resolution.base_value,
        resolution.description.dimmed()
    );
    println!("  total:  {}", outcome.total.to_string().bold().green());

    Ok(())
}

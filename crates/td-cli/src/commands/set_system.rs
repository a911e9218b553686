use colored::Colorize;

use super::Context;

pub fn run(ctx: &Context, key: &str, group: Option<&str>) -> Result<(), String> {
    let group = ctx.group(group);
    let catalog = ctx.catalog()?;
    let key = ctx
        .settings()
        .set_active_system(group, key, &catalog)
        .map_err(|e| e.to_string())?;
    let definition = catalog.get(&key).map_err(|e| e.to_string())?;

    println!(
        "  Group '{group}' now plays {} {}",
        definition.name.bold(),
        format!("({key})").dimmed()
    );
    Ok(())
}

use colored::Colorize;
use td_store::effective_style;

use super::Context;

pub fn run(
    ctx: &Context,
    style: Option<&str>,
    character: Option<&str>,
    system: Option<&str>,
    group: Option<&str>,
) -> Result<(), String> {
    let group = ctx.group(group);
    let styles = ctx.styles()?;
    let settings = ctx.settings();

    // The file the record came from, so the style is written back there.
    let record = match character {
        Some(name) => {
            let catalog = ctx.catalog()?;
            let key = ctx.system_key(&catalog, system, group)?;
            let record = ctx
                .characters()
                .load(name, &key)
                .map_err(|e| e.to_string())?;
            Some((name, key, record))
        }
        None => None,
    };

    let Some(style) = style else {
        let group_settings = settings.get(group).map_err(|e| e.to_string())?;
        let current = effective_style(
            record.as_ref().map(|(_, _, record)| record),
            &group_settings,
            &ctx.config.default_dice_style,
        );
        for name in styles.names() {
            if *name == current {
                println!("  * {}", name.bold());
            } else {
                println!("    {name}");
            }
        }
        return Ok(());
    };

    styles.validate(style).map_err(|e| e.to_string())?;

    match record {
        Some((name, key, mut record)) => {
            record.dice_style = Some(style.to_string());
            ctx.characters()
                .save_as(name, &key, &record)
                .map_err(|e| e.to_string())?;
            println!("  {} now rolls with {}", record.name.bold(), style.bold());
        }
        None => {
            settings
                .set_dice_style(group, Some(style.to_string()))
                .map_err(|e| e.to_string())?;
            println!("  Group '{group}' now rolls with {}", style.bold());
        }
    }
    Ok(())
}

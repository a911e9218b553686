use td_mechanics::suggest::display_name;
use td_store::CharacterStore;

use super::Context;

pub fn run(ctx: &Context, system: Option<&str>, group: Option<&str>) -> Result<(), String> {
    let catalog = ctx.catalog()?;
    let key = ctx.system_key(&catalog, system, ctx.group(group))?;
    let names = ctx.characters().list(&key).map_err(|e| e.to_string())?;

    if names.is_empty() {
        println!("  No characters for {key}.");
        return Ok(());
    }

    for name in &names {
        println!(
            "  {:<24} {}",
            display_name(name),
            CharacterStore::file_name(name, &key)
        );
    }
    println!();
    println!("  {} characters", names.len());

    Ok(())
}

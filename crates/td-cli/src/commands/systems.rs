use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use super::Context;

pub fn run(ctx: &Context) -> Result<(), String> {
    let catalog = ctx.catalog()?;

    if catalog.is_empty() {
        println!("  No game systems found.");
    } else {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            "Key",
            "Name",
            "Dice",
            "Attributes",
            "Skills",
            "Modifier",
            "Skill bonus",
        ]);

        for def in catalog.iter() {
            table.add_row(vec![
                def.key.clone(),
                def.name.clone(),
                def.primary_check.to_string(),
                def.attributes.len().to_string(),
                def.skills.len().to_string(),
                def.modifier_formula.to_string(),
                def.skill_composition.to_string(),
            ]);
        }

        println!("{table}");
        println!();
        println!("  {} systems", catalog.len());
    }

    for rejected in catalog.rejected() {
        println!(
            "  {} {}: {}",
            "skipped".yellow(),
            rejected.key,
            rejected.reason
        );
    }

    Ok(())
}

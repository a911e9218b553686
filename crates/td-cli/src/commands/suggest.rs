//! Autocomplete. Failures never surface as errors: they print nothing and
//! log a warning.

use td_mechanics::Choice;
use td_mechanics::suggest::check_choices;

use super::Context;

pub fn checks(
    ctx: &Context,
    typed: &str,
    system: Option<&str>,
    group: Option<&str>,
    json: bool,
) -> Result<(), String> {
    let choices = ctx
        .catalog()
        .and_then(|catalog| {
            let key = ctx.system_key(&catalog, system, ctx.group(group))?;
            let definition = catalog.get(&key).map_err(|e| e.to_string())?;
            Ok(check_choices(definition, typed))
        })
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "no check suggestions");
            Vec::new()
        });
    print_choices(&choices, json)
}

pub fn characters(
    ctx: &Context,
    typed: &str,
    system: Option<&str>,
    group: Option<&str>,
    json: bool,
) -> Result<(), String> {
    let key = ctx
        .catalog()
        .and_then(|catalog| ctx.system_key(&catalog, system, ctx.group(group)));
    let choices = match key {
        Ok(key) => ctx.characters().choices(&key, typed),
        Err(e) => {
            tracing::warn!(error = %e, "no character suggestions");
            Vec::new()
        }
    };
    print_choices(&choices, json)
}

fn print_choices(choices: &[Choice], json: bool) -> Result<(), String> {
    if json {
        let out = serde_json::to_string_pretty(choices).map_err(|e| e.to_string())?;
        println!("{out}");
    } else {
        for choice in choices {
            println!("{}\t{}", choice.name, choice.value);
        }
    }
    Ok(())
}

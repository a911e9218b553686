//! CLI frontend for Tirada: tabletop checks and dice rolls.

mod commands;
mod logging;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use commands::Context;

#[derive(Parser)]
#[command(
    name = "tirada",
    about = "Tirada: skill checks and dice rolls for tabletop role-playing",
    version,
    propagate_version = true
)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// RNG seed for reproducible rolls
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll an attribute or skill check for a character
    Check {
        /// Character name (case-insensitive)
        character: String,

        /// Attribute or skill, e.g. "stealth" or "sleight of hand"
        check: String,

        /// System key (default: the group's active system)
        #[arg(short, long)]
        system: Option<String>,

        /// Group whose settings apply
        #[arg(short, long)]
        group: Option<String>,
    },

    /// Roll a dice expression such as 2d6+3
    Roll {
        /// Dice expression
        expression: String,

        /// Allow any die size and up to 100 dice
        #[arg(long)]
        any: bool,

        /// List the dice-face image for each die
        #[arg(long)]
        faces: bool,

        /// Group whose dice style applies
        #[arg(short, long)]
        group: Option<String>,
    },

    /// Choose the game system a group plays
    SetSystem {
        /// System key from the catalog
        key: String,

        /// Group to change
        #[arg(short, long)]
        group: Option<String>,
    },

    /// List the game systems in the catalog
    Systems,

    /// List characters stored for a system
    Characters {
        /// System key (default: the group's active system)
        #[arg(short, long)]
        system: Option<String>,

        /// Group whose settings apply
        #[arg(short, long)]
        group: Option<String>,
    },

    /// List dice styles, or pick one for a character or group
    DiceStyle {
        /// Style to set (omit to list styles)
        style: Option<String>,

        /// Set the style on this character instead of the group
        #[arg(short, long)]
        character: Option<String>,

        /// System the character belongs to (default: the group's active system)
        #[arg(short, long)]
        system: Option<String>,

        /// Group to change
        #[arg(short, long)]
        group: Option<String>,
    },

    /// Autocomplete check or character names
    Suggest {
        /// What to complete
        kind: SuggestKind,

        /// Text typed so far
        #[arg(default_value = "")]
        prefix: String,

        /// System key (default: the group's active system)
        #[arg(short, long)]
        system: Option<String>,

        /// Group whose settings apply
        #[arg(short, long)]
        group: Option<String>,

        /// Print choices as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SuggestKind {
    Checks,
    Characters,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = Context::load(cli.config.as_deref(), cli.data_dir, cli.seed).and_then(|ctx| {
        match cli.command {
            Commands::Check {
                character,
                check,
                system,
                group,
            } => commands::check::run(
                &ctx,
                &character,
                &check,
                system.as_deref(),
                group.as_deref(),
            ),
            Commands::Roll {
                expression,
                any,
                faces,
                group,
            } => commands::roll::run(&ctx, &expression, any, faces, group.as_deref()),
            Commands::SetSystem { key, group } => {
                commands::set_system::run(&ctx, &key, group.as_deref())
            }
            Commands::Systems => commands::systems::run(&ctx),
            Commands::Characters { system, group } => {
                commands::characters::run(&ctx, system.as_deref(), group.as_deref())
            }
            Commands::DiceStyle {
                style,
                character,
                system,
                group,
            } => commands::dice_style::run(
                &ctx,
                style.as_deref(),
                character.as_deref(),
                system.as_deref(),
                group.as_deref(),
            ),
            Commands::Suggest {
                kind,
                prefix,
                system,
                group,
                json,
            } => match kind {
                SuggestKind::Checks => commands::suggest::checks(
                    &ctx,
                    &prefix,
                    system.as_deref(),
                    group.as_deref(),
                    json,
                ),
                SuggestKind::Characters => commands::suggest::characters(
                    &ctx,
                    &prefix,
                    system.as_deref(),
                    group.as_deref(),
                    json,
                ),
            },
        }
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;
use witcher_engine::config::{GameConfig, DEFAULT_CONFIG_FILE};
use witcher_engine::save::load_from_path;
use witcher_engine::Dice;

mod game;
mod menu;
mod render;

use game::{Console, Game};

#[derive(Subcommand)]
enum Cmd {
    /// Start the interactive game (default)
    Play,
    /// Print the saved character without starting a game
    Inspect {
        /// Emit JSON instead of the status block
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Parser)]
#[command(name = "witcher")]
#[command(about = "Turn-based Witcher monster hunting in the terminal")]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Cmd>,

    /// YAML config file (missing file means defaults)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Save file path, overrides the config
    #[arg(long, global = true)]
    save: Option<PathBuf>,

    /// RNG seed for a reproducible session, overrides the config
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = GameConfig::load(&cli.config)?;
    if let Some(save) = cli.save {
        config.save_path = save;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    tracing::debug!(?config, "configuration resolved");

    match cli.cmd.unwrap_or(Cmd::Play) {
        Cmd::Play => {
            let dice = match config.seed {
                Some(seed) => Dice::from_seed(seed),
                None => Dice::from_entropy(),
            };
            let stdin = io::stdin();
            let console = Console::new(stdin.lock(), io::stdout());
            Game::new(console, dice, config).run()
        }
        Cmd::Inspect { json } => {
            let witcher = load_from_path(&config.save_path)
                .with_context(|| format!("reading save {}", config.save_path.display()))?;
            let Some(witcher) = witcher else {
                println!("No saved game found at {}", config.save_path.display());
                return Ok(());
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&witcher)?);
            } else {
                for line in render::status(&witcher) {
                    println!("{}", line);
                }
            }
            Ok(())
        }
    }
}

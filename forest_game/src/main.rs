//! Forest Game - A line-based adventure driving rpg_core fights
//!
//! The player walks into the forest, meets bots around their own level,
//! picks up the occasional item and can save the roster between fights.

mod forest;
mod loot;

use anyhow::{Context, Result};
use clap::Parser;
use forest::Forest;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rpg_core::config::{self, GameConstants};
use rpg_core::session::{self, Roster};
use rpg_core::create_character;
use std::io;
use std::path::PathBuf;

/// Fight bots in the forest
#[derive(Parser, Debug)]
#[command(name = "forest_game", version, about)]
struct Args {
    /// Class of a new hero: warrior, rogue, paladin or mage
    #[arg(short, long, default_value = "warrior")]
    class: String,

    /// Name of a new hero
    #[arg(short, long, default_value = "Conan")]
    name: String,

    /// RNG seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file with game constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where `save` writes the roster
    #[arg(long, default_value = "roster.json")]
    save: PathBuf,

    /// Resume from a saved roster (the first character is the hero)
    #[arg(long)]
    load: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let constants = match &args.config {
        Some(path) => config::load_constants(path)
            .with_context(|| format!("loading constants from {}", path.display()))?,
        None => GameConstants::default(),
    };

    let roster = match &args.load {
        Some(path) => session::load_from_path(path)
            .with_context(|| format!("loading roster from {}", path.display()))?,
        None => {
            let hero = create_character(&args.class, args.name.clone(), &constants.crit)?;
            let mut roster = Roster::new();
            roster.add(hero);
            roster
        }
    };
    anyhow::ensure!(!roster.is_empty(), "roster has no hero");

    let rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut forest = Forest::new(roster, constants, rng, args.save);
    let stdin = io::stdin();
    let stdout = io::stdout();
    forest.adventure(stdin.lock(), stdout.lock())
}

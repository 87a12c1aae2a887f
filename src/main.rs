//! Casse Brique entry point
//!
//! Parses the command line, loads configuration and hands off to the terminal
//! shell in [`app`].

mod app;

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::Parser;

use casse_brique::GameConfig;

#[derive(Parser, Debug)]
#[command(name = "casse-brique")]
#[command(version, about = "Breakout in the terminal", long_about = None)]
struct Args {
    /// JSON file overriding game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for bonus drops (default: taken from the clock)
    #[arg(long)]
    seed: Option<u64>,

    /// Directory of levelN.txt files replacing the built-in layouts
    #[arg(long)]
    levels: Option<PathBuf>,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0xB41C_B41C)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(clock_seed);
    log::info!("Casse Brique starting with seed {seed}");

    app::run(app::Options {
        config,
        seed,
        levels: args.levels,
    })
}

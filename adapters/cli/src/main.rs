#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a headless Rogue Defence run.

mod autoplay;
mod flavor;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rogue_defence_core::{EngineConfig, WELCOME_BANNER};
use rogue_defence_engine::Engine;

/// Plays an automated Rogue Defence run and reports the outcome.
#[derive(Debug, Parser)]
#[command(name = "rogue-defence", version)]
struct Args {
    /// Seed for every random stream of the run.
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Path to a TOML file overriding the default configuration.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of waves to play.
    #[arg(long, default_value_t = 10)]
    waves: u32,
    /// Ticks after which an unfinished wave stops the run.
    #[arg(long, default_value_t = 20_000)]
    max_ticks_per_wave: usize,
    /// Prints the final state as JSON.
    #[arg(long)]
    snapshot: bool,
}

/// Entry point for the Rogue Defence command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let mut engine = Engine::new(config, args.seed).context("configuration rejected")?;

    println!("{WELCOME_BANNER}");
    info!("starting run with seed {}", args.seed);

    let summary = autoplay::run(
        &mut engine,
        &flavor::CannedFlavor,
        autoplay::Limits {
            waves: args.waves,
            max_ticks_per_wave: args.max_ticks_per_wave,
        },
    );

    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("failed to encode run summary")?
    );
    if args.snapshot {
        println!(
            "{}",
            serde_json::to_string_pretty(engine.state()).context("failed to encode final state")?
        );
    }
    Ok(())
}

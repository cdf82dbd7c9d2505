//! Headless creature AI simulation.
//!
//! Loads content from a data directory, places every configured creature
//! around a single player in an in-memory arena and drives them tick by tick.
mod simulation;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use creature_content::ContentFactory;
use simulation::Simulation;

/// Drive creature AIs against a player in an in-memory arena
#[derive(Parser)]
#[command(name = "creature-sim")]
#[command(about = "Headless creature AI simulation", long_about = None)]
#[command(version)]
struct Cli {
    /// Content directory (config.toml, spells.ron, ability_lists.ron, creatures.ron)
    #[arg(long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/../game/content/data"))]
    data: PathBuf,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 120)]
    ticks: u32,

    /// Simulated milliseconds per tick
    #[arg(long, default_value_t = 100)]
    tick_ms: u32,

    /// Seed overriding the configured one
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let factory = ContentFactory::new(cli.data);

    let mut simulation = Simulation::load(&factory, cli.seed)?;
    let summary = simulation.run(cli.ticks, cli.tick_ms);
    tracing::info!(
        elapsed_ms = summary.elapsed_ms,
        events = simulation.events_recorded(),
        "simulation finished"
    );

    print!("{summary}");
    Ok(())
}

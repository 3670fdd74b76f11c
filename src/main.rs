use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rl_plot::PlotConfig;
use tracing_subscriber::filter::LevelFilter;

/// Plot imitation-learning results against expert and random baselines
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Result store holding a `results` table
    result_file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::INFO)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    rl_plot::run(&cli.result_file, &PlotConfig::default())
        .with_context(|| format!("failed to plot {}", cli.result_file.display()))?;
    Ok(())
}

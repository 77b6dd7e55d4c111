use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::game::{Difficulty, GameConfig};
use grid_snake::modes::HumanMode;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a 30x30 grid with a persisted high score")]
struct Cli {
    /// Difficulty of the first game
    #[arg(long, value_enum, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// File holding the high score
    #[arg(long, default_value = "snake_high_score.json")]
    high_score_file: PathBuf,

    /// Keep the high score in memory only
    #[arg(long)]
    no_persist: bool,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// The terminal owns stdout/stderr, so logs only go to a file
fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let high_score_path = (!cli.no_persist).then_some(cli.high_score_file);
    let config = GameConfig::new(cli.difficulty, high_score_path);

    let mut human_mode = HumanMode::new(config);
    human_mode.run().await?;

    Ok(())
}

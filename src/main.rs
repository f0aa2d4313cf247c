//! Terminal runner (default binary).
//!
//! Configuration comes from `BLOCKFALL_*` environment variables and an
//! optional JSON file; see [`blockfall::config`]. Logs go to the configured
//! file only, never to the terminal the game draws on.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use blockfall::config::GameConfig;
use blockfall::runtime;

fn main() -> Result<()> {
    let config = GameConfig::from_env()?;
    init_logging(&config)?;

    let outcome = runtime::run(&config)?;
    println!(
        "score {}  lines {}  level {}",
        outcome.score, outcome.lines, outcome.level
    );
    Ok(())
}

fn init_logging(config: &GameConfig) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let filter = EnvFilter::try_new(&config.log_filter)
        .with_context(|| format!("invalid log filter {:?}", config.log_filter))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

mod app;
mod camera;
mod catalog;
mod clock;
mod config;
mod input;
mod orbit;
mod scene;
mod sky;
mod surface;
mod term;

use anyhow::{Context, Result};
use clap::Parser;
use std::{fs::File, path::Path, sync::Mutex};

fn main() -> Result<()> {
    let cli = config::Cli::parse();
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }
    let settings = config::resolve_settings(&cli);
    app::run(settings)
}

// stdout belongs to the TUI, so diagnostics only go to a file.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(())
}

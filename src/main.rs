mod app;
mod cli;
mod constants;
mod datasets;
mod filter;
mod generator;
mod model;
mod ticker;
mod ui;
mod util;

use std::{
    fs::File,
    path::Path,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    app::App,
    cli::{Cli, DashboardConfig},
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The TUI owns stdout, so logs only go to a file when asked for.
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = DashboardConfig::try_from(&cli)?;
    info!(
        capacity = config.capacity,
        tick_ms = config.tick_rate.as_millis() as u64,
        live = config.start_live,
        "starting dashboard"
    );

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = Arc::clone(&shutdown);
        ctrlc::set_handler(move || {
            shutdown.store(true, Ordering::SeqCst);
        })
        .context("failed to install Ctrl+C handler")?;
    }

    let app = App::new(&config);
    ui::run(app, shutdown)
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

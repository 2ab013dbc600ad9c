// ABOUTME: Main application entry point.
// ABOUTME: Loads config and the stored layout, runs one command, and saves the result.

mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use dock_core::DockConfig;
use dock_layout::LayoutCache;

use cli::Cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => DockConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => DockConfig::load_or_default(),
    };

    let cache = match &cli.file {
        Some(path) => LayoutCache::at(path),
        None => LayoutCache::new(&cli.cache_version)?,
    };
    let mut layout = cache.load_or_default(config.window.clone());

    if commands::run(&mut layout, cli.command, &config)? {
        cache
            .save(&layout)
            .with_context(|| format!("Failed to save layout to {}", cache.path().display()))?;
        tracing::info!("Saved layout to {}", cache.path().display());
    }

    Ok(())
}

//! # Pocima Engine
//!
//! Console driver for the Pocima containers.
//!
//! Reads `pocima.toml` (or the path given as the first argument), loads the
//! configured recipe book and runs the bag and vessel walkthroughs.
//! `pocima --init [path]` writes the default configuration instead.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod config;
mod demo;
mod error;
mod recipe_loader;

use anyhow::Result;
use pocima_gameplay::EventBus;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{EngineConfig, CONFIG_FILE};
use crate::recipe_loader::RecipeBook;

/// Main entry point.
fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let config = match args.next().as_deref() {
        Some("--init") => {
            let path = args.next().unwrap_or_else(|| CONFIG_FILE.to_string());
            EngineConfig::default().save_to(&path)?;
            println!("Wrote default configuration to {path}");
            return Ok(());
        },
        Some(path) => EngineConfig::load_from(path),
        None => EngineConfig::load(),
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))?;
    tracing_subscriber::registry()
        .with(config.log_json.then(|| fmt::layer().json()))
        .with((!config.log_json).then(fmt::layer))
        .with(filter)
        .init();

    info!("Pocima starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let mut book = RecipeBook::new();
    if let Some(path) = &config.recipe_path {
        let loaded = if path.is_dir() {
            book.load_dir(path)
        } else {
            book.load_file(path)
        };
        match loaded {
            Ok(count) => info!(
                "Recipe book ready: {count} recipes loaded, {} total, {} skipped",
                book.len(),
                book.rejected()
            ),
            Err(e) => warn!("Recipe book unavailable: {e}"),
        }
    }
    if book.is_empty() {
        info!("No recipes loaded, using built-in recipe");
    }
    for recipe in book.iter() {
        info!("Recipe {recipe}");
    }

    let bus = EventBus::new(config.event_capacity);
    for line in demo::bag_scenario(&config, &bus) {
        println!("{line}");
    }
    for line in demo::vessel_scenario(&config, &book, &bus)? {
        println!("{line}");
    }

    for event in bus.drain() {
        info!(container = event.container(), "{event:?}");
    }

    info!("Pocima shutdown complete");
    Ok(())
}

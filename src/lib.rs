//! Hippodrome - Terminal horse-racing betting game
//!
//! Pick a horse, wager from a persistent balance and watch a weighted
//! random race decide the winner.

pub mod engine;
pub mod game;

use std::fs::OpenOptions;

use anyhow::Context;
use clap::Parser;

use game::{Cli, ConfigStore, Menu};

/// Send log records to the file next to the config; the terminal belongs to the race
fn init_logging(store: &ConfigStore, verbose: bool) -> anyhow::Result<()> {
    std::fs::create_dir_all(store.dir())
        .with_context(|| format!("creating {}", store.dir().display()))?;
    let path = store.log_path();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    simplelog::WriteLogger::init(level, config, file).context("initializing logger")?;
    Ok(())
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let store = ConfigStore::from_env();

    if let Err(err) = init_logging(&store, cli.verbose) {
        eprintln!("warning: logging disabled: {:#}", err);
    }

    let mut settings = store.load();
    cli.apply(&mut settings);
    store.save_or_warn(&settings);

    log::info!(
        "Hippodrome started: {} horses, fast mode {}, seed {}",
        settings.horses,
        settings.fast,
        settings
            .seed
            .as_ref()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "none".to_string())
    );

    Menu::new(store, settings, cli.fuzzy).run()
}

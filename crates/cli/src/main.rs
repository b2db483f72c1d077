mod cli;

use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use dirs_next::config_dir;
use tint_util::{JsonFileStorage, PaletteStore};
use tracing::info;

use crate::cli::Args;

/// Environment variable overriding where logs are written.
const LOG_PATH_ENV: &str = "TINT_LOG_PATH";

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing()?;

    let config = args.picker_config()?;
    let storage = JsonFileStorage::open(args.storage_path.clone(), &args.origin)
        .context("failed to open palette storage")?;
    info!(path = %storage.path().display(), origin = %args.origin, "using palette storage");
    let store = PaletteStore::new(Arc::new(storage));

    if args.list_saved {
        println!("{}", serde_json::to_string_pretty(&store.load())?);
        return Ok(());
    }
    if args.clear_saved {
        store.clear().context("failed to clear saved palette")?;
        return Ok(());
    }

    let color = tint_tui::run(config, store)?;
    println!("{color}");
    Ok(())
}

/// Logs go to a file: the terminal belongs to the picker while it runs.
fn init_tracing() -> Result<()> {
    let path = log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

fn log_path() -> PathBuf {
    if let Ok(path) = env::var(LOG_PATH_ENV)
        && !path.trim().is_empty()
    {
        return tint_util::expand_tilde_path(PathBuf::from(path));
    }
    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tint")
        .join("tint.log")
}

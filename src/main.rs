mod config;
mod ledger;
mod logging;
mod models;
mod run;
mod store;
mod ui;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use config::{Config, CONFIG_FILE};
use run::Options;
use store::{MemoryKv, SqliteKv, Store};

const DB_FILE: &str = "pocketbook.db";
const DEFAULT_LOG_LEVEL: &str = "info";

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = Options::parse(&args)?;

    // Help and version work even when the data dir or ledger is broken.
    if let Some(command) = opts.command.first().filter(|c| run::is_offline(c)) {
        let mut out = std::io::stdout().lock();
        return match command.as_str() {
            "--version" | "-V" | "version" => run::print_version(&mut out),
            _ => run::print_usage(&mut out),
        };
    }

    let dirs = project_dirs()?;
    let data_dir = ensure_dir(dirs.data_dir())?;
    logging::init(
        &data_dir,
        opts.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL),
    )?;

    let config = match &opts.config {
        Some(path) => Config::load(path, true)?,
        None => Config::load(&dirs.config_dir().join(CONFIG_FILE), false)?,
    };

    let mut store = open_store(&opts, &data_dir)?;

    if opts.command.is_empty() {
        run::as_tui(&mut store, &config)
    } else {
        let result = run::as_cli(&opts.command, &mut store, &config, &mut std::io::stdout().lock());
        if let Err(ref e) = result {
            tracing::error!(error = %e, command = %opts.command[0], "Command failed");
        }
        result
    }
}

fn open_store(opts: &Options, data_dir: &Path) -> Result<Store> {
    if opts.memory {
        tracing::info!("Using in-memory ledger");
        return Ok(Store::new(MemoryKv::new())?);
    }
    let db_path = opts
        .db
        .clone()
        .unwrap_or_else(|| data_dir.join(DB_FILE));
    let kv = SqliteKv::open(&db_path)?;
    Store::new(kv).with_context(|| format!("Failed to open ledger: {}", db_path.display()))
}

fn project_dirs() -> Result<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "pocketbook", "pocketbook")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
}

fn ensure_dir(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    Ok(dir.to_path_buf())
}

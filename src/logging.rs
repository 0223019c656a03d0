use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub(crate) const LOG_FILE: &str = "pocketbook.log";

/// Past this size the log is started over with a marker line.
const MAX_LOG_SIZE: u64 = 2 * 1024 * 1024;

/// Send `tracing` output to `{data_dir}/pocketbook.log`.
///
/// The terminal belongs to the TUI, so nothing is written to stdout/stderr.
/// `RUST_LOG` takes precedence over `level`.
pub(crate) fn init(data_dir: &Path, level: &str) -> Result<()> {
    let log_path = data_dir.join(LOG_FILE);
    let oversized = fs::metadata(&log_path).is_ok_and(|m| m.len() > MAX_LOG_SIZE);

    let file = OpenOptions::new()
        .create(true)
        .append(!oversized)
        .write(true)
        .truncate(oversized)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pocketbook={level}")));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .try_init()
        .context("Failed to install log subscriber")?;

    if oversized {
        tracing::info!("Log file exceeded {MAX_LOG_SIZE} bytes and was truncated");
    }
    tracing::info!(path = %log_path.display(), "Logging initialized");
    Ok(())
}

use anyhow::{anyhow, Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Filter directives, e.g. `HNTERM_LOG=hnterm=debug`.
pub const LOG_ENV: &str = "HNTERM_LOG";

/// Routes `tracing` output to a file; the terminal belongs to the UI.
pub fn init() -> Result<PathBuf> {
    let path = std::env::temp_dir().join("hnterm.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("log already initialized: {err}"))?;

    tracing::info!("log started");
    Ok(path)
}

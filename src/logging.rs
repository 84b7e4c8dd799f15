//! File-based tracing setup.
//!
//! The terminal belongs to the TUI, so log output goes to
//! `<data dir>/lazyvote/lazyvote.log`. The level is taken from `RUST_LOG`
//! and defaults to `info`.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use color_eyre::Result;
use color_eyre::eyre::eyre;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::state::config::APP_NAME;

/// Log file name inside the data directory.
const LOG_FILE: &str = "lazyvote.log";

/// Directive used when `RUST_LOG` is unset or invalid.
const DEFAULT_DIRECTIVE: &str = "info";

/// Location of the log file, creating its directory.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn log_path() -> Result<PathBuf> {
    let mut path = dirs::data_dir().unwrap_or_else(std::env::temp_dir);
    path.push(APP_NAME);
    fs::create_dir_all(&path)?;
    path.push(LOG_FILE);
    Ok(path)
}

/// Builds the filter from `RUST_LOG`, falling back to `info`.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Installs the global subscriber writing to the log file.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init() -> Result<PathBuf> {
    let path = log_path()?;
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_target(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer)
        .try_init()
        .map_err(|e| eyre!("failed to install tracing subscriber: {e}"))?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), log = %path.display(), "lazyvote starting");
    Ok(path)
}

//! tracing subscriber setup for the drivers.
//!
//! The terminal driver owns the screen while in raw mode, so its log goes to
//! a file. The replay driver writes JSON to stdout and logs to stderr.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::prelude::*;

use crate::config::DriverConfig;

/// Install a file subscriber when `config.log_path` is set.
///
/// Returns `Ok(false)` when logging is disabled.
pub fn init(config: &DriverConfig) -> Result<bool> {
    match &config.log_path {
        Some(path) => {
            init_file(path, config.log_level)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Append plain-text (no ANSI) log lines to `path`.
pub fn init_file(path: &Path, level: LevelFilter) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("logging: cannot open {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(level)
        .try_init()
        .map_err(|e| anyhow!("logging: {}", e))
}

pub fn init_stderr(level: LevelFilter) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(level)
        .try_init()
        .map_err(|e| anyhow!("logging: {}", e))
}

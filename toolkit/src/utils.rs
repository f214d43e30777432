use crate::core::{Config, LogConfig};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Logs go to a daily file so the terminal UI keeps the screen.
pub fn setup_tracing(log: &LogConfig) -> Result<WorkerGuard> {
    fs::create_dir_all(&log.directory)
        .with_context(|| format!("Failed to create log directory {}", log.directory.display()))?;
    let appender = tracing_appender::rolling::daily(&log.directory, &log.file_prefix);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))?;
    Ok(guard)
}

pub fn setup_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        error!("Application panicked: {}", info);
        default_hook(info);
    }));
}

pub fn generate_dummy_config(path: &Path) -> Result<()> {
    let text = toml::to_string_pretty(&Config::example())?;
    fs::write(path, text).with_context(|| format!("Failed to write config {}", path.display()))?;
    println!("Wrote example config to {}", path.display());
    Ok(())
}

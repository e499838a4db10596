//! File-based logging setup.
//!
//! The TUI owns stdout/stderr, so logs go to a daily-rolling file under
//! ${ETUDE_HOME}/logs. Filtering is controlled by the ETUDE_LOG env var
//! (standard EnvFilter syntax), defaulting to `info`.

use std::fs;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber.
///
/// Returns a guard that must be held for the process lifetime; dropping it
/// flushes and stops the background writer.
pub fn init() -> Result<WorkerGuard> {
    let dir = crate::config::paths::logs_dir();
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(&dir, "etude.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env("ETUDE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .init();

    Ok(guard)
}

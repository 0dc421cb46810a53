//! Logging setup: stderr plus a per-run log file.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Keeps the file writer alive. Drop it only at process exit.
pub struct LogGuard {
    _guard: WorkerGuard,
    pub file: PathBuf,
}

/// Log file name for a run started at `unix_secs`.
pub fn log_file_name(unix_secs: u64) -> String {
    format!("bakery_log_{unix_secs}.txt")
}

/// Installs the global subscriber, writing to stderr and to a new file in
/// `log_dir`. The level defaults to INFO and follows `RUST_LOG`.
pub fn init(log_dir: &Path) -> Result<LogGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let started = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    let file_name = log_file_name(started);

    let file_appender = tracing_appender::rolling::never(log_dir, &file_name);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    let file = log_dir.join(file_name);
    tracing::info!(target: "bakery::host", file = %file.display(), "logging initialized");

    Ok(LogGuard {
        _guard: guard,
        file,
    })
}

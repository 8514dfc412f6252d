//! File logging for client sessions.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Platform log directory.
///
/// - macOS: `~/Library/Caches/loaves-and-fishes/logs`
/// - Linux: `~/.cache/loaves-and-fishes/logs` (or `$XDG_CACHE_HOME/...`)
/// - Windows: `%LOCALAPPDATA%\loaves-and-fishes\cache\logs`
/// - Fallback: `/tmp/loaves-and-fishes/logs`
pub fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "loaves-and-fishes")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/loaves-and-fishes"))
        .join("logs")
}

/// Install a subscriber writing to `<log_dir>/<session_id>/battle.log`.
///
/// The filter comes from `RUST_LOG`, defaulting to INFO. The returned guard
/// flushes the writer when dropped and must outlive the session.
pub fn setup_logging(log_dir: &Path, session_id: &str) -> Result<WorkerGuard> {
    let session_log_dir = log_dir.join(session_id);
    std::fs::create_dir_all(&session_log_dir).with_context(|| {
        format!("Failed to create log directory {}", session_log_dir.display())
    })?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "battle.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(session = session_id, "logging initialized");
    tracing::info!("Log file: {}/battle.log", session_log_dir.display());

    Ok(guard)
}

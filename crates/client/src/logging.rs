//! Logging setup for the client binary.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Platform cache directory for session logs.
///
/// - macOS: `~/Library/Caches/gridwalk/logs`
/// - Linux: `~/.cache/gridwalk/logs` (or `$XDG_CACHE_HOME/gridwalk/logs`)
/// - Windows: `%LOCALAPPDATA%\gridwalk\logs`
/// - Fallback: `/tmp/gridwalk/logs`
fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "gridwalk")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/gridwalk"))
        .join("logs")
}

/// Logs to `<cache>/logs/<session>/client.log` and to stderr.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the program.
pub fn setup_logging(session_id: Option<String>) -> Result<WorkerGuard> {
    let session_id = match session_id {
        Some(id) => id,
        None => {
            let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
            format!("session_{timestamp}")
        }
    };

    let session_log_dir = log_dir().join(&session_id);
    std::fs::create_dir_all(&session_log_dir)?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    tracing::info!("Logging initialized: session={}", session_id);
    tracing::info!("Log file: {}/client.log", session_log_dir.display());

    Ok(guard)
}

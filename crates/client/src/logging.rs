//! File logging for a replay session.
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Keeps the file writer alive; drop it last.
pub struct LoggingGuard {
    _file: WorkerGuard,
    pub session_dir: PathBuf,
}

/// Installs a subscriber writing to `<log root>/<session>/client.log` and
/// to stderr. `RUST_LOG` refines the default `info` level.
pub fn setup_logging(session_id: Option<&str>, log_root: Option<&Path>) -> Result<LoggingGuard> {
    let log_root = log_root.map_or_else(default_log_directory, Path::to_path_buf);
    let session_id = session_id.map_or_else(new_session_id, str::to_owned);

    let session_dir = log_root.join(&session_id);
    std::fs::create_dir_all(&session_dir)
        .with_context(|| format!("creating log directory {}", session_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&session_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("installing the tracing subscriber")?;

    tracing::info!(session = %session_id, "logging initialized");
    tracing::info!("log file: {}/client.log", session_dir.display());

    Ok(LoggingGuard {
        _file: guard,
        session_dir,
    })
}

/// Platform cache directory, e.g. `~/.cache/tactics/logs` on Linux.
pub fn default_log_directory() -> PathBuf {
    directories::ProjectDirs::from("", "", "tactics")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("tactics"))
        .join("logs")
}

fn new_session_id() -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    format!("session_{timestamp}")
}

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use once_cell::sync::OnceCell;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, prelude::*};

static LOG_FILE: OnceCell<PathBuf> = OnceCell::new();

/// Keeps the file writer alive. Drop it at the end of `main` to flush the log file.
pub struct TracingGuard {
    log_file: PathBuf,
    _worker: Option<WorkerGuard>,
}

impl TracingGuard {
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }
}

pub fn log_file_name(now: DateTime<Local>) -> String {
    format!("trading_bot_{}.log", now.format("%Y%m%d_%H%M%S"))
}

/// Logs to stderr and to a per-run file under `log_dir`. Only the first call installs the
/// subscriber; later calls return a guard pointing at the same file.
pub fn init_tracing(log_dir: impl AsRef<Path>) -> Result<TracingGuard> {
    if let Some(log_file) = LOG_FILE.get() {
        return Ok(TracingGuard {
            log_file: log_file.clone(),
            _worker: None,
        });
    }

    let log_dir = log_dir.as_ref();
    fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;
    let file_name = log_file_name(Local::now());
    let log_file = log_dir.join(&file_name);

    // 1. one file per run, never rotated
    let file_appender = rolling::never(log_dir, &file_name);

    // 2. non-blocking writer, flushed when the guard drops
    let (non_blocking, worker) = tracing_appender::non_blocking(file_appender);

    // 3. console goes to stderr so stdout only carries the order summaries
    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    // 4. no ANSI escapes in the file
    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(non_blocking);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    let log_file = LOG_FILE.get_or_init(|| log_file).clone();
    tracing::info!("Logging initialized. Log file: {}", log_file.display());

    Ok(TracingGuard {
        log_file,
        _worker: Some(worker),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_log_file_name() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(log_file_name(now), "trading_bot_20240309_070501.log");
    }

    #[test]
    fn test_init_is_idempotent() {
        let dir = std::env::temp_dir().join(format!("trading_bot_logs_{}", std::process::id()));
        let first = init_tracing(&dir).unwrap();
        let second = init_tracing(&dir).unwrap();
        assert_eq!(first.log_file(), second.log_file());
        assert!(first.log_file().starts_with(&dir));
        assert!(second._worker.is_none());
    }
}

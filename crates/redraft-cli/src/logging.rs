//! Tracing subscriber setup.
//!
//! Filter comes from `REDRAFT_LOG` (default `info`). The interactive editor
//! owns the terminal, so it logs to a daily file under `$REDRAFT_HOME/logs`;
//! everything else logs to stderr.

use std::io::IsTerminal;

use redraft_core::config::paths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "REDRAFT_LOG";

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Logs to stderr. One-shot commands default to `warn` so their stdout
/// stays clean; `serve` passes `info`.
pub fn init_stderr(default: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();
}

/// Logs to `$REDRAFT_HOME/logs/redraft.log.<date>`.
///
/// The returned guard flushes the writer on drop and must be held until
/// exit. Returns `None` when the log directory cannot be created.
pub fn init_file() -> Option<WorkerGuard> {
    let log_dir = paths::logs_dir();
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: cannot create log dir {}: {e}", log_dir.display());
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(&log_dir, "redraft.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(env_filter("info"))
        .with_writer(nb_writer)
        .with_ansi(false)
        .try_init()
    {
        Ok(()) => Some(guard),
        // A subscriber is already installed; drop the guard so the writer shuts down.
        Err(_) => None,
    }
}

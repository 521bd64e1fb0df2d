use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive
pub const LOG_ENV: &str = "SCHEDULE_LOG";

/// `$XDG_STATE_HOME/schedule/schedule.log`, falling back to `~/.local/state`.
pub fn log_path() -> PathBuf {
    resolve_log_path(|key| std::env::var(key).ok())
}

fn resolve_log_path(var: impl Fn(&str) -> Option<String>) -> PathBuf {
    let state_dir = var("XDG_STATE_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| super::config_io::home_dir(&var).join(".local").join("state"));
    state_dir.join("schedule").join("schedule.log")
}

/// Install the global subscriber. Logs go to a file because the terminal
/// belongs to the TUI; if the file cannot be opened nothing is logged.
pub fn init_logging() {
    let path = log_path();
    if let Some(dir) = path.parent()
        && fs::create_dir_all(dir).is_err()
    {
        return;
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

use std::fs;
use std::path::{Path, PathBuf};

use crate::model::Config;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Config file location: `SCHEDULE_CONFIG_FILE`, then XDG_CONFIG_HOME, then
/// `~/.config`.
pub fn config_path() -> PathBuf {
    resolve_config_path(|key| std::env::var(key).ok())
}

fn resolve_config_path(var: impl Fn(&str) -> Option<String>) -> PathBuf {
    let home = home_dir(&var);
    if let Some(explicit) = var("SCHEDULE_CONFIG_FILE").filter(|v| !v.trim().is_empty()) {
        return expand_tilde(explicit.trim(), &home);
    }
    let config_dir = var("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| home.join(".config"));
    config_dir.join("schedule").join("config.toml")
}

pub(crate) fn home_dir(var: &impl Fn(&str) -> Option<String>) -> PathBuf {
    var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/"))
}

fn expand_tilde(path: &str, home: &Path) -> PathBuf {
    if path == "~" {
        home.to_path_buf()
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

/// Parse config text. Empty text yields the defaults.
pub fn parse_config(path: &Path, text: &str) -> Result<Config, ConfigError> {
    toml::from_str(text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse a config file, reporting every failure.
pub fn read_config_from(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(path, &text)
}

/// Load a config file, falling back to defaults when it is missing or
/// broken. Problems other than absence are logged.
pub fn load_config_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Config::default();
    }
    match read_config_from(path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("{}; using defaults", e);
            Config::default()
        }
    }
}

/// Load the config for this run. An explicit path (from `--config`) must
/// be readable; its contents still degrade to defaults when unparsable.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    match explicit {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(parse_config(path, &text).unwrap_or_else(|e| {
                tracing::warn!("{}; using defaults", e);
                Config::default()
            }))
        }
        None => Ok(load_config_from(&config_path())),
    }
}

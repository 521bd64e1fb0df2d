use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Application configuration (config.toml). Every key is optional; a key
/// present in the file replaces its default wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_report")]
    pub default_report: String,
    #[serde(default = "default_date_fields")]
    pub default_date_fields: Vec<String>,
    #[serde(default)]
    pub confirm_before_schedule: bool,
    #[serde(default = "default_hotkeys")]
    pub hotkeys: BTreeMap<String, String>,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_report: default_report(),
            default_date_fields: default_date_fields(),
            confirm_before_schedule: false,
            hotkeys: default_hotkeys(),
            engine: EngineConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

fn default_report() -> String {
    "next".to_string()
}

fn default_date_fields() -> Vec<String> {
    vec!["scheduled".to_string()]
}

fn default_hotkeys() -> BTreeMap<String, String> {
    [
        ("1", "tomorrow"),
        ("2", "+2d"),
        ("3", "+3d"),
        ("4", "sow"),
        ("5", "som"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// How to reach the task engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_command")]
    pub command: String,
    /// Bound on export calls
    #[serde(default = "default_read_timeout")]
    pub read_timeout_secs: u64,
    /// Bound on `_config` and modify calls
    #[serde(default = "default_write_timeout")]
    pub write_timeout_secs: u64,
    #[serde(default = "default_cache_ttl")]
    pub report_cache_ttl_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            command: default_command(),
            read_timeout_secs: default_read_timeout(),
            write_timeout_secs: default_write_timeout(),
            report_cache_ttl_secs: default_cache_ttl(),
        }
    }
}

impl EngineConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }

    pub fn report_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.report_cache_ttl_secs)
    }
}

fn default_command() -> String {
    "task".to_string()
}

fn default_read_timeout() -> u64 {
    30
}

fn default_write_timeout() -> u64 {
    10
}

fn default_cache_ttl() -> u64 {
    15
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Start with relative dates ("in 3 days") instead of absolute ones
    #[serde(default)]
    pub relative_dates: bool,
    /// Theme overrides: name → "#RRGGBB"
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

/// Hotkey symbol → literal scheduling value, restricted to the digits 1-9.
/// `0` is reserved for clearing fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hotkeys {
    map: BTreeMap<char, String>,
}

impl Hotkeys {
    /// Build from the configured table, skipping (and logging) invalid keys
    /// and empty values.
    pub fn from_config(table: &BTreeMap<String, String>) -> Self {
        let mut map = BTreeMap::new();
        for (key, value) in table {
            let mut chars = key.trim().chars();
            match (chars.next(), chars.next()) {
                (Some(c @ '1'..='9'), None) if !value.trim().is_empty() => {
                    map.insert(c, value.trim().to_string());
                }
                _ => {
                    tracing::warn!(key = %key, value = %value, "ignoring hotkey mapping");
                }
            }
        }
        Hotkeys { map }
    }

    pub fn resolve(&self, key: char) -> Option<&str> {
        self.map.get(&key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.map.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_document_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_report, "next");
        assert_eq!(config.default_date_fields, vec!["scheduled"]);
        assert!(!config.confirm_before_schedule);
        assert_eq!(config.hotkeys.get("1").map(String::as_str), Some("tomorrow"));
        assert_eq!(config.hotkeys.get("5").map(String::as_str), Some("som"));
        assert_eq!(config.engine.command, "task");
        assert_eq!(config.engine.read_timeout(), Duration::from_secs(30));
        assert_eq!(config.engine.write_timeout(), Duration::from_secs(10));
        assert_eq!(config.engine.report_cache_ttl(), Duration::from_secs(15));
    }

    #[test]
    fn file_keys_override_but_others_keep_defaults() {
        let config: Config = toml::from_str("default_report = \"custom\"\n").unwrap();
        assert_eq!(config.default_report, "custom");
        assert_eq!(config.default_date_fields, default_date_fields());
        assert_eq!(config.hotkeys, default_hotkeys());
    }

    #[test]
    fn hotkeys_table_replaces_defaults_wholesale() {
        let config: Config = toml::from_str(
            r#"
[hotkeys]
1 = "+1d"
6 = "custom"
"#,
        )
        .unwrap();
        assert_eq!(config.hotkeys.len(), 2);
        assert_eq!(config.hotkeys.get("6").map(String::as_str), Some("custom"));
        assert!(config.hotkeys.get("2").is_none());
    }

    #[test]
    fn full_custom_config() {
        let config: Config = toml::from_str(
            r##"
default_report = "all"
default_date_fields = ["due", "wait"]
confirm_before_schedule = true

[hotkeys]
1 = "+1d"
2 = "monday"

[engine]
command = "/opt/bin/task"
read_timeout_secs = 5

[ui]
relative_dates = true
colors = { highlight = "#FF0000" }
"##,
        )
        .unwrap();
        assert_eq!(config.default_report, "all");
        assert_eq!(config.default_date_fields, vec!["due", "wait"]);
        assert!(config.confirm_before_schedule);
        assert_eq!(config.engine.command, "/opt/bin/task");
        assert_eq!(config.engine.read_timeout_secs, 5);
        assert_eq!(config.engine.write_timeout_secs, 10);
        assert!(config.ui.relative_dates);
        assert_eq!(
            config.ui.colors.get("highlight").map(String::as_str),
            Some("#FF0000")
        );
    }

    #[test]
    fn hotkeys_resolve_digits_only() {
        let mut table = default_hotkeys();
        table.insert("0".into(), "today".into());
        table.insert("12".into(), "eom".into());
        table.insert("a".into(), "eow".into());
        table.insert("9".into(), "  ".into());
        let hotkeys = Hotkeys::from_config(&table);
        assert_eq!(hotkeys.resolve('1'), Some("tomorrow"));
        assert_eq!(hotkeys.resolve('4'), Some("sow"));
        assert_eq!(hotkeys.resolve('0'), None);
        assert_eq!(hotkeys.resolve('9'), None);
        assert_eq!(hotkeys.iter().count(), 5);
    }
}

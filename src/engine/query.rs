use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::Modifications;

/// Report used when no filter or report is given at all
pub const DEFAULT_REPORT: &str = "next";

/// Overrides passed to every read invocation
pub const READ_OVERRIDES: [&str; 2] = ["rc.confirmation=off", "rc.hooks=0"];

/// Overrides passed to every modify invocation
pub const WRITE_OVERRIDES: [&str; 4] = [
    "rc.confirmation=off",
    "rc.bulk=0",
    "rc.recurrence.confirmation=no",
    "rc.hooks=0",
];

static REPORT_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^report\.([^.]+)\.[^=]+(?:=|$)").expect("valid regex"));

/// Normalize a user-supplied filter/report string into tokens.
///
/// `None` means the default report. `Some("")` (or whitespace only) is an
/// explicit request for everything and yields no tokens.
pub fn tokenize(filter_or_report: Option<&str>) -> Vec<String> {
    let normalized = match filter_or_report {
        None => DEFAULT_REPORT,
        Some(s) => s.trim(),
    };
    normalized.split_whitespace().map(str::to_string).collect()
}

/// A resolved export request: filter tokens plus an optional named report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportQuery {
    pub filter: Vec<String>,
    pub report: Option<String>,
}

impl ExportQuery {
    /// Export every task: no filter, no report.
    pub fn all() -> Self {
        ExportQuery::default()
    }

    /// Resolve tokens against the known report names. Only the last token is
    /// considered as a report; anything else makes the whole input a filter.
    pub fn resolve(mut tokens: Vec<String>, reports: &BTreeSet<String>) -> Self {
        match tokens.last() {
            Some(last) if reports.contains(last) => {
                let report = tokens.pop();
                ExportQuery {
                    filter: tokens,
                    report,
                }
            }
            _ => ExportQuery {
                filter: tokens,
                report: None,
            },
        }
    }

    /// `rc... <filter...> export [<report>]`
    pub fn to_args(&self) -> Vec<String> {
        let mut args: Vec<String> = READ_OVERRIDES.iter().map(|s| s.to_string()).collect();
        args.extend(self.filter.iter().cloned());
        args.push("export".to_string());
        if let Some(report) = &self.report {
            args.push(report.clone());
        }
        args
    }
}

/// `rc... _config`
pub fn config_args() -> Vec<String> {
    let mut args: Vec<String> = READ_OVERRIDES.iter().map(|s| s.to_string()).collect();
    args.push("_config".to_string());
    args
}

/// `rc... uuid:<uuid> modify <field>:<value>...`
pub fn modify_args(uuid: &str, changes: &Modifications) -> Vec<String> {
    let mut args: Vec<String> = WRITE_OVERRIDES.iter().map(|s| s.to_string()).collect();
    args.push(format!("uuid:{}", uuid));
    args.push("modify".to_string());
    args.extend(changes.iter().map(|(field, value)| format!("{}:{}", field, value)));
    args
}

/// Extract report names from `_config` output (`report.<name>.<field>[=value]`).
pub fn parse_report_names(config_output: &str) -> BTreeSet<String> {
    config_output
        .lines()
        .filter_map(|line| REPORT_LINE_RE.captures(line))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

pub mod error;
#[cfg(test)]
pub mod fake;
pub mod query;
pub mod report_cache;
pub mod runner;
pub mod taskwarrior;

use std::collections::BTreeSet;

use crate::model::{Modifications, Task};

pub use error::EngineError;
pub use query::ExportQuery;
pub use report_cache::{Clock, ManualClock, ReportCache, SystemClock};
pub use runner::{CommandOutput, CommandRunner, ProcessRunner};
pub use taskwarrior::TaskWarrior;

/// Result of a modify call the engine accepted or rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifyOutcome {
    pub success: bool,
    /// The engine's diagnostic output when it rejected the change
    pub diagnostics: String,
}

impl ModifyOutcome {
    pub fn ok() -> Self {
        ModifyOutcome {
            success: true,
            diagnostics: String::new(),
        }
    }

    pub fn rejected(diagnostics: impl Into<String>) -> Self {
        ModifyOutcome {
            success: false,
            diagnostics: diagnostics.into(),
        }
    }
}

/// Operations the rest of the application needs from a task engine.
///
/// All calls block until the engine process exits or times out.
pub trait TaskEngine {
    /// Known report names, served from cache while it is fresh.
    fn report_names(&mut self) -> Result<BTreeSet<String>, EngineError>;

    /// Export tasks for a filter, a report, or `filter... report`.
    /// `None` means the default report; an empty string exports everything.
    fn fetch_tasks(&mut self, filter_or_report: Option<&str>) -> Result<Vec<Task>, EngineError>;

    /// Apply all `changes` to one task in a single invocation. Engine
    /// rejections come back as an unsuccessful outcome; only failures to run
    /// the engine at all are errors.
    fn modify_task(&mut self, uuid: &str, changes: &Modifications)
    -> Result<ModifyOutcome, EngineError>;
}

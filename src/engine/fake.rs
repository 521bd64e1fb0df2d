//! In-memory `TaskEngine` for unit tests of the session and the TUI.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashSet};
use std::rc::Rc;
use std::time::Duration;

use super::{EngineError, ModifyOutcome, TaskEngine};
use crate::model::{Modifications, Task};

#[derive(Debug, Default)]
pub struct FakeState {
    pub tasks: Vec<Task>,
    pub reports: BTreeSet<String>,
    pub fetches: Vec<Option<String>>,
    pub modifies: Vec<(String, Vec<(String, String)>)>,
    /// uuids whose modify is rejected
    pub reject: HashSet<String>,
    /// when set, every fetch fails with this stderr
    pub fail_fetch: Option<String>,
    /// when set, every modify times out
    pub hang_modify: bool,
}

/// Cloneable handle; clones share state so tests can inspect calls after
/// handing a boxed copy to the code under test.
#[derive(Debug, Clone, Default)]
pub struct FakeEngine {
    pub state: Rc<RefCell<FakeState>>,
}

impl FakeEngine {
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let engine = FakeEngine::default();
        engine.state.borrow_mut().tasks = tasks;
        engine
    }

    pub fn set_tasks(&self, tasks: Vec<Task>) {
        self.state.borrow_mut().tasks = tasks;
    }

    pub fn fetch_count(&self) -> usize {
        self.state.borrow().fetches.len()
    }

    pub fn modify_count(&self) -> usize {
        self.state.borrow().modifies.len()
    }
}

impl TaskEngine for FakeEngine {
    fn report_names(&mut self) -> Result<BTreeSet<String>, EngineError> {
        Ok(self.state.borrow().reports.clone())
    }

    fn fetch_tasks(&mut self, filter_or_report: Option<&str>) -> Result<Vec<Task>, EngineError> {
        let mut state = self.state.borrow_mut();
        state.fetches.push(filter_or_report.map(str::to_string));
        if let Some(stderr) = &state.fail_fetch {
            return Err(EngineError::Failed {
                command: "task export".into(),
                status: Some(2),
                stderr: stderr.clone(),
            });
        }
        Ok(state.tasks.clone())
    }

    fn modify_task(
        &mut self,
        uuid: &str,
        changes: &Modifications,
    ) -> Result<ModifyOutcome, EngineError> {
        let mut state = self.state.borrow_mut();
        state.modifies.push((
            uuid.to_string(),
            changes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ));
        if state.hang_modify {
            return Err(EngineError::Timeout {
                command: format!("task uuid:{} modify", uuid),
                timeout: Duration::from_secs(10),
            });
        }
        if state.reject.contains(uuid) {
            return Ok(ModifyOutcome::rejected(format!("Cannot modify {}", uuid)));
        }
        Ok(ModifyOutcome::ok())
    }
}

use crate::engine::TaskEngine;
use crate::model::{DateField, DateFieldSelection, Hotkeys, Modifications, SelectionSet};

/// Precondition failures for a batch operation. Detected before any engine
/// call; nothing has been changed when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
    #[error("hotkey {0} is not configured")]
    UnknownHotkey(char),
    #[error("no active date fields")]
    NoActiveFields,
    #[error("no tasks selected")]
    NoTargets,
}

/// A validated batch: one value assigned to every active field of every target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPlan {
    /// Literal engine value; empty clears the fields
    pub value: String,
    pub fields: Vec<DateField>,
    pub targets: Vec<String>,
}

impl BatchPlan {
    /// Plan assigning the value mapped to `hotkey`.
    ///
    /// Checks, in order: the hotkey is configured, a field is active, a task
    /// is targeted (explicit selection, else the cursor task).
    pub fn schedule(
        hotkey: char,
        hotkeys: &Hotkeys,
        fields: &DateFieldSelection,
        selection: &SelectionSet,
        cursor_uuid: Option<&str>,
    ) -> Result<Self, BatchError> {
        let value = hotkeys
            .resolve(hotkey)
            .ok_or(BatchError::UnknownHotkey(hotkey))?;
        Self::build(value, fields, selection, cursor_uuid)
    }

    /// Plan clearing every active field.
    pub fn clear(
        fields: &DateFieldSelection,
        selection: &SelectionSet,
        cursor_uuid: Option<&str>,
    ) -> Result<Self, BatchError> {
        Self::build("", fields, selection, cursor_uuid)
    }

    fn build(
        value: &str,
        fields: &DateFieldSelection,
        selection: &SelectionSet,
        cursor_uuid: Option<&str>,
    ) -> Result<Self, BatchError> {
        if fields.is_empty() {
            return Err(BatchError::NoActiveFields);
        }
        let targets = selection.effective_targets(cursor_uuid);
        if targets.is_empty() {
            return Err(BatchError::NoTargets);
        }
        Ok(BatchPlan {
            value: value.to_string(),
            fields: fields.get_active(),
            targets,
        })
    }

    pub fn is_clear(&self) -> bool {
        self.value.is_empty()
    }

    /// The field map sent with every modify call of this batch.
    pub fn modifications(&self) -> Modifications {
        Modifications::assign_all(self.fields.iter().map(|f| f.as_str()), &self.value)
    }

    /// One-line description, e.g. "set due, scheduled to 'tomorrow' on 3 tasks"
    pub fn describe(&self) -> String {
        let fields = self
            .fields
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let count = self.targets.len();
        let noun = if count == 1 { "task" } else { "tasks" };
        if self.is_clear() {
            format!("clear {} on {} {}", fields, count, noun)
        } else {
            format!("set {} to '{}' on {} {}", fields, self.value, count, noun)
        }
    }
}

/// One task the engine did not update, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFailure {
    pub uuid: String,
    pub reason: String,
}

/// Outcome of running a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub attempted: usize,
    pub failures: Vec<TaskFailure>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.attempted - self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn summary(&self) -> String {
        let noun = if self.attempted == 1 { "task" } else { "tasks" };
        if self.failures.is_empty() {
            format!("Updated {} {}", self.attempted, noun)
        } else {
            format!(
                "Updated {} of {} {}; {} failed",
                self.succeeded(),
                self.attempted,
                noun,
                self.failures.len()
            )
        }
    }
}

/// Modify every target of `plan`, one engine call per task, in target order.
/// A failure on one task never stops the others.
pub fn execute(engine: &mut dyn TaskEngine, plan: &BatchPlan) -> BatchReport {
    let changes = plan.modifications();
    let mut report = BatchReport::default();

    for uuid in &plan.targets {
        report.attempted += 1;
        let reason = match engine.modify_task(uuid, &changes) {
            Ok(outcome) if outcome.success => continue,
            Ok(outcome) if outcome.diagnostics.is_empty() => "rejected by engine".to_string(),
            Ok(outcome) => outcome.diagnostics,
            Err(err) => err.to_string(),
        };
        tracing::warn!(%uuid, %reason, "batch modify failed");
        report.failures.push(TaskFailure {
            uuid: uuid.clone(),
            reason,
        });
    }

    tracing::info!(
        attempted = report.attempted,
        failed = report.failures.len(),
        "{}",
        plan.describe()
    );
    report
}

/// Execute `plan`, then clear the selection whatever the outcome.
pub fn run(
    engine: &mut dyn TaskEngine,
    plan: &BatchPlan,
    selection: &mut SelectionSet,
) -> BatchReport {
    let report = execute(engine, plan);
    selection.clear();
    report
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::engine::fake::FakeEngine;
    use crate::engine::{EngineError, ModifyOutcome};
    use crate::model::Task;
    use pretty_assertions::assert_eq;

    fn hotkeys() -> Hotkeys {
        Hotkeys::from_config(&crate::model::Config::default().hotkeys)
    }

    fn selection(uuids: &[&str]) -> SelectionSet {
        let mut sel = SelectionSet::new();
        sel.select_all(uuids.iter().copied());
        sel
    }

    #[test]
    fn plan_assigns_hotkey_value_to_sorted_active_fields() {
        let fields = DateFieldSelection::new([DateField::Scheduled, DateField::Due]);
        let plan =
            BatchPlan::schedule('4', &hotkeys(), &fields, &selection(&["a", "b"]), None).unwrap();
        assert_eq!(plan.value, "sow");
        assert_eq!(plan.fields, vec![DateField::Due, DateField::Scheduled]);
        assert_eq!(plan.targets, vec!["a".to_string(), "b".to_string()]);
        let changes = plan.modifications();
        assert_eq!(
            changes.iter().collect::<Vec<_>>(),
            vec![("due", "sow"), ("scheduled", "sow")]
        );
        assert_eq!(plan.describe(), "set due, scheduled to 'sow' on 2 tasks");
    }

    #[test]
    fn unknown_hotkey_checked_first() {
        let err = BatchPlan::schedule(
            '9',
            &hotkeys(),
            &DateFieldSelection::default(),
            &SelectionSet::new(),
            None,
        )
        .unwrap_err();
        assert_eq!(err, BatchError::UnknownHotkey('9'));
    }

    #[test]
    fn no_active_fields_checked_before_targets() {
        let err = BatchPlan::schedule(
            '1',
            &hotkeys(),
            &DateFieldSelection::default(),
            &SelectionSet::new(),
            None,
        )
        .unwrap_err();
        assert_eq!(err, BatchError::NoActiveFields);
    }

    #[test]
    fn no_targets_without_selection_or_cursor() {
        let fields = DateFieldSelection::new([DateField::Due]);
        let err =
            BatchPlan::schedule('1', &hotkeys(), &fields, &SelectionSet::new(), None).unwrap_err();
        assert_eq!(err, BatchError::NoTargets);
    }

    #[test]
    fn cursor_task_is_the_fallback_target() {
        let fields = DateFieldSelection::new([DateField::Due]);
        let plan =
            BatchPlan::schedule('1', &hotkeys(), &fields, &SelectionSet::new(), Some("X")).unwrap();
        assert_eq!(plan.targets, vec!["X".to_string()]);
        assert_eq!(plan.describe(), "set due to 'tomorrow' on 1 task");
    }

    #[test]
    fn clear_needs_no_hotkey() {
        let fields = DateFieldSelection::new(DateField::ALL);
        let plan = BatchPlan::clear(&fields, &selection(&["a"]), None).unwrap();
        assert!(plan.is_clear());
        assert_eq!(plan.modifications().get("wait"), Some(""));
        assert_eq!(plan.describe(), "clear due, scheduled, wait on 1 task");
    }

    #[test]
    fn clear_still_requires_fields() {
        let err = BatchPlan::clear(&DateFieldSelection::default(), &selection(&["a"]), None)
            .unwrap_err();
        assert_eq!(err, BatchError::NoActiveFields);
    }

    #[test]
    fn one_failure_does_not_stop_the_batch() {
        let engine = FakeEngine::default();
        engine.state.borrow_mut().reject.insert("t2".into());
        let mut sel = selection(&["t1", "t2", "t3"]);
        let fields = DateFieldSelection::new([DateField::Scheduled]);
        let plan = BatchPlan::schedule('1', &hotkeys(), &fields, &sel, None).unwrap();

        let report = run(&mut engine.clone(), &plan, &mut sel);

        assert_eq!(engine.modify_count(), 3);
        assert_eq!(report.attempted, 3);
        assert_eq!(
            report.failures,
            vec![TaskFailure {
                uuid: "t2".into(),
                reason: "Cannot modify t2".into()
            }]
        );
        assert_eq!(report.summary(), "Updated 2 of 3 tasks; 1 failed");
        assert!(sel.is_empty());
    }

    #[test]
    fn every_failure_is_collected() {
        let engine = FakeEngine::default();
        engine.state.borrow_mut().reject.insert("t1".into());
        engine.state.borrow_mut().reject.insert("t3".into());
        let mut sel = selection(&["t1", "t2", "t3"]);
        let plan =
            BatchPlan::clear(&DateFieldSelection::new([DateField::Due]), &sel, None).unwrap();

        let report = run(&mut engine.clone(), &plan, &mut sel);

        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].uuid, "t1");
        assert_eq!(report.failures[1].uuid, "t3");
        assert_eq!(report.succeeded(), 1);
        assert!(sel.is_empty());
    }

    #[test]
    fn timeouts_become_failures_and_the_batch_continues() {
        let engine = FakeEngine::default();
        engine.state.borrow_mut().hang_modify = true;
        let mut sel = selection(&["t1", "t2"]);
        let plan =
            BatchPlan::clear(&DateFieldSelection::new([DateField::Wait]), &sel, None).unwrap();

        let report = run(&mut engine.clone(), &plan, &mut sel);

        assert_eq!(engine.modify_count(), 2);
        assert_eq!(report.failures.len(), 2);
        assert!(report.failures.iter().all(|f| f.reason.contains("timed out")));
        assert_eq!(report.summary(), "Updated 0 of 2 tasks; 2 failed");
        assert!(sel.is_empty());
    }

    #[test]
    fn each_call_carries_all_active_fields() {
        let engine = FakeEngine::default();
        let mut sel = selection(&["t1", "t2"]);
        let fields = DateFieldSelection::new([DateField::Scheduled, DateField::Due]);
        let plan = BatchPlan::schedule('4', &hotkeys(), &fields, &sel, None).unwrap();

        let report = run(&mut engine.clone(), &plan, &mut sel);

        assert!(report.is_success());
        assert_eq!(report.summary(), "Updated 2 tasks");
        for (_, changes) in &engine.state.borrow().modifies {
            assert_eq!(
                changes,
                &vec![
                    ("due".to_string(), "sow".to_string()),
                    ("scheduled".to_string(), "sow".to_string())
                ]
            );
        }
    }

    #[test]
    fn empty_diagnostics_get_a_reason() {
        struct Silent;
        impl TaskEngine for Silent {
            fn report_names(&mut self) -> Result<BTreeSet<String>, EngineError> {
                Ok(BTreeSet::new())
            }
            fn fetch_tasks(&mut self, _: Option<&str>) -> Result<Vec<Task>, EngineError> {
                Ok(Vec::new())
            }
            fn modify_task(
                &mut self,
                _: &str,
                _: &Modifications,
            ) -> Result<ModifyOutcome, EngineError> {
                Ok(ModifyOutcome::rejected(""))
            }
        }
        let plan = BatchPlan {
            value: "eow".into(),
            fields: vec![DateField::Due],
            targets: vec!["t1".into()],
        };
        let report = execute(&mut Silent, &plan);
        assert_eq!(report.failures[0].reason, "rejected by engine");
    }
}

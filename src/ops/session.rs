use std::collections::HashSet;

use crate::engine::{EngineError, TaskEngine};
use crate::model::{Config, DateField, DateFieldSelection, Hotkeys, SelectionSet, Task};
use crate::ops::batch::{self, BatchError, BatchPlan, BatchReport};
use crate::ops::sort::{self, SortOrder};

/// Result of a batch plus the resync that always follows it.
#[derive(Debug)]
pub struct BatchOutcome {
    pub report: BatchReport,
    /// Task count after the resync, or why the resync failed
    pub refresh: Result<usize, EngineError>,
}

impl BatchOutcome {
    /// Status line text: the batch summary, with the first failure reason
    /// and any resync failure appended.
    pub fn message(&self) -> String {
        let mut msg = self.report.summary();
        if let Some(first) = self.report.failures.first() {
            msg.push_str(&format!(": {}", first.reason.lines().next().unwrap_or("")));
        }
        if let Err(e) = &self.refresh {
            msg.push_str(&format!(" (refresh failed: {})", e.diagnostics()));
        }
        msg
    }
}

/// Core state owned by the single control flow: the engine, the current
/// snapshot and everything the user has toggled.
pub struct Session {
    engine: Box<dyn TaskEngine>,
    /// `None` is the engine default report; `Some("")` means every task
    filter: Option<String>,
    tasks: Vec<Task>,
    load_error: Option<String>,
    pub date_fields: DateFieldSelection,
    pub selection: SelectionSet,
    hotkeys: Hotkeys,
    pub sort: SortOrder,
}

impl Session {
    /// New session; nothing is fetched until `reload`.
    pub fn new(engine: Box<dyn TaskEngine>, config: &Config) -> Self {
        Session {
            engine,
            filter: Some(config.default_report.clone()),
            tasks: Vec::new(),
            load_error: None,
            date_fields: DateFieldSelection::from_names(&config.default_date_fields),
            selection: SelectionSet::new(),
            hotkeys: Hotkeys::from_config(&config.hotkeys),
            sort: SortOrder::default(),
        }
    }

    /// Re-export the current filter. On failure the snapshot is emptied and
    /// the error kept for display; the selection is only pruned on success.
    pub fn reload(&mut self) -> Result<usize, EngineError> {
        match self.engine.fetch_tasks(self.filter.as_deref()) {
            Ok(tasks) => {
                let known: HashSet<&str> = tasks.iter().map(|t| t.uuid.as_str()).collect();
                let pruned = self.selection.retain_known(&known);
                if pruned > 0 {
                    tracing::debug!(pruned, "dropped selected tasks missing from snapshot");
                }
                self.tasks = tasks;
                self.load_error = None;
                Ok(self.tasks.len())
            }
            Err(e) => {
                tracing::warn!(error = %e, "loading tasks failed");
                self.tasks.clear();
                self.load_error = Some(e.diagnostics());
                Err(e)
            }
        }
    }

    /// Switch to a new filter/report string and reload.
    pub fn set_filter(&mut self, filter_or_report: Option<String>) -> Result<usize, EngineError> {
        self.filter = filter_or_report;
        self.reload()
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn filter_label(&self) -> String {
        match self.filter.as_deref().map(str::trim) {
            None => crate::engine::query::DEFAULT_REPORT.to_string(),
            Some("") => "(all)".to_string(),
            Some(f) => f.to_string(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn hotkeys(&self) -> &Hotkeys {
        &self.hotkeys
    }

    /// Snapshot in display order.
    pub fn visible(&self) -> Vec<&Task> {
        sort::sort_tasks(&self.tasks, self.sort)
    }

    pub fn cycle_sort(&mut self) {
        self.sort.mode = self.sort.mode.next();
    }

    pub fn flip_sort_direction(&mut self) {
        self.sort.direction = self.sort.direction.flip();
    }

    pub fn toggle_field(&mut self, field: DateField) -> bool {
        self.date_fields.toggle(field)
    }

    pub fn toggle_selected(&mut self, uuid: &str) -> bool {
        self.selection.toggle(uuid)
    }

    pub fn select_all_visible(&mut self) {
        let uuids: Vec<String> = self.tasks.iter().map(|t| t.uuid.clone()).collect();
        self.selection.select_all(uuids);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn plan_schedule(
        &self,
        hotkey: char,
        cursor_uuid: Option<&str>,
    ) -> Result<BatchPlan, BatchError> {
        BatchPlan::schedule(
            hotkey,
            &self.hotkeys,
            &self.date_fields,
            &self.selection,
            cursor_uuid,
        )
    }

    pub fn plan_clear(&self, cursor_uuid: Option<&str>) -> Result<BatchPlan, BatchError> {
        BatchPlan::clear(&self.date_fields, &self.selection, cursor_uuid)
    }

    /// Run a validated plan, clear the selection, then resync. The resync
    /// happens even when every task failed.
    pub fn apply(&mut self, plan: &BatchPlan) -> BatchOutcome {
        let report = batch::run(self.engine.as_mut(), plan, &mut self.selection);
        let refresh = self.reload();
        BatchOutcome { report, refresh }
    }

    pub fn schedule(
        &mut self,
        hotkey: char,
        cursor_uuid: Option<&str>,
    ) -> Result<BatchOutcome, BatchError> {
        let plan = self.plan_schedule(hotkey, cursor_uuid)?;
        Ok(self.apply(&plan))
    }

    pub fn clear_fields(&mut self, cursor_uuid: Option<&str>) -> Result<BatchOutcome, BatchError> {
        let plan = self.plan_clear(cursor_uuid)?;
        Ok(self.apply(&plan))
    }
}

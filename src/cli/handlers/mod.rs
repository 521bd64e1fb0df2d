use std::error::Error;
use std::io::Write;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::engine::{TaskEngine, TaskWarrior};
use crate::model::{Config, DateField, DateFieldSelection, Hotkeys, SelectionSet};
use crate::ops::batch::{self, BatchPlan};

/// Returned after the report is printed when any task in a batch failed, so
/// the process exits non-zero.
#[derive(Debug, thiserror::Error)]
#[error("{failed} of {attempted} tasks failed")]
pub struct BatchFailed {
    pub failed: usize,
    pub attempted: usize,
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli, config: &Config) -> Result<(), Box<dyn Error>> {
    let Some(command) = cli.command else {
        return Ok(());
    };
    let mut engine = TaskWarrior::from_config(&config.engine);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(command, &mut engine, config, cli.json, &mut out)
}

/// Run one subcommand against `engine`, writing results to `out`.
pub fn run(
    command: Commands,
    engine: &mut dyn TaskEngine,
    config: &Config,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::Reports => cmd_reports(engine, json, out),
        Commands::List(args) => cmd_list(args, engine, config, json, out),
        Commands::Apply(args) => cmd_apply(args, engine, config, json, out),
        Commands::Clear(args) => cmd_clear(args, engine, config, json, out),
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_reports(
    engine: &mut dyn TaskEngine,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), Box<dyn Error>> {
    let names = engine.report_names()?;
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&names)?)?;
    } else {
        for name in &names {
            writeln!(out, "{}", name)?;
        }
    }
    Ok(())
}

fn cmd_list(
    args: ListArgs,
    engine: &mut dyn TaskEngine,
    config: &Config,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), Box<dyn Error>> {
    let filter = if args.all {
        String::new()
    } else if args.filter.is_empty() {
        config.default_report.clone()
    } else {
        args.filter.join(" ")
    };
    let tasks = engine.fetch_tasks(Some(&filter))?;

    if json {
        let tasks: Vec<TaskJson> = tasks.iter().map(task_to_json).collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&tasks)?)?;
    } else if tasks.is_empty() {
        writeln!(out, "No tasks")?;
    } else {
        for task in &tasks {
            writeln!(out, "{}", format_task_line(task))?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_apply(
    args: ApplyArgs,
    engine: &mut dyn TaskEngine,
    config: &Config,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), Box<dyn Error>> {
    let fields = field_selection(&args.fields, config);
    let selection = targets(args.uuids);
    let hotkeys = Hotkeys::from_config(&config.hotkeys);
    let plan = BatchPlan::schedule(args.hotkey, &hotkeys, &fields, &selection, None)?;
    finish_batch(engine, &plan, selection, json, out)
}

fn cmd_clear(
    args: ClearArgs,
    engine: &mut dyn TaskEngine,
    config: &Config,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), Box<dyn Error>> {
    let fields = field_selection(&args.fields, config);
    let selection = targets(args.uuids);
    let plan = BatchPlan::clear(&fields, &selection, None)?;
    finish_batch(engine, &plan, selection, json, out)
}

fn finish_batch(
    engine: &mut dyn TaskEngine,
    plan: &BatchPlan,
    mut selection: SelectionSet,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), Box<dyn Error>> {
    let report = batch::run(engine, plan, &mut selection);
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&batch_to_json(plan, &report))?)?;
    } else {
        for line in format_batch_report(plan, &report) {
            writeln!(out, "{}", line)?;
        }
    }
    if report.is_success() {
        Ok(())
    } else {
        Err(BatchFailed {
            failed: report.failures.len(),
            attempted: report.attempted,
        }
        .into())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fields named on the command line, else the configured defaults.
fn field_selection(explicit: &[DateField], config: &Config) -> DateFieldSelection {
    if explicit.is_empty() {
        DateFieldSelection::from_names(&config.default_date_fields)
    } else {
        DateFieldSelection::new(explicit.iter().copied())
    }
}

fn targets(uuids: Vec<String>) -> SelectionSet {
    let mut selection = SelectionSet::new();
    selection.select_all(uuids);
    selection
}

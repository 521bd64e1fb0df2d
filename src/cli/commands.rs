use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::DateField;

#[derive(Parser)]
#[command(name = "schedule", about = concat!("schedule v", env!("CARGO_PKG_VERSION"), " - bulk-reschedule Taskwarrior tasks"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Read configuration from this file instead of the default location
    #[arg(short = 'c', long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the report names the engine knows about
    Reports,
    /// Export tasks for a filter and/or report
    List(ListArgs),
    /// Set date fields on tasks to the value bound to a hotkey
    Apply(ApplyArgs),
    /// Clear date fields on tasks
    Clear(ClearArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Filter tokens, optionally ending in a report name (default: configured report)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub filter: Vec<String>,
    /// Export every task, ignoring the default report
    #[arg(long, conflicts_with = "filter")]
    pub all: bool,
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Hotkey (1-9) whose configured value is applied
    pub hotkey: char,
    /// Tasks to modify
    #[arg(required = true, value_name = "UUID")]
    pub uuids: Vec<String>,
    /// Date field to set (repeatable; default: configured fields)
    #[arg(short, long = "field", value_name = "FIELD")]
    pub fields: Vec<DateField>,
}

#[derive(Args)]
pub struct ClearArgs {
    /// Tasks to modify
    #[arg(required = true, value_name = "UUID")]
    pub uuids: Vec<String>,
    /// Date field to clear (repeatable; default: configured fields)
    #[arg(short, long = "field", value_name = "FIELD")]
    pub fields: Vec<DateField>,
}

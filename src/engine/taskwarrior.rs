use std::collections::BTreeSet;
use std::time::Duration;

use crate::model::{EngineConfig, Modifications, Task};

use super::error::EngineError;
use super::query::{self, ExportQuery};
use super::report_cache::{Clock, ReportCache, SystemClock};
use super::runner::{CommandOutput, CommandRunner, ProcessRunner};
use super::{ModifyOutcome, TaskEngine};

pub const READ_TIMEOUT: Duration = Duration::from_secs(30);
pub const WRITE_TIMEOUT: Duration = Duration::from_secs(10);

/// Adapter for the Taskwarrior `task` executable.
pub struct TaskWarrior<R = ProcessRunner, C = SystemClock> {
    runner: R,
    clock: C,
    cache: ReportCache,
    read_timeout: Duration,
    write_timeout: Duration,
}

impl TaskWarrior {
    pub fn from_config(config: &EngineConfig) -> Self {
        TaskWarrior::with_runner(ProcessRunner::new(&config.command), SystemClock)
            .with_timeouts(config.read_timeout(), config.write_timeout())
            .with_cache_ttl(config.report_cache_ttl())
    }
}

impl<R: CommandRunner, C: Clock> TaskWarrior<R, C> {
    pub fn with_runner(runner: R, clock: C) -> Self {
        TaskWarrior {
            runner,
            clock,
            cache: ReportCache::default(),
            read_timeout: READ_TIMEOUT,
            write_timeout: WRITE_TIMEOUT,
        }
    }

    pub fn with_timeouts(mut self, read: Duration, write: Duration) -> Self {
        self.read_timeout = read;
        self.write_timeout = write;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache = ReportCache::new(ttl);
        self
    }

    fn invoke(&self, args: &[String], timeout: Duration) -> Result<CommandOutput, EngineError> {
        tracing::debug!(command = %self.runner.render(args), "invoking engine");
        self.runner.run(args, timeout)
    }

    /// Run a read command, treating a non-zero exit as a failure.
    fn read(&self, args: &[String], timeout: Duration) -> Result<CommandOutput, EngineError> {
        let output = self.invoke(args, timeout)?;
        if !output.success() {
            let command = self.runner.render(args);
            tracing::warn!(
                %command,
                status = ?output.status,
                stderr = %output.stderr.trim(),
                "engine command failed"
            );
            return Err(EngineError::Failed {
                command,
                status: output.status,
                stderr: output.stderr,
            });
        }
        Ok(output)
    }
}

impl<R: CommandRunner, C: Clock> TaskEngine for TaskWarrior<R, C> {
    fn report_names(&mut self) -> Result<BTreeSet<String>, EngineError> {
        let now = self.clock.now();
        if let Some(names) = self.cache.get(now) {
            return Ok(names.clone());
        }

        let output = self.read(&query::config_args(), self.write_timeout)?;
        let names = query::parse_report_names(&output.stdout);
        tracing::debug!(count = names.len(), "refreshed report names");
        self.cache.store(names.clone(), now);
        Ok(names)
    }

    fn fetch_tasks(&mut self, filter_or_report: Option<&str>) -> Result<Vec<Task>, EngineError> {
        let tokens = query::tokenize(filter_or_report);
        let export = if tokens.is_empty() {
            ExportQuery::all()
        } else {
            let reports = self.report_names()?;
            ExportQuery::resolve(tokens, &reports)
        };

        let args = export.to_args();
        let output = self.read(&args, self.read_timeout)?;
        serde_json::from_str(&output.stdout).map_err(|source| EngineError::Malformed {
            command: self.runner.render(&args),
            source,
        })
    }

    fn modify_task(
        &mut self,
        uuid: &str,
        changes: &Modifications,
    ) -> Result<ModifyOutcome, EngineError> {
        let args = query::modify_args(uuid, changes);
        let output = self.invoke(&args, self.write_timeout)?;
        if output.success() {
            return Ok(ModifyOutcome::ok());
        }

        let diagnostics = if output.stderr.trim().is_empty() {
            output.stdout.trim().to_string()
        } else {
            output.stderr.trim().to_string()
        };
        tracing::warn!(%uuid, status = ?output.status, %diagnostics, "modify rejected");
        Ok(ModifyOutcome::rejected(diagnostics))
    }
}

use serde::Serialize;

use crate::model::{DateField, Task};
use crate::ops::batch::{BatchPlan, BatchReport};
use crate::util::dates::format_date;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: u64,
    pub uuid: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait: Option<String>,
}

#[derive(Serialize)]
pub struct FailureJson {
    pub uuid: String,
    pub reason: String,
}

#[derive(Serialize)]
pub struct BatchJson {
    pub value: String,
    pub fields: Vec<DateField>,
    pub attempted: usize,
    pub succeeded: usize,
    pub failures: Vec<FailureJson>,
}

pub fn task_to_json(task: &Task) -> TaskJson {
    let date = |field| task.date(field).map(str::to_string);
    TaskJson {
        id: task.id,
        uuid: task.uuid.clone(),
        description: task.description.clone(),
        project: task.project().map(str::to_string),
        status: task.status.clone(),
        scheduled: date(DateField::Scheduled),
        due: date(DateField::Due),
        wait: date(DateField::Wait),
    }
}

pub fn batch_to_json(plan: &BatchPlan, report: &BatchReport) -> BatchJson {
    BatchJson {
        value: plan.value.clone(),
        fields: plan.fields.clone(),
        attempted: report.attempted,
        succeeded: report.succeeded(),
        failures: report
            .failures
            .iter()
            .map(|f| FailureJson {
                uuid: f.uuid.clone(),
                reason: f.reason.clone(),
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// One-line summary: id, description, project and any set dates
pub fn format_task_line(task: &Task) -> String {
    let mut line = format!("{:>4} {}", task.id, task.description);
    if let Some(project) = task.project() {
        line.push_str(&format!("  project:{}", project));
    }
    for field in DateField::ALL {
        if let Some(raw) = task.date(field) {
            line.push_str(&format!("  {}:{}", field, format_date(raw, false)));
        }
    }
    line.push_str(&format!("  [{}]", short_uuid(&task.uuid)));
    line
}

fn short_uuid(uuid: &str) -> &str {
    uuid.get(..8).unwrap_or(uuid)
}

pub fn format_batch_report(plan: &BatchPlan, report: &BatchReport) -> Vec<String> {
    let mut lines = vec![format!("{}: {}", report.summary(), plan.describe())];
    for failure in &report.failures {
        let reason = failure.reason.lines().next().unwrap_or("");
        lines.push(format!("  failed {}: {}", failure.uuid, reason));
    }
    lines
}

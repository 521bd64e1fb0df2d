use std::cmp::Ordering;

use crate::model::{DateField, Task};

/// Display ordering of the task table. `Default` keeps the engine's order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Default,
    Project,
    Scheduled,
    Due,
    Wait,
}

impl SortMode {
    pub const ALL: [SortMode; 5] = [
        SortMode::Default,
        SortMode::Project,
        SortMode::Scheduled,
        SortMode::Due,
        SortMode::Wait,
    ];

    /// Next mode in cycle order, wrapping to `Default`
    pub fn next(self) -> SortMode {
        let idx = SortMode::ALL.iter().position(|m| *m == self).unwrap_or(0);
        SortMode::ALL[(idx + 1) % SortMode::ALL.len()]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Default => "default",
            SortMode::Project => "project",
            SortMode::Scheduled => "scheduled",
            SortMode::Due => "due",
            SortMode::Wait => "wait",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flip(self) -> SortDirection {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortOrder {
    pub mode: SortMode,
    pub direction: SortDirection,
}

impl SortOrder {
    /// "default", "due asc", "project desc"
    pub fn label(&self) -> String {
        match self.mode {
            SortMode::Default => self.mode.as_str().to_string(),
            mode => format!("{} {}", mode.as_str(), self.direction.as_str()),
        }
    }
}

fn sort_key(task: &Task, mode: SortMode) -> Option<String> {
    match mode {
        SortMode::Default => None,
        SortMode::Project => task.project().map(str::to_lowercase),
        SortMode::Scheduled => task.date(DateField::Scheduled).map(str::to_string),
        SortMode::Due => task.date(DateField::Due).map(str::to_string),
        SortMode::Wait => task.date(DateField::Wait).map(str::to_string),
    }
}

/// Tasks in display order. Tasks without a value for the sort key go last in
/// either direction; ties keep engine order.
pub fn sort_tasks(tasks: &[Task], order: SortOrder) -> Vec<&Task> {
    let mut sorted: Vec<&Task> = tasks.iter().collect();
    if order.mode == SortMode::Default {
        return sorted;
    }
    sorted.sort_by(|a, b| {
        match (sort_key(a, order.mode), sort_key(b, order.mode)) {
            (Some(x), Some(y)) => match order.direction {
                SortDirection::Asc => x.cmp(&y),
                SortDirection::Desc => y.cmp(&x),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
    sorted
}

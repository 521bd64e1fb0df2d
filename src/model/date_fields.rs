use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Date-valued task attributes that batch operations can target.
///
/// Declaration order is alphabetical so the derived `Ord` gives the sorted
/// display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateField {
    Due,
    Scheduled,
    Wait,
}

impl DateField {
    pub const ALL: [DateField; 3] = [DateField::Scheduled, DateField::Due, DateField::Wait];

    pub fn as_str(self) -> &'static str {
        match self {
            DateField::Due => "due",
            DateField::Scheduled => "scheduled",
            DateField::Wait => "wait",
        }
    }

    /// Column header
    pub fn label(self) -> &'static str {
        match self {
            DateField::Due => "Due",
            DateField::Scheduled => "Scheduled",
            DateField::Wait => "Wait",
        }
    }
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown date field '{0}' (expected scheduled, due or wait)")]
pub struct UnknownDateField(pub String);

impl FromStr for DateField {
    type Err = UnknownDateField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "due" => Ok(DateField::Due),
            "scheduled" => Ok(DateField::Scheduled),
            "wait" => Ok(DateField::Wait),
            _ => Err(UnknownDateField(s.to_string())),
        }
    }
}

/// Which date fields are currently active for batch operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateFieldSelection {
    active: BTreeSet<DateField>,
}

impl DateFieldSelection {
    pub fn new(initial: impl IntoIterator<Item = DateField>) -> Self {
        DateFieldSelection {
            active: initial.into_iter().collect(),
        }
    }

    /// Build from configured names, skipping (and logging) unknown ones.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let fields = names.iter().filter_map(|name| match name.as_ref().parse() {
            Ok(field) => Some(field),
            Err(err) => {
                tracing::warn!("ignoring configured date field: {}", err);
                None
            }
        });
        DateFieldSelection::new(fields)
    }

    /// Active fields, sorted by name.
    pub fn get_active(&self) -> Vec<DateField> {
        self.active.iter().copied().collect()
    }

    /// Flip membership of `field`. Returns true if it is now active.
    pub fn toggle(&mut self, field: DateField) -> bool {
        if self.active.remove(&field) {
            false
        } else {
            self.active.insert(field);
            true
        }
    }

    pub fn is_active(&self, field: DateField) -> bool {
        self.active.contains(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// "due, scheduled" or "none"
    pub fn label(&self) -> String {
        if self.active.is_empty() {
            return "none".to_string();
        }
        self.active
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

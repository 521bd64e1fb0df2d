use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::date_fields::DateField;

/// A task as exported by the engine.
///
/// Values are kept in the engine's representation: dates stay as the raw
/// `YYYYMMDDTHHMMSSZ` strings, and attributes we don't model are carried in
/// `extra` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Display number. Not stable: the engine renumbers, and completed tasks get 0.
    #[serde(default)]
    pub id: u64,
    /// Stable identity used for every mutation
    pub uuid: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait: Option<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl Task {
    pub fn new(id: u64, uuid: &str, description: &str) -> Self {
        Task {
            id,
            uuid: uuid.to_string(),
            description: description.to_string(),
            project: None,
            status: None,
            scheduled: None,
            due: None,
            wait: None,
            extra: IndexMap::new(),
        }
    }

    /// Raw value of a date field, `None` when absent or empty.
    pub fn date(&self, field: DateField) -> Option<&str> {
        let raw = match field {
            DateField::Scheduled => &self.scheduled,
            DateField::Due => &self.due,
            DateField::Wait => &self.wait,
        };
        raw.as_deref().filter(|s| !s.is_empty())
    }

    /// Project name, `None` when absent or empty.
    pub fn project(&self) -> Option<&str> {
        self.project.as_deref().filter(|s| !s.is_empty())
    }
}

/// Ordered field → value changes for a single modify call.
///
/// Keys are normally date field names, but any attribute name is passed
/// through to the engine as-is. An empty value clears the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Modifications(IndexMap<String, String>);

impl Modifications {
    pub fn new() -> Self {
        Modifications(IndexMap::new())
    }

    /// Assign `value` to every field in `fields`.
    pub fn assign_all<'a>(fields: impl IntoIterator<Item = &'a str>, value: &str) -> Self {
        let mut changes = Modifications::new();
        for field in fields {
            changes.set(field, value);
        }
        changes
    }

    pub fn set(&mut self, field: &str, value: &str) {
        self.0.insert(field.to_string(), value.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

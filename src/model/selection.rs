use std::collections::HashSet;

use indexmap::IndexSet;

/// Tasks marked for a batch operation, by UUID.
///
/// Row indices are never stored: they move on every refresh and sort.
/// Iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    uuids: IndexSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        SelectionSet::default()
    }

    /// Add if absent, remove if present. Returns true if now selected.
    pub fn toggle(&mut self, uuid: &str) -> bool {
        if self.uuids.shift_remove(uuid) {
            false
        } else {
            self.uuids.insert(uuid.to_string());
            true
        }
    }

    pub fn select_all<I, S>(&mut self, uuids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.uuids.extend(uuids.into_iter().map(Into::into));
    }

    pub fn clear(&mut self) {
        self.uuids.clear();
    }

    pub fn contains(&self, uuid: &str) -> bool {
        self.uuids.contains(uuid)
    }

    pub fn len(&self) -> usize {
        self.uuids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uuids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.uuids.iter().map(String::as_str)
    }

    /// The explicit selection if there is one, else the task under the cursor.
    pub fn effective_targets(&self, cursor_uuid: Option<&str>) -> Vec<String> {
        if !self.uuids.is_empty() {
            return self.uuids.iter().cloned().collect();
        }
        cursor_uuid
            .filter(|uuid| !uuid.is_empty())
            .map(|uuid| vec![uuid.to_string()])
            .unwrap_or_default()
    }

    /// Drop UUIDs that are not in `known`. Returns how many were removed.
    pub fn retain_known(&mut self, known: &HashSet<&str>) -> usize {
        let before = self.uuids.len();
        self.uuids.retain(|uuid| known.contains(uuid.as_str()));
        before - self.uuids.len()
    }
}

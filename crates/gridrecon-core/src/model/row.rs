use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Change classification shared by rows and columns.
///
/// The absence of a status (`None`) means unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    Added,
    Removed,
    Modified,
}

impl ChangeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeStatus::Added => "added",
            ChangeStatus::Removed => "removed",
            ChangeStatus::Modified => "modified",
        }
    }
}

/// A row handed to the rendering layer.
///
/// Bookkeeping (`index`, `status`) lives beside the user data rather than in
/// it, so user columns named `_index` or `__status` are plain data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowObject {
    /// 1-based ordinal for dataset rows, derived identity number for reconciled rows
    #[serde(rename = "_index")]
    pub index: f64,
    /// `None` when unchanged
    #[serde(rename = "__status")]
    pub status: Option<ChangeStatus>,
    /// Column key to raw value
    pub values: BTreeMap<String, Value>,
}

impl RowObject {
    pub fn new(index: f64) -> Self {
        Self {
            index,
            status: None,
            values: BTreeMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    pub fn is_changed(&self) -> bool {
        self.status.is_some()
    }
}

/// Per-call reconciliation counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowStats {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
}

impl RowStats {
    pub fn record(&mut self, status: ChangeStatus) {
        match status {
            ChangeStatus::Added => self.added += 1,
            ChangeStatus::Removed => self.removed += 1,
            ChangeStatus::Modified => self.modified += 1,
        }
    }

    /// Number of rows with a defined status
    pub fn total(&self) -> usize {
        self.added + self.removed + self.modified
    }
}

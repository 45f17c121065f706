//! Column schema maps.
//!
//! A [`ColumnSchema`] is the per-column metadata the reconciler reads and
//! the display planner walks. Entries keep insertion order, which is the
//! "natural" column order used for display.
//!
//! Three builders exist:
//!
//! - [`build_column_map`] for a single dataset
//! - [`build_membership_column_map`] for a dataset carrying `in_a`/`in_b` flags
//! - [`merge_schemas`] for two independently shaped datasets

use serde::Serialize;
use std::collections::HashMap;

use crate::errors::ReconError;
use crate::model::{ChangeStatus, ColumnType, Dataset};
use crate::options::CasePolicy;

/// Flag column marking presence on the base side of a pre-joined dataset.
pub const IN_A: &str = "in_a";
/// Flag column marking presence on the current side of a pre-joined dataset.
pub const IN_B: &str = "in_b";

/// Column key on each side of a merged schema. `None` means the column does
/// not exist on that side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SideKeys {
    pub base: Option<String>,
    pub current: Option<String>,
}

/// Reconciliation metadata for one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnMapEntry {
    pub name: String,
    pub key: String,
    pub column_type: ColumnType,
    pub status: Option<ChangeStatus>,
    /// Ordinal position in the source (or merged) column list
    pub index: Option<usize>,
    /// Present only on entries produced by [`merge_schemas`]
    pub sides: Option<SideKeys>,
}

impl ColumnMapEntry {
    /// Keys to read on the base and current rows when comparing this column.
    ///
    /// Single-dataset entries read `key` on both sides.
    pub fn resolved_keys(&self) -> (Option<&str>, Option<&str>) {
        match &self.sides {
            Some(sides) => (sides.base.as_deref(), sides.current.as_deref()),
            None => (Some(self.key.as_str()), Some(self.key.as_str())),
        }
    }
}

/// Ordered column key → [`ColumnMapEntry`] map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSchema {
    entries: Vec<ColumnMapEntry>,
    by_key: HashMap<String, usize>,
}

impl ColumnSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry; an entry with the same key is replaced in place.
    pub fn insert(&mut self, entry: ColumnMapEntry) {
        match self.by_key.get(&entry.key) {
            Some(&pos) => self.entries[pos] = entry,
            None => {
                self.by_key.insert(entry.key.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&ColumnMapEntry> {
        self.by_key.get(key).map(|&pos| &self.entries[pos])
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ColumnMapEntry> {
        self.by_key.get(key).map(|&pos| &mut self.entries[pos])
    }

    /// Look up an entry, honoring the case policy.
    pub fn find(&self, key: &str, policy: CasePolicy) -> Option<&ColumnMapEntry> {
        self.get(key).or_else(|| {
            self.entries
                .iter()
                .find(|entry| policy.matches(&entry.key, key))
        })
    }

    pub fn entries(&self) -> &[ColumnMapEntry] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut ColumnMapEntry> {
        self.entries.iter_mut()
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.key.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys of entries whose status is `Modified`
    pub fn modified_keys(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.status == Some(ChangeStatus::Modified))
            .map(|e| e.key.as_str())
            .collect()
    }
}

/// Build a column map for a single dataset.
///
/// `index` is the column's ordinal position. An absent dataset yields an
/// empty map.
pub fn build_column_map(dataset: Option<&Dataset>) -> ColumnSchema {
    let columns = dataset.map(|d| d.columns.as_slice()).unwrap_or_default();
    let mut schema = ColumnSchema::new();
    for (index, column) in columns.iter().enumerate() {
        schema.insert(ColumnMapEntry {
            name: column.name.clone(),
            key: column.key.clone(),
            column_type: column.column_type,
            status: None,
            index: Some(index),
            sides: None,
        });
    }
    schema
}

/// Build a column map for a membership-flagged dataset.
///
/// The `in_a`/`in_b` flag columns must exist (exact, lowercase keys). They
/// describe row membership rather than user data and are left out of the
/// returned map; `index` still reflects the original column position.
///
/// # Errors
///
/// `MissingRequiredColumn` naming the first absent flag column.
pub fn build_membership_column_map(dataset: &Dataset) -> Result<ColumnSchema, ReconError> {
    for required in [IN_A, IN_B] {
        if dataset.column(required).is_none() {
            return Err(ReconError::MissingRequiredColumn {
                column: required.to_string(),
                available: dataset.column_keys(),
            });
        }
    }

    let mut schema = build_column_map(Some(dataset));
    schema.entries.retain(|e| e.key != IN_A && e.key != IN_B);
    schema.by_key = schema
        .entries
        .iter()
        .enumerate()
        .map(|(pos, e)| (e.key.clone(), pos))
        .collect();
    Ok(schema)
}

/// Union the column keys of two datasets.
///
/// Order: base columns in order, then current-only columns in order.
/// A key on both sides carries the base column's name and type and no
/// status; a current-only key is `Added`, a base-only key is `Removed`,
/// with the missing side's key set to `None`.
pub fn merge_schemas(base: Option<&Dataset>, current: Option<&Dataset>) -> ColumnSchema {
    let base_columns = base.map(|d| d.columns.as_slice()).unwrap_or_default();
    let current_columns = current.map(|d| d.columns.as_slice()).unwrap_or_default();

    let mut schema = ColumnSchema::new();

    for column in base_columns {
        let in_current = current_columns.iter().any(|c| c.key == column.key);
        schema.insert(ColumnMapEntry {
            name: column.name.clone(),
            key: column.key.clone(),
            column_type: column.column_type,
            status: (!in_current).then_some(ChangeStatus::Removed),
            index: Some(schema.len()),
            sides: Some(SideKeys {
                base: Some(column.key.clone()),
                current: in_current.then(|| column.key.clone()),
            }),
        });
    }

    for column in current_columns {
        if schema.get(&column.key).is_some() {
            continue;
        }
        schema.insert(ColumnMapEntry {
            name: column.name.clone(),
            key: column.key.clone(),
            column_type: column.column_type,
            status: Some(ChangeStatus::Added),
            index: Some(schema.len()),
            sides: Some(SideKeys {
                base: None,
                current: Some(column.key.clone()),
            }),
        });
    }

    schema
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Column;

    fn dataset(keys: &[&str]) -> Dataset {
        Dataset::new(
            keys.iter().map(|k| Column::new(*k, ColumnType::Text)).collect(),
            Vec::new(),
        )
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut schema = build_column_map(Some(&dataset(&["a", "b"])));
        let mut entry = schema.get("a").unwrap().clone();
        entry.column_type = ColumnType::Number;
        schema.insert(entry);
        assert_eq!(schema.keys(), vec!["a", "b"]);
        assert_eq!(schema.get("a").unwrap().column_type, ColumnType::Number);
    }

    #[test]
    fn test_find_honors_case_policy() {
        let schema = build_column_map(Some(&dataset(&["Id"])));
        assert!(schema.find("id", CasePolicy::Sensitive).is_none());
        assert_eq!(
            schema.find("id", CasePolicy::Insensitive).map(|e| e.key.as_str()),
            Some("Id")
        );
    }

    #[test]
    fn test_membership_map_drops_flags_keeps_positions() {
        let schema =
            build_membership_column_map(&dataset(&["id", "in_a", "in_b", "value"])).unwrap();
        assert_eq!(schema.keys(), vec!["id", "value"]);
        assert_eq!(schema.get("value").unwrap().index, Some(3));
        assert!(schema.get("in_a").is_none());
    }

    #[test]
    fn test_resolved_keys() {
        let single = build_column_map(Some(&dataset(&["a"])));
        assert_eq!(single.get("a").unwrap().resolved_keys(), (Some("a"), Some("a")));

        let merged = merge_schemas(Some(&dataset(&["a"])), None);
        assert_eq!(merged.get("a").unwrap().resolved_keys(), (Some("a"), None));
    }
}

use std::collections::HashMap;

use crate::model::{Column, Dataset};
use crate::options::CasePolicy;

/// Find rows whose length differs from the column count
///
/// Returns list of (row_index, actual_length) tuples. Empty when the dataset
/// has no rows.
pub fn find_row_length_mismatches(dataset: &Dataset) -> Vec<(usize, usize)> {
    let expected = dataset.columns.len();
    dataset
        .data
        .iter()
        .enumerate()
        .filter(|(_, row)| row.len() != expected)
        .map(|(i, row)| (i, row.len()))
        .collect()
}

/// Find columns whose key repeats an earlier column's key
///
/// Returns list of (column_index, first_index) tuples. Keys compare exactly.
pub fn find_duplicate_column_keys(columns: &[Column]) -> Vec<(usize, usize)> {
    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    let mut duplicates = Vec::new();

    for (index, column) in columns.iter().enumerate() {
        match first_seen.get(column.key.as_str()) {
            Some(&first) => duplicates.push((index, first)),
            None => {
                first_seen.insert(column.key.as_str(), index);
            }
        }
    }

    duplicates
}

/// Find columns with an empty key
pub fn find_empty_column_keys(columns: &[Column]) -> Vec<usize> {
    columns
        .iter()
        .enumerate()
        .filter(|(_, c)| c.key.is_empty())
        .map(|(i, _)| i)
        .collect()
}

/// Find entries of `keys` that repeat an earlier entry under the case policy
pub fn find_duplicate_keys(keys: &[String], policy: CasePolicy) -> Vec<String> {
    let mut duplicates = Vec::new();
    for (i, key) in keys.iter().enumerate() {
        if policy.contains(&keys[..i], key) && !duplicates.contains(key) {
            duplicates.push(key.clone());
        }
    }
    duplicates
}

/// Find requested keys that match none of `available` under the case policy
pub fn find_unknown_keys<S: AsRef<str>>(
    keys: &[String],
    available: &[S],
    policy: CasePolicy,
) -> Vec<String> {
    keys.iter()
        .filter(|key| !policy.contains(available, key))
        .cloned()
        .collect()
}

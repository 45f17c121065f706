//! Row reconciliation.
//!
//! Matches base and current rows by identity key, classifies every identity
//! as added / removed / modified / unchanged and derives column-level
//! `Modified` status from the rows that actually differ.
//!
//! The schema is taken by value and handed back in the [`Reconciliation`],
//! so column statuses computed by one call can never leak into another.

use crate::identity::{key_to_number, IdentityMap};
use crate::model::value::deep_equal;
use crate::model::{ChangeStatus, Column, RowObject, RowStats};
use crate::options::CasePolicy;
use crate::schema::{ColumnMapEntry, ColumnSchema};

/// Prefix for base-side values in reconciled rows
pub const BASE_PREFIX: &str = "base__";
/// Prefix for current-side values in reconciled rows
pub const CURRENT_PREFIX: &str = "current__";

/// Column name reserved for positional bookkeeping; never compared.
const RESERVED_INDEX_COLUMN: &str = "index";

/// Inputs to [`reconcile_rows`].
#[derive(Debug)]
pub struct ReconcileInput<'a> {
    pub base: &'a IdentityMap,
    pub current: &'a IdentityMap,
    pub base_columns: &'a [Column],
    pub current_columns: &'a [Column],
    pub schema: ColumnSchema,
    pub primary_keys: &'a [String],
    pub changed_only: bool,
    pub case_policy: CasePolicy,
}

/// Output of [`reconcile_rows`].
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub rows: Vec<RowObject>,
    pub row_stats: RowStats,
    /// Input schema with `Modified` set on every column that differed in any row
    pub schema: ColumnSchema,
}

/// Reconcile base and current rows.
///
/// Identities are visited base-first (in base map order), then current-only
/// identities in current map order. Each identity yields one row whose
/// `index` is [`key_to_number`] of the identity. Primary-key values are
/// stored under the lowercased column key; other values under
/// `base__<key>` / `current__<key>` (lowercased).
///
/// With `changed_only`, unchanged rows are dropped from the output (they
/// still participate in column status detection).
pub fn reconcile_rows(input: ReconcileInput<'_>) -> Reconciliation {
    let ReconcileInput {
        base,
        current,
        base_columns,
        current_columns,
        mut schema,
        primary_keys,
        changed_only,
        case_policy,
    } = input;

    let identities: Vec<&str> = base
        .keys()
        .chain(current.keys().filter(|k| !base.contains_key(k)))
        .collect();

    let mut rows = Vec::with_capacity(identities.len());
    let mut row_stats = RowStats::default();

    for identity in identities {
        let base_row = base.get(identity);
        let current_row = current.get(identity);

        let mut row = RowObject::new(key_to_number(identity));

        if let Some(base_row) = base_row {
            populate(&mut row, base_row, base_columns, BASE_PREFIX, primary_keys, case_policy);
        }
        if let Some(current_row) = current_row {
            populate(
                &mut row,
                current_row,
                current_columns,
                CURRENT_PREFIX,
                primary_keys,
                case_policy,
            );
        }

        row.status = match (base_row, current_row) {
            (None, Some(_)) => Some(ChangeStatus::Added),
            (Some(_), None) => Some(ChangeStatus::Removed),
            (Some(base_row), Some(current_row)) => {
                detect_modification(&mut schema, base_row, current_row, primary_keys, case_policy)
            }
            (None, None) => None,
        };

        if let Some(status) = row.status {
            row_stats.record(status);
        }
        rows.push(row);
    }

    if changed_only {
        rows.retain(RowObject::is_changed);
    }

    tracing::debug!(
        op = "reconcile_rows",
        row_count = rows.len(),
        added = row_stats.added,
        removed = row_stats.removed,
        modified = row_stats.modified,
        modified_columns = schema.modified_keys().len(),
    );

    Reconciliation {
        rows,
        row_stats,
        schema,
    }
}

fn populate(
    row: &mut RowObject,
    source: &RowObject,
    columns: &[Column],
    prefix: &str,
    primary_keys: &[String],
    case_policy: CasePolicy,
) {
    for column in columns {
        let Some(value) = source.get(&column.key) else {
            continue;
        };
        let lowered = column.key.to_lowercase();
        if case_policy.contains(primary_keys, &column.key) {
            row.insert(lowered, value.clone());
        } else {
            row.insert(format!("{}{}", prefix, lowered), value.clone());
        }
    }
}

/// Compare every comparable schema column; mark differing columns
/// `Modified` and report whether the row changed.
fn detect_modification(
    schema: &mut ColumnSchema,
    base_row: &RowObject,
    current_row: &RowObject,
    primary_keys: &[String],
    case_policy: CasePolicy,
) -> Option<ChangeStatus> {
    let mut modified = false;
    for entry in schema.entries_mut() {
        if !is_comparable(entry, primary_keys, case_policy) {
            continue;
        }
        // A column present on only one side cannot be modified.
        let (Some(base_key), Some(current_key)) = entry.resolved_keys() else {
            continue;
        };
        if !deep_equal(base_row.get(base_key), current_row.get(current_key)) {
            modified = true;
            entry.status = Some(ChangeStatus::Modified);
        }
    }
    modified.then_some(ChangeStatus::Modified)
}

fn is_comparable(entry: &ColumnMapEntry, primary_keys: &[String], case_policy: CasePolicy) -> bool {
    entry.name != RESERVED_INDEX_COLUMN
        && entry.key != RESERVED_INDEX_COLUMN
        && !case_policy.contains(primary_keys, &entry.key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColumnType;
    use crate::schema::build_column_map;
    use crate::model::Dataset;
    use serde_json::json;

    fn keyed(rows: &[(&str, serde_json::Value)]) -> IdentityMap {
        let mut map = IdentityMap::new();
        for (i, (identity, value)) in rows.iter().enumerate() {
            let mut row = RowObject::new((i + 1) as f64);
            row.insert("id", json!(i + 1));
            row.insert("v", value.clone());
            map.insert(identity.to_string(), row);
        }
        map
    }

    #[test]
    fn test_unchanged_rows_have_no_status() {
        let columns = vec![
            Column::new("id", ColumnType::Integer),
            Column::new("v", ColumnType::Text),
        ];
        let schema = build_column_map(Some(&Dataset::new(columns.clone(), vec![])));
        let base = keyed(&[("1", json!("a"))]);
        let current = keyed(&[("1", json!("a"))]);
        let pks = vec!["id".to_string()];

        let out = reconcile_rows(ReconcileInput {
            base: &base,
            current: &current,
            base_columns: &columns,
            current_columns: &columns,
            schema,
            primary_keys: &pks,
            changed_only: false,
            case_policy: CasePolicy::Sensitive,
        });

        assert_eq!(out.rows.len(), 1);
        assert_eq!(out.rows[0].status, None);
        assert_eq!(out.row_stats, RowStats::default());
        assert!(out.schema.modified_keys().is_empty());
        assert_eq!(out.rows[0].get("id"), Some(&json!(1)));
        assert_eq!(out.rows[0].get("base__v"), Some(&json!("a")));
        assert_eq!(out.rows[0].get("current__v"), Some(&json!("a")));
    }

    #[test]
    fn test_reserved_index_column_is_never_compared() {
        let columns = vec![
            Column::new("index", ColumnType::Integer),
            Column::new("v", ColumnType::Text),
        ];
        let schema = build_column_map(Some(&Dataset::new(columns.clone(), vec![])));
        let mut base = IdentityMap::new();
        let mut current = IdentityMap::new();
        let mut b = RowObject::new(1.0);
        b.insert("index", json!(1));
        b.insert("v", json!("same"));
        let mut c = RowObject::new(1.0);
        c.insert("index", json!(99));
        c.insert("v", json!("same"));
        base.insert("1".into(), b);
        current.insert("1".into(), c);

        let out = reconcile_rows(ReconcileInput {
            base: &base,
            current: &current,
            base_columns: &columns,
            current_columns: &columns,
            schema,
            primary_keys: &[],
            changed_only: false,
            case_policy: CasePolicy::Sensitive,
        });

        assert_eq!(out.rows[0].status, None);
        assert_eq!(out.schema.get("index").unwrap().status, None);
    }
}

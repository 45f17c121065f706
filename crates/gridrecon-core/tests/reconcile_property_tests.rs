mod common;

use common::dataset;
use gridrecon_core::schema::merge_schemas;
use gridrecon_core::{to_diff_grid, ChangeStatus, ColumnType, Dataset, GridOptions};
use proptest::prelude::*;
use serde_json::json;
use std::collections::HashSet;

const POOL: [&str; 5] = ["id", "a", "b", "c", "d"];

/// A dataset over a subset of `POOL` (always including `id`) with small
/// integer cells, so identities and values collide often.
fn arb_dataset() -> impl Strategy<Value = Dataset> {
    (
        prop::collection::vec(any::<bool>(), POOL.len() - 1),
        prop::collection::vec(prop::collection::vec(0u8..4, POOL.len()), 0..8),
    )
        .prop_map(|(keep, rows)| {
            let keys: Vec<&str> = std::iter::once(POOL[0])
                .chain(
                    POOL[1..]
                        .iter()
                        .zip(&keep)
                        .filter(|(_, k)| **k)
                        .map(|(c, _)| *c),
                )
                .collect();
            let columns: Vec<(&str, ColumnType)> =
                keys.iter().map(|k| (*k, ColumnType::Integer)).collect();
            let data = rows
                .into_iter()
                .map(|row| row.into_iter().take(keys.len()).map(|v| json!(v)).collect())
                .collect();
            dataset(&columns, data)
        })
}

fn identities(ds: &Dataset) -> HashSet<u64> {
    ds.data.iter().filter_map(|row| row[0].as_u64()).collect()
}

proptest! {
    #[test]
    fn prop_row_classification_is_total(
        base in arb_dataset(),
        current in arb_dataset(),
        changed_only in any::<bool>(),
    ) {
        let options = GridOptions::default()
            .with_primary_keys(["id"])
            .with_changed_only(changed_only);
        let grid = to_diff_grid(Some(&base), Some(&current), &options).unwrap();

        let count = |status| grid.rows.iter().filter(|r| r.status == Some(status)).count();
        prop_assert_eq!(grid.row_stats.added, count(ChangeStatus::Added));
        prop_assert_eq!(grid.row_stats.removed, count(ChangeStatus::Removed));
        prop_assert_eq!(grid.row_stats.modified, count(ChangeStatus::Modified));
        prop_assert_eq!(
            grid.row_stats.total(),
            grid.rows.iter().filter(|r| r.status.is_some()).count()
        );

        let base_ids = identities(&base);
        let current_ids = identities(&current);
        let union: HashSet<_> = base_ids.union(&current_ids).collect();
        if changed_only {
            prop_assert!(grid.rows.iter().all(|r| r.status.is_some()));
        } else {
            prop_assert_eq!(grid.rows.len(), union.len());
        }
        prop_assert_eq!(
            grid.row_stats.added,
            current_ids.difference(&base_ids).count()
        );
        prop_assert_eq!(
            grid.row_stats.removed,
            base_ids.difference(&current_ids).count()
        );
    }

    #[test]
    fn prop_merged_sides_match_status(base in arb_dataset(), current in arb_dataset()) {
        let schema = merge_schemas(Some(&base), Some(&current));
        for entry in schema.entries() {
            let sides = entry.sides.as_ref().unwrap();
            prop_assert_eq!(sides.base.is_none(), entry.status == Some(ChangeStatus::Added));
            prop_assert_eq!(sides.current.is_none(), entry.status == Some(ChangeStatus::Removed));
        }
    }

    #[test]
    fn prop_one_sided_columns_never_become_modified(
        base in arb_dataset(),
        current in arb_dataset(),
    ) {
        let options = GridOptions::default().with_primary_keys(["id"]);
        let grid = to_diff_grid(Some(&base), Some(&current), &options).unwrap();

        let base_keys: HashSet<_> = base.column_keys().into_iter().collect();
        let current_keys: HashSet<_> = current.column_keys().into_iter().collect();
        for column in &grid.columns {
            let in_base = base_keys.contains(&column.key);
            let in_current = current_keys.contains(&column.key);
            match (in_base, in_current) {
                (true, false) => prop_assert_eq!(column.column_status, Some(ChangeStatus::Removed)),
                (false, true) => prop_assert_eq!(column.column_status, Some(ChangeStatus::Added)),
                _ => prop_assert_ne!(column.column_status, Some(ChangeStatus::Added)),
            }
        }
    }
}

use crate::display::{display_columns, DisplayRequest};
use crate::errors::Result;
use crate::identity::{primary_key_value, IdentityMap};
use crate::model::value::is_truthy_flag;
use crate::model::{Column, Dataset};
use crate::options::GridOptions;
use crate::reconcile::{reconcile_rows, ReconcileInput};
use crate::rules::validation::{validate_membership_input, CONTEXT_MEMBERSHIP};
use crate::schema::{build_membership_column_map, ColumnSchema, IN_A, IN_B};
use crate::{log_op_end, log_op_error, log_op_start};

use super::{elapsed_ms, DiffGrid};

/// Diff view over one pre-joined dataset carrying `in_a`/`in_b` flags.
///
/// A row flagged `in_a` is a base row, a row flagged `in_b` a current row;
/// one row may be both. The flag columns never reach the output. Strict by
/// default: a missing pinned column is an error unless `strict_mode` is
/// `Some(false)`.
///
/// # Errors
///
/// Any validation failure, including a missing primary key or flag column.
pub fn to_membership_diff_grid(
    dataset: Option<&Dataset>,
    options: &GridOptions,
) -> Result<DiffGrid> {
    log_op_start!("membership_diff_grid");
    let start = std::time::Instant::now();

    let grid = to_membership_diff_grid_impl(dataset, options).map_err(|e| {
        log_op_error!(
            "membership_diff_grid",
            e.clone(),
            duration_ms = elapsed_ms(start)
        );
        e
    })?;

    log_op_end!(
        "membership_diff_grid",
        duration_ms = elapsed_ms(start),
        row_count = grid.rows.len(),
        column_count = grid.columns.len(),
        added = grid.row_stats.added,
        removed = grid.row_stats.removed,
        modified = grid.row_stats.modified
    );

    Ok(grid)
}

fn to_membership_diff_grid_impl(
    dataset: Option<&Dataset>,
    options: &GridOptions,
) -> Result<DiffGrid> {
    validate_membership_input(dataset, options)?;

    let (schema, data_columns) = match dataset {
        Some(dataset) => (
            build_membership_column_map(dataset).map_err(|e| e.in_context(CONTEXT_MEMBERSHIP))?,
            dataset
                .columns
                .iter()
                .filter(|c| c.key != IN_A && c.key != IN_B)
                .cloned()
                .collect(),
        ),
        None => (ColumnSchema::new(), Vec::<Column>::new()),
    };

    let mut base_map = IdentityMap::new();
    let mut current_map = IdentityMap::new();

    if let Some(dataset) = dataset {
        for mut row in dataset.to_row_objects() {
            let identity =
                primary_key_value(&dataset.columns, &options.primary_keys, &row, options.case_policy)
                    .map_err(|e| e.in_context(CONTEXT_MEMBERSHIP))?;
            let in_base = is_truthy_flag(row.values.remove(IN_A).as_ref());
            let in_current = is_truthy_flag(row.values.remove(IN_B).as_ref());

            match (in_base, in_current) {
                (true, true) => {
                    base_map.insert(identity.clone(), row.clone());
                    current_map.insert(identity, row);
                }
                (true, false) => {
                    base_map.insert(identity, row);
                }
                (false, true) => {
                    current_map.insert(identity, row);
                }
                (false, false) => {
                    tracing::debug!(identity = %identity, "row in neither side, skipped");
                }
            }
        }
    }

    let reconciliation = reconcile_rows(ReconcileInput {
        base: &base_map,
        current: &current_map,
        base_columns: &data_columns,
        current_columns: &data_columns,
        schema,
        primary_keys: &options.primary_keys,
        changed_only: options.changed_only,
        case_policy: options.case_policy,
    });

    let columns = display_columns(&DisplayRequest {
        schema: &reconciliation.schema,
        options,
        has_modified_rows: reconciliation.row_stats.modified > 0,
        strict: options.strict_mode.unwrap_or(true),
    })
    .map_err(|e| e.in_context(CONTEXT_MEMBERSHIP))?;

    Ok(DiffGrid {
        columns,
        rows: reconciliation.rows,
        row_stats: reconciliation.row_stats,
        invalid_pkey_base: base_map.has_duplicates(),
        invalid_pkey_current: current_map.has_duplicates(),
        display_mode: options.display_mode,
        base_title: options.base_title.clone(),
        current_title: options.current_title.clone(),
    })
}

use crate::display::{display_columns, DisplayRequest};
use crate::errors::Result;
use crate::identity::{primary_key_value_lenient, IdentityMap};
use crate::model::Dataset;
use crate::options::GridOptions;
use crate::reconcile::{reconcile_rows, ReconcileInput};
use crate::rules::validation::{validate_diff_input, CONTEXT_DIFF};
use crate::schema::merge_schemas;
use crate::{log_op_end, log_op_error, log_op_start};

use super::{elapsed_ms, DiffGrid};

/// Two-dataset diff view.
///
/// Rows are matched by primary key (or by ordinal without one). A side that
/// lacks one of the primary-key columns renders it as `null` in its identity
/// keys. Lenient by default: frozen columns missing from both schemas are
/// skipped unless `strict_mode` is `Some(true)`.
///
/// # Errors
///
/// Any validation failure of either dataset or the options.
pub fn to_diff_grid(
    base: Option<&Dataset>,
    current: Option<&Dataset>,
    options: &GridOptions,
) -> Result<DiffGrid> {
    log_op_start!("diff_grid");
    let start = std::time::Instant::now();

    let grid = to_diff_grid_impl(base, current, options).map_err(|e| {
        log_op_error!("diff_grid", e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!(
        "diff_grid",
        duration_ms = elapsed_ms(start),
        row_count = grid.rows.len(),
        column_count = grid.columns.len(),
        added = grid.row_stats.added,
        removed = grid.row_stats.removed,
        modified = grid.row_stats.modified
    );

    Ok(grid)
}

fn to_diff_grid_impl(
    base: Option<&Dataset>,
    current: Option<&Dataset>,
    options: &GridOptions,
) -> Result<DiffGrid> {
    validate_diff_input(base, current, options)?;

    let schema = merge_schemas(base, current);
    let base_map = identity_map(base, options);
    let current_map = identity_map(current, options);

    for (side, map) in [("base", &base_map), ("current", &current_map)] {
        if map.has_duplicates() {
            tracing::warn!(
                side,
                duplicates = map.duplicates().len(),
                "duplicate row identities, later rows replace earlier ones"
            );
        }
    }

    let reconciliation = reconcile_rows(ReconcileInput {
        base: &base_map,
        current: &current_map,
        base_columns: base.map(|d| d.columns.as_slice()).unwrap_or_default(),
        current_columns: current.map(|d| d.columns.as_slice()).unwrap_or_default(),
        schema,
        primary_keys: &options.primary_keys,
        changed_only: options.changed_only,
        case_policy: options.case_policy,
    });

    let columns = display_columns(&DisplayRequest {
        schema: &reconciliation.schema,
        options,
        has_modified_rows: reconciliation.row_stats.modified > 0,
        strict: options.strict_mode.unwrap_or(false),
    })
    .map_err(|e| e.in_context(CONTEXT_DIFF))?;

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

fn identity_map(dataset: Option<&Dataset>, options: &GridOptions) -> IdentityMap {
    let mut map = IdentityMap::new();
    let Some(dataset) = dataset else {
        return map;
    };
    for row in dataset.to_row_objects() {
        let identity = primary_key_value_lenient(
            &dataset.columns,
            &options.primary_keys,
            &row,
            options.case_policy,
        );
        map.insert(identity, row);
    }
    map
}

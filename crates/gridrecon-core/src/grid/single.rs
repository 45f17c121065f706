use crate::display::{simple_display_columns, DisplayRequest};
use crate::errors::Result;
use crate::model::Dataset;
use crate::options::GridOptions;
use crate::rules::validation::{validate_single_input, CONTEXT_SINGLE};
use crate::schema::build_column_map;
use crate::{log_op_end, log_op_error, log_op_start};

use super::{elapsed_ms, DataGrid};

/// Single-dataset view: every row as-is, columns ordered for display.
///
/// Strict by default: a pinned column missing from the dataset is an
/// error unless `strict_mode` is `Some(false)`.
///
/// # Errors
///
/// Any validation failure of the dataset or options.
pub fn to_data_grid(dataset: Option<&Dataset>, options: &GridOptions) -> Result<DataGrid> {
    log_op_start!("data_grid");
    let start = std::time::Instant::now();

    let grid = to_data_grid_impl(dataset, options).map_err(|e| {
        log_op_error!("data_grid", e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!(
        "data_grid",
        duration_ms = elapsed_ms(start),
        row_count = grid.rows.len(),
        column_count = grid.columns.len()
    );

    Ok(grid)
}

fn to_data_grid_impl(dataset: Option<&Dataset>, options: &GridOptions) -> Result<DataGrid> {
    validate_single_input(dataset, options)?;

    let schema = build_column_map(dataset);
    let columns = simple_display_columns(&DisplayRequest {
        schema: &schema,
        options,
        has_modified_rows: false,
        strict: options.strict_mode.unwrap_or(true),
    })
    .map_err(|e| e.in_context(CONTEXT_SINGLE))?;

    let rows = dataset.map(Dataset::to_row_objects).unwrap_or_default();

    Ok(DataGrid { columns, rows })
}

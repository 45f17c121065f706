//! Row-count views.
//!
//! Scalar `name → count` mappings are turned into small datasets and shown
//! through the single-dataset view, keyed by `name`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Result;
use crate::format::format_smart_decimal;
use crate::model::{Column, ColumnType, Dataset};
use crate::options::GridOptions;
use crate::{log_op_end, log_op_error, log_op_start};

use super::{elapsed_ms, single::to_data_grid, DataGrid};

pub const NAME_COLUMN: &str = "name";
pub const ROW_COUNT_COLUMN: &str = "row_count";
pub const BASE_COLUMN: &str = "base";
pub const CURRENT_COLUMN: &str = "current";
pub const DELTA_COLUMN: &str = "delta";

/// Base and current row counts for one name. `None` means the name does
/// not exist on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowCountPair {
    pub base: Option<u64>,
    pub current: Option<u64>,
}

impl RowCountPair {
    pub fn new(base: Option<u64>, current: Option<u64>) -> Self {
        Self { base, current }
    }
}

fn count_value(count: Option<u64>) -> Value {
    count.map(Value::from).unwrap_or(Value::Null)
}

/// Two-column dataset (`name`, `row_count`), one row per entry, in input order.
pub fn row_count_dataset<I, K>(counts: I) -> Dataset
where
    I: IntoIterator<Item = (K, Option<u64>)>,
    K: Into<String>,
{
    Dataset::new(
        vec![
            Column::new(NAME_COLUMN, ColumnType::Text),
            Column::new(ROW_COUNT_COLUMN, ColumnType::Integer),
        ],
        counts
            .into_iter()
            .map(|(name, count)| vec![Value::String(name.into()), count_value(count)])
            .collect(),
    )
}

/// Four-column dataset (`name`, `base`, `current`, `delta`), one row per
/// entry, in input order. See [`row_count_delta`].
pub fn row_count_diff_dataset<I, K>(counts: I) -> Dataset
where
    I: IntoIterator<Item = (K, RowCountPair)>,
    K: Into<String>,
{
    Dataset::new(
        vec![
            Column::new(NAME_COLUMN, ColumnType::Text),
            Column::new(BASE_COLUMN, ColumnType::Integer),
            Column::new(CURRENT_COLUMN, ColumnType::Integer),
            Column::new(DELTA_COLUMN, ColumnType::Text),
        ],
        counts
            .into_iter()
            .map(|(name, pair)| {
                vec![
                    Value::String(name.into()),
                    count_value(pair.base),
                    count_value(pair.current),
                    Value::String(row_count_delta(pair.base, pair.current)),
                ]
            })
            .collect(),
    )
}

/// Change between two counts.
///
/// `"0"` when equal, a signed percentage (`"+12.5%"`, `"-50%"`) otherwise,
/// `"+∞%"` from a zero base, `"Added"`/`"Removed"` when one side is absent
/// and `"N/A"` when both are.
pub fn row_count_delta(base: Option<u64>, current: Option<u64>) -> String {
    match (base, current) {
        (None, None) => "N/A".to_string(),
        (None, Some(_)) => "Added".to_string(),
        (Some(_), None) => "Removed".to_string(),
        (Some(base), Some(current)) if base == current => "0".to_string(),
        (Some(0), Some(_)) => "+∞%".to_string(),
        (Some(base), Some(current)) => {
            let change = (current as f64 - base as f64) / base as f64 * 100.0;
            let sign = if change > 0.0 { "+" } else { "" };
            format!("{}{}%", sign, format_smart_decimal(change, 2))
        }
    }
}

fn keyed_by_name(options: &GridOptions) -> GridOptions {
    let mut options = options.clone();
    if options.primary_keys.is_empty() {
        options.primary_keys = vec![NAME_COLUMN.to_string()];
    }
    options
}

/// Single row-count view.
///
/// # Errors
///
/// Any validation failure of the options (e.g. a primary key other than
/// the dataset's columns).
pub fn row_count_grid<I, K>(counts: I, options: &GridOptions) -> Result<DataGrid>
where
    I: IntoIterator<Item = (K, Option<u64>)>,
    K: Into<String>,
{
    log_op_start!("row_count_grid");
    let start = std::time::Instant::now();

    let dataset = row_count_dataset(counts);
    let grid = to_data_grid(Some(&dataset), &keyed_by_name(options)).map_err(|e| {
        log_op_error!("row_count_grid", e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!(
        "row_count_grid",
        duration_ms = elapsed_ms(start),
        row_count = grid.rows.len()
    );
    Ok(grid)
}

/// Row-count diff view with a per-name delta column.
///
/// # Errors
///
/// Any validation failure of the options.
pub fn row_count_diff_grid<I, K>(counts: I, options: &GridOptions) -> Result<DataGrid>
where
    I: IntoIterator<Item = (K, RowCountPair)>,
    K: Into<String>,
{
    log_op_start!("row_count_diff_grid");
    let start = std::time::Instant::now();

    let dataset = row_count_diff_dataset(counts);
    let grid = to_data_grid(Some(&dataset), &keyed_by_name(options)).map_err(|e| {
        log_op_error!(
            "row_count_diff_grid",
            e.clone(),
            duration_ms = elapsed_ms(start)
        );
        e
    })?;

    log_op_end!(
        "row_count_diff_grid",
        duration_ms = elapsed_ms(start),
        row_count = grid.rows.len()
    );
    Ok(grid)
}

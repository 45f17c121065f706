//! Grid generators.
//!
//! Each generator validates its input, builds a schema, reconciles rows
//! where applicable and plans display columns. They hold no logic of their
//! own beyond wiring the other modules together.
//!
//! ## Logging Ownership
//!
//! Generators own lifecycle logging:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Lower layers (schema, reconcile, display) use only `tracing::debug!()`.

pub mod diff;
pub mod membership;
pub mod row_count;
pub mod single;

pub use diff::to_diff_grid;
pub use membership::to_membership_diff_grid;
pub use row_count::{
    row_count_dataset, row_count_delta, row_count_diff_dataset, row_count_diff_grid,
    row_count_grid, RowCountPair,
};
pub use single::to_data_grid;

use serde::Serialize;

use crate::display::ColumnConfig;
use crate::model::{RowObject, RowStats};
use crate::options::DisplayMode;

/// Output of the single-dataset views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataGrid {
    pub columns: Vec<ColumnConfig>,
    pub rows: Vec<RowObject>,
}

/// Output of the diff views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffGrid {
    pub columns: Vec<ColumnConfig>,
    pub rows: Vec<RowObject>,
    pub row_stats: RowStats,
    /// Two base rows shared an identity; the later one won
    pub invalid_pkey_base: bool,
    /// Two current rows shared an identity; the later one won
    pub invalid_pkey_current: bool,
    pub display_mode: DisplayMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_title: Option<String>,
}

fn elapsed_ms(start: std::time::Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

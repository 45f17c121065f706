//! gridrecon core - tabular diff-reconciliation engine
//!
//! Given two related tabular datasets (or one dataset carrying per-row
//! `in_a`/`in_b` membership flags) this crate produces a unified row set
//! annotated with change status, a column schema annotated with per-column
//! change status, and a display plan for an external grid renderer.
//!
//! - Schema mapping for single, membership-flagged and merged datasets
//! - Deterministic row identity (composite primary keys or ordinals)
//! - Row reconciliation with column-level `modified` derivation
//! - Display-column planning and lazy value formatting
//! - Fail-fast input validation with structured errors
//! - Grid generators composing all of the above
//!
//! Everything is synchronous and pure; no state outlives a call.

pub mod display;
pub mod errors;
pub mod format;
pub mod grid;
pub mod identity;
pub mod logging_facility;
pub mod model;
pub mod options;
pub mod reconcile;
pub mod rules;
pub mod schema;

// Re-export commonly used types
pub use display::ColumnConfig;
pub use errors::{ReconError, Result, ValidationError, ValidationErrorKind};
pub use format::{render_value, RenderMode, RenderedValue};
pub use grid::{
    row_count_diff_grid, row_count_grid, to_data_grid, to_diff_grid, to_membership_diff_grid,
    DataGrid, DiffGrid, RowCountPair,
};
pub use model::{ChangeStatus, Column, ColumnType, Dataset, RowObject, RowStats};
pub use options::{CasePolicy, DisplayMode, GridOptions};
pub use schema::{ColumnMapEntry, ColumnSchema};

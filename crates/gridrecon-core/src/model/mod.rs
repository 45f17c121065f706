//! Tabular data model exchanged at the engine boundary.

pub mod column;
pub mod dataset;
pub mod row;
pub mod value;

pub use column::{Column, ColumnType};
pub use dataset::Dataset;
pub use row::{ChangeStatus, RowObject, RowStats};

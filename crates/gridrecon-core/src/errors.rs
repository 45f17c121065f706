use serde_json::{json, Value};
use thiserror::Error;

/// Result type alias using the canonical [`ValidationError`]
pub type Result<T> = std::result::Result<T, ValidationError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure surfaced by a public entry point is classified into one of
/// these kinds. Each kind maps to a stable code usable by callers, tests and
/// any layer that turns errors into user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    // Dataset shape
    /// Dataset is not an object, or `columns`/`data` are missing or not arrays
    InvalidDataset,
    /// A column definition violates the column schema (key/name/type)
    InvalidColumn,
    /// A row's length differs from the number of columns
    RowLengthMismatch,

    // Primary keys
    /// A requested primary key is not among the dataset's column keys
    UnknownPrimaryKey,
    /// The requested primary key list contains the same key twice
    DuplicatePrimaryKey,
    /// The operation requires at least one primary key
    PrimaryKeyRequired,

    // Columns
    /// A membership flag column (`in_a` / `in_b`) is absent
    MissingRequiredColumn,
    /// A column referenced by key or name is absent from the schema
    MissingColumn,

    // Configuration
    /// Grid options are inconsistent
    InvalidOptions,

    // Integration
    Serialization,
}

impl ValidationErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ValidationErrorKind::InvalidDataset => "ERR_INVALID_DATASET",
            ValidationErrorKind::InvalidColumn => "ERR_INVALID_COLUMN",
            ValidationErrorKind::RowLengthMismatch => "ERR_ROW_LENGTH_MISMATCH",
            ValidationErrorKind::UnknownPrimaryKey => "ERR_UNKNOWN_PRIMARY_KEY",
            ValidationErrorKind::DuplicatePrimaryKey => "ERR_DUPLICATE_PRIMARY_KEY",
            ValidationErrorKind::PrimaryKeyRequired => "ERR_PRIMARY_KEY_REQUIRED",
            ValidationErrorKind::MissingRequiredColumn => "ERR_MISSING_REQUIRED_COLUMN",
            ValidationErrorKind::MissingColumn => "ERR_MISSING_COLUMN",
            ValidationErrorKind::InvalidOptions => "ERR_INVALID_OPTIONS",
            ValidationErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification (`kind`), an optional `context` naming the entry
/// point or dataset side that failed, a human message and machine-readable
/// `details` (offending indices, expected vs. actual counts, available
/// column lists).
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    kind: ValidationErrorKind,
    context: Option<String>,
    message: String,
    details: Option<Value>,
}

impl ValidationError {
    /// Create a new error with the specified kind
    pub fn new(kind: ValidationErrorKind) -> Self {
        Self {
            kind,
            context: None,
            message: String::new(),
            details: None,
        }
    }

    /// Add context (prefixed to the message as `[context]`)
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add machine-readable details
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ValidationErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the context, if any
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Get the error message (without the context prefix)
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured details, if any
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(context) = &self.context {
            write!(f, "[{}] ", context)?;
        }
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

// ========== End Error Facility ==========

/// Typed failures raised while validating and reconciling datasets
///
/// Internal code raises these; public entry points convert them into a
/// [`ValidationError`] (usually with a context attached).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReconError {
    // ===== Dataset shape =====
    /// Dataset is not a JSON object
    #[error("Dataset must be an object, got {found}")]
    InvalidDataset { found: String },

    /// Dataset has no `columns` array
    #[error("Dataset must have a `columns` array")]
    MissingColumns,

    /// Dataset has no `data` array
    #[error("Dataset must have a `data` array")]
    MissingData,

    /// A row inside `data` is not an array
    #[error("Row {row_index} must be an array")]
    RowNotArray { row_index: usize },

    // ===== Column schema =====
    /// Column definition violates the column schema
    #[error("Column {index}: `{field}` {reason}")]
    InvalidColumn {
        index: usize,
        field: String,
        reason: String,
    },

    /// Row length differs from the column count
    #[error("Row {row_index} has {actual} values but {expected} columns are defined")]
    RowLengthMismatch {
        row_index: usize,
        actual: usize,
        expected: usize,
        column_keys: Vec<String>,
    },

    // ===== Primary keys =====
    /// Requested primary key is not a column key
    #[error("Primary key `{key}` is not a column")]
    UnknownPrimaryKey { key: String, available: Vec<String> },

    /// Requested primary key list contains duplicates
    #[error("Primary key `{key}` is listed more than once")]
    DuplicatePrimaryKey { key: String },

    /// Operation needs a primary key but none was configured
    #[error("At least one primary key is required")]
    PrimaryKeyRequired,

    // ===== Columns =====
    /// Membership flag column is absent
    #[error("Required column `{column}` is missing")]
    MissingRequiredColumn {
        column: String,
        available: Vec<String>,
    },

    /// Referenced column is absent
    #[error("Column `{column}` not found")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    // ===== Options =====
    /// Grid options are inconsistent
    #[error("Invalid options: {reason}")]
    InvalidOptions { reason: String },

    // ===== Serialization =====
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl ReconError {
    /// Attach a context and convert into the canonical error
    pub fn in_context(self, context: impl Into<String>) -> ValidationError {
        ValidationError::from(self).with_context(context)
    }
}

/// Conversion from ReconError to the canonical ValidationError
impl From<ReconError> for ValidationError {
    fn from(err: ReconError) -> Self {
        let message = err.to_string();
        match err {
            ReconError::InvalidDataset { found } => {
                ValidationError::new(ValidationErrorKind::InvalidDataset)
                    .with_message(message)
                    .with_details(json!({ "found": found }))
            }

            ReconError::MissingColumns => ValidationError::new(ValidationErrorKind::InvalidDataset)
                .with_message(message)
                .with_details(json!({ "field": "columns" })),

            ReconError::MissingData => ValidationError::new(ValidationErrorKind::InvalidDataset)
                .with_message(message)
                .with_details(json!({ "field": "data" })),

            ReconError::RowNotArray { row_index } => {
                ValidationError::new(ValidationErrorKind::InvalidDataset)
                    .with_message(message)
                    .with_details(json!({ "row_index": row_index }))
            }

            ReconError::InvalidColumn { index, field, .. } => {
                ValidationError::new(ValidationErrorKind::InvalidColumn)
                    .with_message(message)
                    .with_details(json!({ "column_index": index, "field": field }))
            }

            ReconError::RowLengthMismatch {
                row_index,
                actual,
                expected,
                column_keys,
            } => ValidationError::new(ValidationErrorKind::RowLengthMismatch)
                .with_message(message)
                .with_details(json!({
                    "row_index": row_index,
                    "actual": actual,
                    "expected": expected,
                    "column_keys": column_keys,
                })),

            ReconError::UnknownPrimaryKey { key, available } => {
                ValidationError::new(ValidationErrorKind::UnknownPrimaryKey)
                    .with_message(message)
                    .with_details(json!({ "key": key, "available": available }))
            }

            ReconError::DuplicatePrimaryKey { key } => {
                ValidationError::new(ValidationErrorKind::DuplicatePrimaryKey)
                    .with_message(message)
                    .with_details(json!({ "key": key }))
            }

            ReconError::PrimaryKeyRequired => {
                ValidationError::new(ValidationErrorKind::PrimaryKeyRequired).with_message(message)
            }

            ReconError::MissingRequiredColumn { column, available } => {
                ValidationError::new(ValidationErrorKind::MissingRequiredColumn)
                    .with_message(message)
                    .with_details(json!({ "column": column, "available": available }))
            }

            ReconError::MissingColumn { column, available } => {
                ValidationError::new(ValidationErrorKind::MissingColumn)
                    .with_message(message)
                    .with_details(json!({ "column": column, "available": available }))
            }

            ReconError::InvalidOptions { .. } => {
                ValidationError::new(ValidationErrorKind::InvalidOptions).with_message(message)
            }

            ReconError::Serialization { .. } => {
                ValidationError::new(ValidationErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error
impl From<serde_json::Error> for ReconError {
    fn from(err: serde_json::Error) -> Self {
        ReconError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        ReconError::from(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes_are_unique() {
        let kinds = [
            ValidationErrorKind::InvalidDataset,
            ValidationErrorKind::InvalidColumn,
            ValidationErrorKind::RowLengthMismatch,
            ValidationErrorKind::UnknownPrimaryKey,
            ValidationErrorKind::DuplicatePrimaryKey,
            ValidationErrorKind::PrimaryKeyRequired,
            ValidationErrorKind::MissingRequiredColumn,
            ValidationErrorKind::MissingColumn,
            ValidationErrorKind::InvalidOptions,
            ValidationErrorKind::Serialization,
        ];
        let codes: std::collections::BTreeSet<&str> = kinds.iter().map(|k| k.code()).collect();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_display_prefixes_context() {
        let err = ValidationError::new(ValidationErrorKind::MissingColumn)
            .with_context("base")
            .with_message("Column `id` not found");
        assert_eq!(err.to_string(), "[base] Column `id` not found");
    }

    #[test]
    fn test_display_without_context() {
        let err = ValidationError::new(ValidationErrorKind::PrimaryKeyRequired)
            .with_message("At least one primary key is required");
        assert_eq!(err.to_string(), "At least one primary key is required");
    }

    #[test]
    fn test_details_none_by_default() {
        let err = ValidationError::new(ValidationErrorKind::InvalidOptions);
        assert!(err.details().is_none());
        assert!(err.context().is_none());
    }
}

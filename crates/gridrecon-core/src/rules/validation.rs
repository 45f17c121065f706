use serde_json::{Map, Value};

use crate::errors::{ReconError, Result, ValidationError};
use crate::model::{Column, ColumnType, Dataset};
use crate::options::{CasePolicy, GridOptions};
use crate::schema::{IN_A, IN_B};

use super::invariants;

/// Context for single-dataset view inputs
pub const CONTEXT_SINGLE: &str = "single_dataset";
/// Context for the base side of a two-dataset diff
pub const CONTEXT_BASE: &str = "base";
/// Context for the current side of a two-dataset diff
pub const CONTEXT_CURRENT: &str = "current";
/// Context for two-dataset checks spanning both sides
pub const CONTEXT_DIFF: &str = "diff";
/// Context for membership-flagged inputs
pub const CONTEXT_MEMBERSHIP: &str = "membership";
/// Context for grid option checks
pub const CONTEXT_OPTIONS: &str = "options";

fn contextualize(err: ReconError, context: Option<&str>) -> ValidationError {
    match context {
        Some(context) => err.in_context(context),
        None => err.into(),
    }
}

/// Parse an untyped dataset value
///
/// `null` is "no dataset" and yields `Ok(None)`. Otherwise the value must be
/// an object with a `columns` array of `{key, name, type}` objects and a
/// `data` array of row arrays. The parsed dataset is then checked with
/// [`validate_dataset`].
///
/// # Errors
/// - `InvalidDataset` for a non-object value, missing or non-array
///   `columns`/`data`, or a row that is not an array
/// - `InvalidColumn` for a malformed column definition
/// - `RowLengthMismatch` for a row whose length differs from the column count
pub fn parse_dataset(value: &Value, context: Option<&str>) -> Result<Option<Dataset>> {
    let object = match value {
        Value::Null => return Ok(None),
        Value::Object(object) => object,
        other => {
            return Err(contextualize(
                ReconError::InvalidDataset {
                    found: json_type_name(other).to_string(),
                },
                context,
            ))
        }
    };

    let columns = parse_columns(object).map_err(|e| contextualize(e, context))?;
    let data = parse_rows(object).map_err(|e| contextualize(e, context))?;

    let dataset = Dataset::new(columns, data);
    validate_dataset(Some(&dataset), context)?;
    Ok(Some(dataset))
}

fn parse_columns(object: &Map<String, Value>) -> std::result::Result<Vec<Column>, ReconError> {
    let Some(Value::Array(raw_columns)) = object.get("columns") else {
        return Err(ReconError::MissingColumns);
    };

    let mut columns = Vec::with_capacity(raw_columns.len());
    for (index, raw) in raw_columns.iter().enumerate() {
        let Value::Object(raw) = raw else {
            return Err(ReconError::InvalidColumn {
                index,
                field: "column".to_string(),
                reason: format!("must be an object, got {}", json_type_name(raw)),
            });
        };
        let key = string_field(raw, index, "key")?;
        if key.is_empty() {
            return Err(empty_key(index));
        }
        let name = string_field(raw, index, "name")?;
        let column_type = string_field(raw, index, "type")?;
        columns.push(Column {
            name: name.to_string(),
            key: key.to_string(),
            column_type: ColumnType::parse(column_type),
        });
    }
    Ok(columns)
}

fn parse_rows(object: &Map<String, Value>) -> std::result::Result<Vec<Vec<Value>>, ReconError> {
    let Some(Value::Array(raw_rows)) = object.get("data") else {
        return Err(ReconError::MissingData);
    };

    raw_rows
        .iter()
        .enumerate()
        .map(|(row_index, row)| match row {
            Value::Array(values) => Ok(values.clone()),
            _ => Err(ReconError::RowNotArray { row_index }),
        })
        .collect()
}

fn string_field<'a>(
    raw: &'a Map<String, Value>,
    index: usize,
    field: &str,
) -> std::result::Result<&'a str, ReconError> {
    match raw.get(field) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(ReconError::InvalidColumn {
            index,
            field: field.to_string(),
            reason: format!("must be a string, got {}", json_type_name(other)),
        }),
        None => Err(ReconError::InvalidColumn {
            index,
            field: field.to_string(),
            reason: "is required".to_string(),
        }),
    }
}

fn empty_key(index: usize) -> ReconError {
    ReconError::InvalidColumn {
        index,
        field: "key".to_string(),
        reason: "must not be empty".to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Validate a typed dataset
///
/// `None` is "no dataset" and always valid. Column keys must be non-empty
/// and unique; when `data` is non-empty every row's length must equal the
/// column count.
///
/// # Errors
/// - `InvalidColumn` for an empty or repeated column key
/// - `RowLengthMismatch` naming the first misaligned row, its actual and
///   expected lengths and the full column key list
pub fn validate_dataset(dataset: Option<&Dataset>, context: Option<&str>) -> Result<()> {
    let Some(dataset) = dataset else {
        return Ok(());
    };

    if let Some(&index) = invariants::find_empty_column_keys(&dataset.columns).first() {
        return Err(contextualize(empty_key(index), context));
    }

    if let Some(&(index, first)) = invariants::find_duplicate_column_keys(&dataset.columns).first()
    {
        return Err(contextualize(
            ReconError::InvalidColumn {
                index,
                field: "key".to_string(),
                reason: format!("`{}` duplicates column {}", dataset.columns[index].key, first),
            },
            context,
        ));
    }

    if let Some(&(row_index, actual)) = invariants::find_row_length_mismatches(dataset).first() {
        return Err(contextualize(
            ReconError::RowLengthMismatch {
                row_index,
                actual,
                expected: dataset.columns.len(),
                column_keys: dataset.column_keys(),
            },
            context,
        ));
    }

    Ok(())
}

/// Validate a requested primary key list against column keys
///
/// # Errors
/// - `DuplicatePrimaryKey` when the list repeats a key (under `policy`)
/// - `UnknownPrimaryKey` for the first key matching no column
pub fn validate_primary_keys<S: AsRef<str>>(
    column_keys: &[S],
    primary_keys: &[String],
    policy: CasePolicy,
) -> std::result::Result<(), ReconError> {
    if let Some(key) = invariants::find_duplicate_keys(primary_keys, policy).into_iter().next() {
        return Err(ReconError::DuplicatePrimaryKey { key });
    }

    if let Some(key) = invariants::find_unknown_keys(primary_keys, column_keys, policy)
        .into_iter()
        .next()
    {
        return Err(ReconError::UnknownPrimaryKey {
            key,
            available: column_keys.iter().map(|k| k.as_ref().to_string()).collect(),
        });
    }

    Ok(())
}

/// Validate the inputs of the single-dataset view
///
/// # Errors
/// Option, dataset-shape or primary-key failures, contextualized with
/// `options` or `single_dataset`.
pub fn validate_single_input(dataset: Option<&Dataset>, options: &GridOptions) -> Result<()> {
    options
        .validate()
        .map_err(|e| e.in_context(CONTEXT_OPTIONS))?;
    validate_dataset(dataset, Some(CONTEXT_SINGLE))?;

    if let Some(dataset) = dataset {
        validate_primary_keys(
            &dataset.column_keys(),
            &options.primary_keys,
            options.case_policy,
        )
        .map_err(|e| e.in_context(CONTEXT_SINGLE))?;
    }
    Ok(())
}

/// Validate the inputs of the two-dataset diff view
///
/// Each primary key must exist in at least one side; the check is skipped
/// when both sides are absent.
///
/// # Errors
/// Option and per-side dataset-shape failures (contexts `options`, `base`,
/// `current`), then primary-key failures (context `diff`).
pub fn validate_diff_input(
    base: Option<&Dataset>,
    current: Option<&Dataset>,
    options: &GridOptions,
) -> Result<()> {
    options
        .validate()
        .map_err(|e| e.in_context(CONTEXT_OPTIONS))?;
    validate_dataset(base, Some(CONTEXT_BASE))?;
    validate_dataset(current, Some(CONTEXT_CURRENT))?;

    if base.is_none() && current.is_none() {
        return Ok(());
    }

    let mut union: Vec<String> = Vec::new();
    for key in base
        .into_iter()
        .chain(current)
        .flat_map(|d| d.columns.iter().map(|c| &c.key))
    {
        if !union.contains(key) {
            union.push(key.clone());
        }
    }

    validate_primary_keys(&union, &options.primary_keys, options.case_policy)
        .map_err(|e| e.in_context(CONTEXT_DIFF))
}

/// Validate the inputs of the membership-flagged diff view
///
/// A primary key is mandatory and must exist in the dataset, as must the
/// `in_a`/`in_b` flag columns. An absent dataset only needs a primary key.
///
/// # Errors
/// - `PrimaryKeyRequired` when no primary key is configured
/// - dataset-shape and primary-key failures
/// - `MissingRequiredColumn` naming the first absent flag column
pub fn validate_membership_input(dataset: Option<&Dataset>, options: &GridOptions) -> Result<()> {
    options
        .validate()
        .map_err(|e| e.in_context(CONTEXT_OPTIONS))?;

    if options.primary_keys.is_empty() {
        return Err(ReconError::PrimaryKeyRequired.in_context(CONTEXT_MEMBERSHIP));
    }

    validate_dataset(dataset, Some(CONTEXT_MEMBERSHIP))?;
    let Some(dataset) = dataset else {
        return Ok(());
    };

    let keys = dataset.column_keys();
    validate_primary_keys(&keys, &options.primary_keys, options.case_policy)
        .map_err(|e| e.in_context(CONTEXT_MEMBERSHIP))?;

    for required in [IN_A, IN_B] {
        if !keys.iter().any(|k| k == required) {
            return Err(ReconError::MissingRequiredColumn {
                column: required.to_string(),
                available: keys,
            }
            .in_context(CONTEXT_MEMBERSHIP));
        }
    }

    Ok(())
}

//! Display-column planning.
//!
//! Turns a (reconciled) column schema into the flat, ordered column list the
//! rendering layer consumes: primary keys first, then pinned columns, then
//! everything else in natural order.

use serde::Serialize;

use crate::errors::ReconError;
use crate::format::RenderMode;
use crate::model::{ChangeStatus, ColumnType};
use crate::options::GridOptions;
use crate::schema::{ColumnMapEntry, ColumnSchema};

/// One column of a display plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnConfig {
    pub key: String,
    pub name: String,
    pub column_type: ColumnType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_status: Option<ChangeStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_render_mode: Option<RenderMode>,
    pub frozen: bool,
    pub is_primary_key: bool,
}

/// Ordered, de-duplicated column list: primary keys, then pinned columns,
/// then the remaining columns of `all` in order. Excluded columns are
/// dropped everywhere. Matching is exact.
pub fn order_columns(
    primary_keys: &[String],
    pinned_columns: &[String],
    all_columns: &[String],
    exclude_columns: &[String],
) -> Vec<String> {
    let mut ordered: Vec<String> = Vec::new();
    for column in primary_keys.iter().chain(pinned_columns).chain(all_columns) {
        if exclude_columns.contains(column) || ordered.contains(column) {
            continue;
        }
        ordered.push(column.clone());
    }
    ordered
}

/// Whether a non-frozen column is shown.
///
/// Only `changed_only` views with at least one modified row filter; then
/// only columns with a change status pass.
pub fn should_include_column(
    status: Option<ChangeStatus>,
    changed_only: bool,
    has_modified_rows: bool,
) -> bool {
    !(changed_only && has_modified_rows) || status.is_some()
}

/// Inputs to the display planners.
#[derive(Debug, Clone, Copy)]
pub struct DisplayRequest<'a> {
    pub schema: &'a ColumnSchema,
    pub options: &'a GridOptions,
    /// At least one reconciled row is `Modified`
    pub has_modified_rows: bool,
    /// A requested primary-key or pinned column absent from the schema is
    /// an error rather than skipped
    pub strict: bool,
}

/// Plan the columns of a diff view, carrying column change status and
/// applying the `changed_only` column filter.
///
/// # Errors
///
/// `MissingColumn` in strict mode when a primary-key or pinned column is not
/// in the schema.
pub fn display_columns(request: &DisplayRequest<'_>) -> Result<Vec<ColumnConfig>, ReconError> {
    plan(request, true)
}

/// Plan the columns of a single-dataset view. No status and no filtering.
///
/// # Errors
///
/// `MissingColumn` in strict mode when a primary-key or pinned column is not
/// in the schema.
pub fn simple_display_columns(
    request: &DisplayRequest<'_>,
) -> Result<Vec<ColumnConfig>, ReconError> {
    plan(request, false)
}

fn plan(request: &DisplayRequest<'_>, with_status: bool) -> Result<Vec<ColumnConfig>, ReconError> {
    let DisplayRequest {
        schema,
        options,
        has_modified_rows,
        strict,
    } = *request;
    let policy = options.case_policy;

    let mut emitted: Vec<&str> = Vec::new();
    let mut columns = Vec::with_capacity(schema.len());

    let frozen = options
        .primary_keys
        .iter()
        .map(|key| (key, true))
        .chain(options.pinned_columns.iter().map(|key| (key, false)));

    for (requested, is_primary_key) in frozen {
        let Some(entry) = schema.find(requested, policy) else {
            if strict {
                return Err(ReconError::MissingColumn {
                    column: requested.clone(),
                    available: schema.keys(),
                });
            }
            tracing::debug!(column = %requested, "skipping frozen column absent from schema");
            continue;
        };
        if emitted.contains(&entry.key.as_str()) || policy.contains(&options.exclude_columns, &entry.key)
        {
            continue;
        }
        emitted.push(&entry.key);
        columns.push(config(entry, options, with_status, true, is_primary_key));
    }

    for entry in schema.entries() {
        if emitted.contains(&entry.key.as_str()) || policy.contains(&options.exclude_columns, &entry.key)
        {
            continue;
        }
        if with_status && !should_include_column(entry.status, options.changed_only, has_modified_rows)
        {
            continue;
        }
        columns.push(config(entry, options, with_status, false, false));
    }

    Ok(columns)
}

fn config(
    entry: &ColumnMapEntry,
    options: &GridOptions,
    with_status: bool,
    frozen: bool,
    is_primary_key: bool,
) -> ColumnConfig {
    ColumnConfig {
        key: entry.key.clone(),
        name: entry.name.clone(),
        column_type: entry.column_type,
        column_status: if with_status { entry.status } else { None },
        column_render_mode: options.render_mode_for(&entry.key),
        frozen,
        is_primary_key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Column, Dataset};
    use crate::options::CasePolicy;
    use crate::schema::build_column_map;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn schema(keys: &[&str]) -> ColumnSchema {
        build_column_map(Some(&Dataset::new(
            keys.iter().map(|k| Column::new(*k, ColumnType::Text)).collect(),
            vec![],
        )))
    }

    #[test]
    fn test_order_columns() {
        let ordered = order_columns(
            &strings(&["id"]),
            &strings(&["name", "id"]),
            &strings(&["a", "id", "name", "b", "secret"]),
            &strings(&["secret"]),
        );
        assert_eq!(ordered, strings(&["id", "name", "a", "b"]));
    }

    #[test]
    fn test_should_include_column() {
        assert!(should_include_column(None, false, true));
        assert!(should_include_column(None, true, false));
        assert!(!should_include_column(None, true, true));
        assert!(should_include_column(Some(ChangeStatus::Added), true, true));
    }

    #[test]
    fn test_frozen_columns_first() {
        let schema = schema(&["a", "id", "name"]);
        let options = GridOptions::default()
            .with_primary_keys(["id"])
            .with_pinned_columns(["name", "id"]);
        let columns = display_columns(&DisplayRequest {
            schema: &schema,
            options: &options,
            has_modified_rows: false,
            strict: true,
        })
        .unwrap();

        let keys: Vec<_> = columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["id", "name", "a"]);
        assert!(columns[0].frozen && columns[0].is_primary_key);
        assert!(columns[1].frozen && !columns[1].is_primary_key);
        assert!(!columns[2].frozen);
    }

    #[test]
    fn test_missing_frozen_column_strict_vs_lenient() {
        let schema = schema(&["a"]);
        let options = GridOptions::default().with_pinned_columns(["zz"]);
        let mut request = DisplayRequest {
            schema: &schema,
            options: &options,
            has_modified_rows: false,
            strict: true,
        };
        assert!(matches!(
            display_columns(&request),
            Err(ReconError::MissingColumn { column, .. }) if column == "zz"
        ));

        request.strict = false;
        assert_eq!(display_columns(&request).unwrap().len(), 1);
    }

    #[test]
    fn test_exclusion_honors_case_policy() {
        let schema = schema(&["Id", "Secret"]);
        let options = GridOptions::default()
            .with_primary_keys(["id"])
            .with_exclude_columns(["secret"])
            .with_case_policy(CasePolicy::Insensitive);
        let columns = simple_display_columns(&DisplayRequest {
            schema: &schema,
            options: &options,
            has_modified_rows: false,
            strict: true,
        })
        .unwrap();
        let keys: Vec<_> = columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["Id"]);
    }
}

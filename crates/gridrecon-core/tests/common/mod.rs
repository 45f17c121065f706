use gridrecon_core::{Column, ColumnType, Dataset};
use serde_json::Value;

/// Build a dataset from `(key, type)` pairs and positional rows
#[allow(dead_code)]
pub fn dataset(columns: &[(&str, ColumnType)], rows: Vec<Vec<Value>>) -> Dataset {
    Dataset::new(
        columns
            .iter()
            .map(|(key, ty)| Column::new(*key, *ty))
            .collect(),
        rows,
    )
}

/// Dataset of `id` (integer) and `name` (text) columns
#[allow(dead_code)]
pub fn id_name_dataset(rows: &[(i64, &str)]) -> Dataset {
    dataset(
        &[("id", ColumnType::Integer), ("name", ColumnType::Text)],
        rows.iter()
            .map(|(id, name)| vec![Value::from(*id), Value::from(*name)])
            .collect(),
    )
}

/// Column keys as owned strings
#[allow(dead_code)]
pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::column::Column;
use super::row::RowObject;
use crate::errors::Result;
use crate::rules::validation;

/// Positional columnar table: `data[i][j]` is the value of `columns[j]` in row `i`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub columns: Vec<Column>,
    pub data: Vec<Vec<Value>>,
}

impl Dataset {
    pub fn new(columns: Vec<Column>, data: Vec<Vec<Value>>) -> Self {
        Self { columns, data }
    }

    /// Parse an untyped dataset, enforcing the dataset shape contract.
    ///
    /// `null` means "no dataset" and yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// - `InvalidDataset`: not an object, or `columns`/`data` missing or not arrays
    /// - `InvalidColumn`: a column without a non-empty string `key`, or with a
    ///   non-string `name`/`type`
    /// - `RowLengthMismatch`: a row whose length differs from the column count
    pub fn from_json(value: &Value, context: Option<&str>) -> Result<Option<Self>> {
        validation::parse_dataset(value, context)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn column_keys(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.key.clone()).collect()
    }

    pub fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Convert positional rows into keyed rows with 1-based `index`.
    ///
    /// Values beyond the column count are ignored and missing trailing values
    /// are left absent; validated datasets have neither.
    pub fn to_row_objects(&self) -> Vec<RowObject> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, values)| {
                let mut row = RowObject::new((i + 1) as f64);
                for (column, value) in self.columns.iter().zip(values) {
                    row.insert(column.key.clone(), value.clone());
                }
                row
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColumnType;
    use serde_json::json;

    fn sample() -> Dataset {
        Dataset::new(
            vec![
                Column::new("id", ColumnType::Integer),
                Column::new("name", ColumnType::Text),
            ],
            vec![vec![json!(1), json!("a")], vec![json!(2), Value::Null]],
        )
    }

    #[test]
    fn test_row_objects_have_one_based_index() {
        let rows = sample().to_row_objects();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].index, 1.0);
        assert_eq!(rows[1].index, 2.0);
        assert_eq!(rows[1].get("name"), Some(&Value::Null));
        assert!(rows.iter().all(|r| r.status.is_none()));
    }

    #[test]
    fn test_column_lookup() {
        let ds = sample();
        assert_eq!(ds.column_keys(), vec!["id", "name"]);
        assert!(ds.column("name").is_some());
        assert!(ds.column("missing").is_none());
    }

    #[test]
    fn test_serde_shape_uses_type_field() {
        let v = serde_json::to_value(sample()).unwrap();
        assert_eq!(v["columns"][0]["type"], json!("integer"));
        assert_eq!(v["data"][0], json!([1, "a"]));
    }
}

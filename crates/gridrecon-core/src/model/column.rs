use serde::{Deserialize, Serialize};

/// Logical type of a column as reported by the data source.
///
/// Unrecognised type strings deserialize to [`ColumnType::Unknown`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Number,
    Integer,
    Boolean,
    Date,
    Datetime,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ColumnType {
    /// Parse a type name; anything unrecognised is `Unknown`.
    pub fn parse(s: &str) -> Self {
        match s {
            "text" => ColumnType::Text,
            "number" => ColumnType::Number,
            "integer" => ColumnType::Integer,
            "boolean" => ColumnType::Boolean,
            "date" => ColumnType::Date,
            "datetime" => ColumnType::Datetime,
            _ => ColumnType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Number => "number",
            ColumnType::Integer => "integer",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
            ColumnType::Datetime => "datetime",
            ColumnType::Unknown => "unknown",
        }
    }
}

/// A column of a dataset. `key` is unique and non-empty within its dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub key: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl Column {
    pub fn new(key: impl Into<String>, column_type: ColumnType) -> Self {
        let key = key.into();
        Self {
            name: key.clone(),
            key,
            column_type,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

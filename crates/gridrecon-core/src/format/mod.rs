//! Cell value rendering.
//!
//! Formatting is applied lazily by the consumer, one cell at a time; the
//! grid generators only carry the configured [`RenderMode`] per column.

pub mod number;

pub use number::{format_smart_decimal, format_smart_decimal_with_locale, Locale};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::value::{as_number, plain_string};
use crate::model::{ColumnType, RowObject};

/// Display marker for a null or missing value
pub const NULL_MARKER: &str = "-";
/// Display marker for an empty string
pub const EMPTY_MARKER: &str = "(empty)";

/// How a column's numeric values are rendered.
///
/// Serialized as `"raw"`, `"percent"` or a non-negative integer giving the
/// number of decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RenderModeRepr", into = "RenderModeRepr")]
pub enum RenderMode {
    /// Verbatim string conversion
    Raw,
    /// `value * 100` followed by `%`
    Percent,
    /// Fixed-point with this many decimals
    Decimals(u32),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RenderModeRepr {
    Decimals(u32),
    Named(String),
}

impl TryFrom<RenderModeRepr> for RenderMode {
    type Error = String;

    fn try_from(repr: RenderModeRepr) -> Result<Self, Self::Error> {
        match repr {
            RenderModeRepr::Decimals(n) => Ok(RenderMode::Decimals(n)),
            RenderModeRepr::Named(name) => match name.as_str() {
                "raw" => Ok(RenderMode::Raw),
                "percent" => Ok(RenderMode::Percent),
                other => Err(format!(
                    "unknown render mode `{}` (expected \"raw\", \"percent\" or an integer)",
                    other
                )),
            },
        }
    }
}

impl From<RenderMode> for RenderModeRepr {
    fn from(mode: RenderMode) -> Self {
        match mode {
            RenderMode::Raw => RenderModeRepr::Named("raw".to_string()),
            RenderMode::Percent => RenderModeRepr::Named("percent".to_string()),
            RenderMode::Decimals(n) => RenderModeRepr::Decimals(n),
        }
    }
}

/// A rendered cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedValue {
    pub display: String,
    /// Placeholder output (null, missing, empty) the renderer should de-emphasize
    pub muted: bool,
}

impl RenderedValue {
    fn plain(display: String) -> Self {
        Self {
            display,
            muted: false,
        }
    }

    fn muted(display: &str) -> Self {
        Self {
            display: display.to_string(),
            muted: true,
        }
    }
}

/// Render `row[key]` for display.
///
/// Null or missing values render as `-` and empty strings as `(empty)`,
/// both muted. Numeric strings are only treated as numbers when the column
/// type is `number`. Without a render mode numbers use
/// [`format_smart_decimal`] with two decimals.
pub fn render_value(
    row: &RowObject,
    key: &str,
    column_type: Option<ColumnType>,
    render_mode: Option<RenderMode>,
) -> RenderedValue {
    let value = match row.get(key) {
        None | Some(Value::Null) => return RenderedValue::muted(NULL_MARKER),
        Some(Value::String(s)) if s.is_empty() => return RenderedValue::muted(EMPTY_MARKER),
        Some(value) => value,
    };

    let numeric = as_number(value, column_type == Some(ColumnType::Number));

    let display = match (render_mode, numeric) {
        (Some(RenderMode::Raw), _) => plain_string(value),
        (Some(RenderMode::Percent), Some(n)) => format!("{}%", format_smart_decimal(n * 100.0, 2)),
        (Some(RenderMode::Decimals(places)), Some(n)) => format!("{:.*}", places as usize, n),
        (None, Some(n)) => format_smart_decimal(n, 2),
        (_, None) => plain_string(value),
    };
    RenderedValue::plain(display)
}

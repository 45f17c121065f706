//! Raw cell value helpers.
//!
//! Cells are `serde_json::Value`s exactly as the data source produced them.
//! A missing cell (`None`) and an explicit `null` are different values.

use serde_json::Value;

/// Deep structural equality over optional cells.
///
/// `None` only equals `None`, so a missing value never equals `null`.
pub fn deep_equal(a: Option<&Value>, b: Option<&Value>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => values_equal(a, b),
        _ => false,
    }
}

/// Deep structural equality over two values.
///
/// Numbers compare by numeric value regardless of their integer/float
/// representation; NaN equals NaN. Arrays compare element-wise and objects
/// key-wise, recursively.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => {
            if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
                return a == b;
            }
            if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
                return a == b;
            }
            match (a.as_f64(), b.as_f64()) {
                (Some(a), Some(b)) => a == b || (a.is_nan() && b.is_nan()),
                _ => false,
            }
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| values_equal(a, b))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(k, v)| b.get(k).is_some_and(|other| values_equal(v, other)))
        }
        _ => false,
    }
}

/// Plain string conversion used for key fragments and raw display.
///
/// Strings are verbatim, `null` is the literal `null`, whole floats drop
/// their fractional part (`1.0` renders as `1`).
pub fn plain_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                n.to_string()
            } else {
                n.as_f64().map(format_number_fragment).unwrap_or_default()
            }
        }
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn format_number_fragment(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 {
        format!("{:.0}", v)
    } else {
        v.to_string()
    }
}

/// Interpret a membership flag cell.
///
/// Accepts booleans, `0`/`1` and the strings `"true"`/`"false"` (ASCII
/// case-insensitive). Anything else is `false`.
pub fn is_truthy_flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64() == Some(1.0),
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Numeric view of a cell.
///
/// Strings are parsed only when `parse_strings` is set.
pub fn as_number(value: &Value, parse_strings: bool) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if parse_strings => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

//! Row identity derivation.
//!
//! A row's identity key is either a composite primary-key string
//! (`"k1=v1|k2=v2"`) or, with no primary key configured, its ordinal. The
//! key is also turned into a number ([`key_to_number`]) that becomes the
//! reconciled row's `index`.
//!
//! ## Determinism
//!
//! [`hash_string`] is a fixed 32-bit polynomial hash over UTF-16 code
//! units, so identity numbers are stable across calls and processes.

use std::collections::HashMap;

use crate::errors::ReconError;
use crate::model::value::plain_string;
use crate::model::{Column, RowObject};
use crate::options::CasePolicy;

/// Composite primary-key string for a row.
///
/// With an empty `primary_keys` list the row's ordinal (`index`) is the
/// identity. `null` values render as the literal `null`.
///
/// # Errors
///
/// `MissingColumn` when a requested key is not among `columns`.
pub fn primary_key_value(
    columns: &[Column],
    primary_keys: &[String],
    row: &RowObject,
    policy: CasePolicy,
) -> Result<String, ReconError> {
    if primary_keys.is_empty() {
        return Ok(ordinal_identity(row));
    }

    let mut parts = Vec::with_capacity(primary_keys.len());
    for pk in primary_keys {
        let column = policy
            .find(columns.iter().map(|c| c.key.as_str()), pk)
            .ok_or_else(|| ReconError::MissingColumn {
                column: pk.clone(),
                available: columns.iter().map(|c| c.key.clone()).collect(),
            })?;
        parts.push(format!("{}={}", pk, render_fragment(row, column)));
    }
    Ok(parts.join("|"))
}

/// Like [`primary_key_value`], but a key absent from `columns` renders as
/// `null` instead of failing. Used for the side of a two-dataset diff that
/// lacks a primary-key column the other side has.
pub fn primary_key_value_lenient(
    columns: &[Column],
    primary_keys: &[String],
    row: &RowObject,
    policy: CasePolicy,
) -> String {
    if primary_keys.is_empty() {
        return ordinal_identity(row);
    }

    primary_keys
        .iter()
        .map(|pk| {
            let fragment = policy
                .find(columns.iter().map(|c| c.key.as_str()), pk)
                .map(|column| render_fragment(row, column))
                .unwrap_or_else(|| "null".to_string());
            format!("{}={}", pk, fragment)
        })
        .collect::<Vec<_>>()
        .join("|")
}

fn render_fragment(row: &RowObject, column_key: &str) -> String {
    row.get(column_key)
        .map(plain_string)
        .unwrap_or_else(|| "null".to_string())
}

/// The row's ordinal rendered as an identity key (`1`, `2`, ...).
pub fn ordinal_identity(row: &RowObject) -> String {
    if row.index.is_finite() && row.index.fract() == 0.0 {
        format!("{:.0}", row.index)
    } else {
        row.index.to_string()
    }
}

/// Numeric identity for a key.
///
/// A key that parses as a finite number (decimal or scientific notation,
/// surrounding whitespace ignored) is that number. Anything else, including
/// `"Infinity"` and `"NaN"`, is hashed with [`hash_string`].
pub fn key_to_number(key: &str) -> f64 {
    match key.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => f64::from(hash_string(key)),
    }
}

/// 32-bit rolling polynomial hash: `hash = hash * 31 + code_unit` with
/// wrapping signed arithmetic over UTF-16 code units, returning `|hash|`.
pub fn hash_string(s: &str) -> u32 {
    let hash = s.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_mul(31).wrapping_add(i32::from(unit))
    });
    hash.unsigned_abs()
}

/// Identity key → row map preserving first-insertion order.
///
/// Inserting an identity a second time replaces the stored row (keeping the
/// original position) and records the identity as a duplicate.
#[derive(Debug, Clone, Default)]
pub struct IdentityMap {
    order: Vec<String>,
    rows: HashMap<String, RowObject>,
    duplicates: Vec<String>,
}

impl IdentityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row; returns `true` when it replaced an earlier row.
    pub fn insert(&mut self, identity: String, row: RowObject) -> bool {
        if self.rows.contains_key(&identity) {
            if !self.duplicates.contains(&identity) {
                self.duplicates.push(identity.clone());
            }
            self.rows.insert(identity, row);
            return true;
        }
        self.order.push(identity.clone());
        self.rows.insert(identity, row);
        false
    }

    pub fn get(&self, identity: &str) -> Option<&RowObject> {
        self.rows.get(identity)
    }

    pub fn contains_key(&self, identity: &str) -> bool {
        self.rows.contains_key(identity)
    }

    /// Identities in first-insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Identities inserted more than once
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    pub fn has_duplicates(&self) -> bool {
        !self.duplicates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColumnType;
    use serde_json::{json, Value};

    fn row(index: f64, values: &[(&str, Value)]) -> RowObject {
        let mut row = RowObject::new(index);
        for (k, v) in values {
            row.insert(*k, v.clone());
        }
        row
    }

    fn columns(keys: &[&str]) -> Vec<Column> {
        keys.iter().map(|k| Column::new(*k, ColumnType::Text)).collect()
    }

    #[test]
    fn test_composite_key_in_given_order() {
        let r = row(1.0, &[("a", json!(1)), ("b", json!("x"))]);
        let pks = vec!["b".to_string(), "a".to_string()];
        assert_eq!(
            primary_key_value(&columns(&["a", "b"]), &pks, &r, CasePolicy::Sensitive).unwrap(),
            "b=x|a=1"
        );
    }

    #[test]
    fn test_null_renders_as_literal() {
        let r = row(1.0, &[("a", Value::Null)]);
        let pks = vec!["a".to_string()];
        assert_eq!(
            primary_key_value(&columns(&["a"]), &pks, &r, CasePolicy::Sensitive).unwrap(),
            "a=null"
        );
    }

    #[test]
    fn test_missing_key_column_fails() {
        let r = row(1.0, &[]);
        let pks = vec!["zz".to_string()];
        let err = primary_key_value(&columns(&["a"]), &pks, &r, CasePolicy::Sensitive).unwrap_err();
        assert!(matches!(err, ReconError::MissingColumn { column, .. } if column == "zz"));
    }

    #[test]
    fn test_lenient_missing_key_renders_null() {
        let r = row(1.0, &[("a", json!(1))]);
        let pks = vec!["zz".to_string()];
        assert_eq!(
            primary_key_value_lenient(&columns(&["a"]), &pks, &r, CasePolicy::Sensitive),
            "zz=null"
        );
    }

    #[test]
    fn test_ordinal_fallback() {
        let r = row(3.0, &[]);
        assert_eq!(
            primary_key_value(&columns(&["a"]), &[], &r, CasePolicy::Sensitive).unwrap(),
            "3"
        );
    }

    #[test]
    fn test_key_to_number_parses_numbers() {
        assert_eq!(key_to_number("42"), 42.0);
        assert_eq!(key_to_number("-1.5"), -1.5);
        assert_eq!(key_to_number("1e3"), 1000.0);
    }

    #[test]
    fn test_key_to_number_hashes_non_finite_words() {
        assert_eq!(key_to_number("Infinity"), f64::from(hash_string("Infinity")));
        assert_eq!(key_to_number("NaN"), f64::from(hash_string("NaN")));
        assert_eq!(key_to_number("id=5"), f64::from(hash_string("id=5")));
    }

    #[test]
    fn test_hash_string_known_values() {
        assert_eq!(hash_string(""), 0);
        assert_eq!(hash_string("a"), 97);
        assert_eq!(hash_string("ab"), 97 * 31 + 98);
        // Wraps past i32::MAX
        let long = "the quick brown fox jumps over the lazy dog";
        assert_eq!(hash_string(long), hash_string(long));
    }

    #[test]
    fn test_identity_map_keeps_first_position_on_collision() {
        let mut map = IdentityMap::new();
        assert!(!map.insert("k1".into(), row(1.0, &[])));
        assert!(!map.insert("k2".into(), row(2.0, &[])));
        assert!(map.insert("k1".into(), row(3.0, &[])));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["k1", "k2"]);
        assert_eq!(map.get("k1").unwrap().index, 3.0);
        assert_eq!(map.duplicates(), ["k1".to_string()]);
        assert_eq!(map.len(), 2);
    }
}

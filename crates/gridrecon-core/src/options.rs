//! Per-call configuration for the grid generators.
//!
//! `GridOptions` is plain serde data so it can be loaded from a config file
//! and overridden field by field. Every field has a default, so an empty
//! document is a valid configuration.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::errors::ReconError;
use crate::format::RenderMode;

/// How column keys are compared when matching configured names
/// (primary keys, pinned and excluded columns) against a dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CasePolicy {
    #[default]
    Sensitive,
    Insensitive,
}

impl CasePolicy {
    pub fn matches(&self, a: &str, b: &str) -> bool {
        match self {
            CasePolicy::Sensitive => a == b,
            CasePolicy::Insensitive => a == b || a.to_lowercase() == b.to_lowercase(),
        }
    }

    pub fn contains<S: AsRef<str>>(&self, list: &[S], needle: &str) -> bool {
        list.iter().any(|item| self.matches(item.as_ref(), needle))
    }

    /// First candidate matching `needle`, preferring an exact match.
    pub fn find<'a, I>(&self, candidates: I, needle: &str) -> Option<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut fallback = None;
        for candidate in candidates {
            if candidate == needle {
                return Some(candidate);
            }
            if fallback.is_none() && self.matches(candidate, needle) {
                fallback = Some(candidate);
            }
        }
        fallback
    }
}

/// Downstream rendering shape. Does not affect reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    #[default]
    Inline,
    SideBySide,
}

/// Options accepted by every grid generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    /// Columns forming the row identity, in order. Empty means ordinal identity.
    pub primary_keys: Vec<String>,
    /// Columns frozen after the primary keys.
    pub pinned_columns: Vec<String>,
    /// Column key to render mode.
    pub columns_render_mode: BTreeMap<String, RenderMode>,
    /// Drop unchanged rows, and unchanged columns when any row is modified.
    pub changed_only: bool,
    pub display_mode: DisplayMode,
    pub base_title: Option<String>,
    pub current_title: Option<String>,
    /// Columns never emitted.
    pub exclude_columns: Vec<String>,
    /// Whether an unknown primary-key/pinned column is an error.
    /// `None` uses the generator's default.
    pub strict_mode: Option<bool>,
    pub case_policy: CasePolicy,
}

impl GridOptions {
    pub fn with_primary_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_pinned_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pinned_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_exclude_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_changed_only(mut self, changed_only: bool) -> Self {
        self.changed_only = changed_only;
        self
    }

    pub fn with_strict_mode(mut self, strict: bool) -> Self {
        self.strict_mode = Some(strict);
        self
    }

    pub fn with_case_policy(mut self, policy: CasePolicy) -> Self {
        self.case_policy = policy;
        self
    }

    pub fn with_render_mode(mut self, column: impl Into<String>, mode: RenderMode) -> Self {
        self.columns_render_mode.insert(column.into(), mode);
        self
    }

    /// Check option-level consistency.
    ///
    /// # Errors
    ///
    /// `InvalidOptions` when `pinned_columns` lists a column twice.
    pub fn validate(&self) -> Result<(), ReconError> {
        let mut seen = HashSet::new();
        for column in &self.pinned_columns {
            let normalized = match self.case_policy {
                CasePolicy::Sensitive => column.clone(),
                CasePolicy::Insensitive => column.to_lowercase(),
            };
            if !seen.insert(normalized) {
                return Err(ReconError::InvalidOptions {
                    reason: format!("pinned column `{}` is listed more than once", column),
                });
            }
        }
        Ok(())
    }

    /// Render mode configured for a column key, honoring the case policy.
    pub fn render_mode_for(&self, key: &str) -> Option<RenderMode> {
        if let Some(mode) = self.columns_render_mode.get(key) {
            return Some(*mode);
        }
        self.columns_render_mode
            .iter()
            .find(|(k, _)| self.case_policy.matches(k, key))
            .map(|(_, mode)| *mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_policy_matching() {
        assert!(CasePolicy::Sensitive.matches("id", "id"));
        assert!(!CasePolicy::Sensitive.matches("ID", "id"));
        assert!(CasePolicy::Insensitive.matches("ID", "id"));
    }

    #[test]
    fn test_find_prefers_exact_match() {
        let keys = ["ID", "id"];
        assert_eq!(
            CasePolicy::Insensitive.find(keys.iter().copied(), "id"),
            Some("id")
        );
        assert_eq!(
            CasePolicy::Insensitive.find(keys.iter().copied(), "Id"),
            Some("ID")
        );
        assert_eq!(CasePolicy::Sensitive.find(keys.iter().copied(), "Id"), None);
    }

    #[test]
    fn test_empty_document_is_default() {
        let opts: GridOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, GridOptions::default());
        assert_eq!(opts.display_mode, DisplayMode::Inline);
        assert_eq!(opts.case_policy, CasePolicy::Sensitive);
        assert!(opts.strict_mode.is_none());
    }

    #[test]
    fn test_display_mode_serde_names() {
        let opts: GridOptions =
            serde_json::from_str(r#"{"display_mode":"side_by_side","case_policy":"insensitive"}"#)
                .unwrap();
        assert_eq!(opts.display_mode, DisplayMode::SideBySide);
        assert_eq!(opts.case_policy, CasePolicy::Insensitive);
    }

    #[test]
    fn test_duplicate_pinned_rejected() {
        let opts = GridOptions::default().with_pinned_columns(["a", "b", "a"]);
        assert!(matches!(
            opts.validate(),
            Err(ReconError::InvalidOptions { .. })
        ));

        let opts = GridOptions::default()
            .with_pinned_columns(["a", "A"])
            .with_case_policy(CasePolicy::Insensitive);
        assert!(opts.validate().is_err());

        let opts = GridOptions::default().with_pinned_columns(["a", "A"]);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_render_mode_lookup_honors_case_policy() {
        let opts = GridOptions::default().with_render_mode("Rate", RenderMode::Percent);
        assert_eq!(opts.render_mode_for("Rate"), Some(RenderMode::Percent));
        assert_eq!(opts.render_mode_for("rate"), None);
        let opts = opts.with_case_policy(CasePolicy::Insensitive);
        assert_eq!(opts.render_mode_for("rate"), Some(RenderMode::Percent));
    }
}

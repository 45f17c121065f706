//! Subcommands and the option handling they share.

pub mod diff;
pub mod membership;
pub mod row_count;
pub mod view;

use clap::Args;
use gridrecon_core::logging_facility::{init, Profile};
use gridrecon_core::{CasePolicy, Dataset, GridOptions};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Flags accepted by every subcommand.
#[derive(Debug, Args)]
pub struct GridArgs {
    /// TOML file with grid options; flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Primary-key column (repeatable, in order)
    #[arg(short = 'k', long = "primary-key")]
    pub primary_keys: Vec<String>,

    /// Pinned column (repeatable)
    #[arg(short, long = "pinned")]
    pub pinned: Vec<String>,

    /// Column to leave out (repeatable)
    #[arg(short = 'x', long = "exclude")]
    pub exclude: Vec<String>,

    /// Only changed rows (and changed columns when any row is modified)
    #[arg(long)]
    pub changed_only: bool,

    /// Match configured column names case-insensitively
    #[arg(long)]
    pub case_insensitive: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Emit structured logs (JSON) on stderr
    #[arg(long)]
    pub log: bool,
}

impl GridArgs {
    /// Load the config file, if any, and apply flag overrides.
    pub fn options(&self) -> Result<GridOptions, Box<dyn std::error::Error>> {
        if self.log {
            init(Profile::Production);
        }

        let mut options = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
                toml::from_str::<GridOptions>(&text)
                    .map_err(|e| format!("invalid config {}: {}", path.display(), e))?
            }
            None => GridOptions::default(),
        };

        if !self.primary_keys.is_empty() {
            options.primary_keys = self.primary_keys.clone();
        }
        if !self.pinned.is_empty() {
            options.pinned_columns = self.pinned.clone();
        }
        options.exclude_columns.extend(self.exclude.iter().cloned());
        if self.changed_only {
            options.changed_only = true;
        }
        if self.case_insensitive {
            options.case_policy = CasePolicy::Insensitive;
        }
        Ok(options)
    }

    pub fn print<T: Serialize>(&self, value: &T) -> CliResult {
        let out = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        println!("{}", out);
        Ok(())
    }
}

/// Read a JSON file.
pub fn read_json(path: &Path) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    Ok(serde_json::from_str(&text)?)
}

/// Read and validate a dataset file. A file containing `null` is no dataset.
pub fn read_dataset(
    path: &Path,
    context: &str,
) -> Result<Option<Dataset>, Box<dyn std::error::Error>> {
    let value = read_json(path)?;
    Ok(Dataset::from_json(&value, Some(context))?)
}

//! Row-count commands
//!
//! Usage:
//!   gridrecon row-count <COUNTS>        (`{"orders": 10, "users": null}`)
//!   gridrecon row-count-diff <COUNTS>   (`{"orders": {"base": 8, "current": 9}}`)

use clap::Args;
use gridrecon_core::RowCountPair;
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::{read_json, CliResult, GridArgs};

#[derive(Debug, Args)]
pub struct RowCountArgs {
    /// JSON object mapping names to counts (or null)
    pub counts: PathBuf,

    #[command(flatten)]
    pub grid: GridArgs,
}

#[derive(Debug, Args)]
pub struct RowCountDiffArgs {
    /// JSON object mapping names to `{"base": n, "current": n}`
    pub counts: PathBuf,

    #[command(flatten)]
    pub grid: GridArgs,
}

/// Execute row-count command
pub fn execute(args: RowCountArgs) -> CliResult {
    let options = args.grid.options()?;
    let counts: BTreeMap<String, Option<u64>> = serde_json::from_value(read_json(&args.counts)?)?;
    let grid = gridrecon_core::row_count_grid(counts, &options)?;
    args.grid.print(&grid)
}

/// Execute row-count-diff command
pub fn execute_diff(args: RowCountDiffArgs) -> CliResult {
    let options = args.grid.options()?;
    let counts: BTreeMap<String, RowCountPair> = serde_json::from_value(read_json(&args.counts)?)?;
    let grid = gridrecon_core::row_count_diff_grid(counts, &options)?;
    args.grid.print(&grid)
}

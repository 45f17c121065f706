//! Membership command
//!
//! Usage: gridrecon membership <DATASET> --primary-key <COL>... [grid flags]

use clap::Args;
use gridrecon_core::rules::validation::CONTEXT_MEMBERSHIP;
use std::path::PathBuf;

use super::{read_dataset, CliResult, GridArgs};

#[derive(Debug, Args)]
pub struct MembershipArgs {
    /// Dataset JSON file with boolean `in_a` / `in_b` columns
    pub dataset: PathBuf,

    #[command(flatten)]
    pub grid: GridArgs,
}

/// Execute membership command
pub fn execute(args: MembershipArgs) -> CliResult {
    let options = args.grid.options()?;
    let dataset = read_dataset(&args.dataset, CONTEXT_MEMBERSHIP)?;
    let grid = gridrecon_core::to_membership_diff_grid(dataset.as_ref(), &options)?;
    args.grid.print(&grid)
}

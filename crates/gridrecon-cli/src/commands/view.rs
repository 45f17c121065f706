//! View command
//!
//! Usage: gridrecon view <DATASET> [grid flags]

use clap::Args;
use gridrecon_core::rules::validation::CONTEXT_SINGLE;
use std::path::PathBuf;

use super::{read_dataset, CliResult, GridArgs};

#[derive(Debug, Args)]
pub struct ViewArgs {
    /// Dataset JSON file (`{"columns": [...], "data": [...]}`)
    pub dataset: PathBuf,

    #[command(flatten)]
    pub grid: GridArgs,
}

/// Execute view command
pub fn execute(args: ViewArgs) -> CliResult {
    let options = args.grid.options()?;
    let dataset = read_dataset(&args.dataset, CONTEXT_SINGLE)?;
    let grid = gridrecon_core::to_data_grid(dataset.as_ref(), &options)?;
    args.grid.print(&grid)
}

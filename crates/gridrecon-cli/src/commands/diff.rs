//! Diff command
//!
//! Usage: gridrecon diff <BASE> <CURRENT> [--side-by-side] [--base-title <T>] [--current-title <T>] [grid flags]

use clap::Args;
use gridrecon_core::rules::validation::{CONTEXT_BASE, CONTEXT_CURRENT};
use gridrecon_core::DisplayMode;
use std::path::PathBuf;

use super::{read_dataset, CliResult, GridArgs};

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Base dataset JSON file
    pub base: PathBuf,

    /// Current dataset JSON file
    pub current: PathBuf,

    /// Ask the renderer for side-by-side display
    #[arg(long)]
    pub side_by_side: bool,

    /// Label for the base side
    #[arg(long)]
    pub base_title: Option<String>,

    /// Label for the current side
    #[arg(long)]
    pub current_title: Option<String>,

    /// Fail when a primary-key or pinned column is in neither dataset
    #[arg(long)]
    pub strict: bool,

    #[command(flatten)]
    pub grid: GridArgs,
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> CliResult {
    let mut options = args.grid.options()?;
    if args.side_by_side {
        options.display_mode = DisplayMode::SideBySide;
    }
    if args.base_title.is_some() {
        options.base_title = args.base_title.clone();
    }
    if args.current_title.is_some() {
        options.current_title = args.current_title.clone();
    }
    if args.strict {
        options.strict_mode = Some(true);
    }

    let base = read_dataset(&args.base, CONTEXT_BASE)?;
    let current = read_dataset(&args.current, CONTEXT_CURRENT)?;
    let grid = gridrecon_core::to_diff_grid(base.as_ref(), current.as_ref(), &options)?;
    args.grid.print(&grid)
}

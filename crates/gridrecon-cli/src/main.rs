//! gridrecon CLI
//!
//! Command-line interface for the gridrecon reconciliation engine. Datasets
//! are read as JSON files and the resulting grid is printed as JSON.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "gridrecon")]
#[command(about = "gridrecon - Tabular diff reconciliation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show a single dataset
    View(commands::view::ViewArgs),
    /// Diff a base dataset against a current dataset
    Diff(commands::diff::DiffArgs),
    /// Diff one dataset carrying in_a/in_b membership flags
    Membership(commands::membership::MembershipArgs),
    /// Show a name → row count mapping
    RowCount(commands::row_count::RowCountArgs),
    /// Compare base and current row counts per name
    RowCountDiff(commands::row_count::RowCountDiffArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::View(args) => commands::view::execute(args),
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Membership(args) => commands::membership::execute(args),
        Commands::RowCount(args) => commands::row_count::execute(args),
        Commands::RowCountDiff(args) => commands::row_count::execute_diff(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

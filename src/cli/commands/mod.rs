//! Command implementations for the roster sync CLI
//!
//! Each command lives in its own module; this module only dispatches.

pub mod import;
pub mod inspect;
pub mod shared;

use crate::Result;
use crate::cli::args::Commands;

/// Main command runner
///
/// Dispatches to the handler for the selected subcommand:
/// - `import`: run an import flow against the roster
/// - `inspect`: parse and clean a file, print the cleaned rows
pub async fn run(command: &Commands) -> Result<()> {
    match command {
        Commands::Import(import_args) => import::run_import(import_args).await.map(|_| ()),
        Commands::Inspect(inspect_args) => inspect::run_inspect(inspect_args).await,
    }
}

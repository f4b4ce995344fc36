//! Inspect command: show what an import would read from a file

use colored::*;

use super::shared::setup_logging;
use crate::Result;
use crate::app::services::csv_import::CsvParser;
use crate::app::services::reconciler::ImportRunner;
use crate::cli::args::InspectArgs;

/// Run the inspect command
pub async fn run_inspect(args: &InspectArgs) -> Result<()> {
    setup_logging(args.get_log_level(), false)?;

    // Broken CSV is reported here instead of showing as an empty file
    let parsed = CsvParser::new().parse_file_checked(&args.file).await?;
    let cleaned = ImportRunner::new(args.flow).prepare(parsed)?;

    println!(
        "{} {} ({})",
        "Inspecting".bold(),
        args.file.display(),
        args.flow
    );

    let limit = args.limit.unwrap_or(usize::MAX);
    for row in cleaned.rows.iter().take(limit) {
        let cells: Vec<String> = row
            .cells()
            .iter()
            .map(|(header, value)| format!("{}={}", header.cyan(), value))
            .collect();
        println!("  {:>4}: {}", row.row_number, cells.join(" | "));
    }

    if cleaned.rows.len() > limit {
        println!("  ... {} more rows", cleaned.rows.len() - limit);
    }

    println!();
    println!("{}", cleaned.stats.summary().dimmed());
    Ok(())
}

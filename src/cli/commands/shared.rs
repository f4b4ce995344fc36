//! Shared components for CLI commands

use colored::*;
use tracing::debug;

use crate::Result;
use crate::app::services::reconciler::{ImportSummary, RunNotice};

/// Set up structured logging to stderr
///
/// `RUST_LOG` takes precedence over `log_level`. Quiet mode uses the compact
/// formatter without timestamps.
pub fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("roster_sync={}", log_level)));

    if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .ok();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Print the outcome lines, the final notice and the missing-student prompt
pub fn print_summary(summary: &ImportSummary, dry_run: bool, quiet: bool) {
    if !quiet {
        for line in &summary.lines {
            println!("  {} {}", "✓".green(), line);
        }
        if !summary.lines.is_empty() {
            println!();
        }
    }

    let prefix = if dry_run { "[dry run] " } else { "" };
    match summary.notice() {
        RunNotice::Success(_) => {
            println!("{}{}", prefix, summary.notice().to_string().green().bold())
        }
        RunNotice::NothingToDo | RunNotice::NoRows => {
            println!("{}{}", prefix, summary.notice().to_string().yellow().bold())
        }
    }

    if let Some(prompt) = summary.missing_student_prompt() {
        if summary.unmatched_count > 1 {
            println!(
                "{}",
                format!("{} students were not on the roster.", summary.unmatched_count).yellow()
            );
        }
        println!("{}", prompt.yellow());
    }

    if !quiet {
        println!("{}", summary.summary().dimmed());
    }
}

/// Generic notice for a failed run
pub fn print_failure_notice() {
    eprintln!(
        "{}",
        "Import failed. Rows before the failure were written; see the log output for details."
            .red()
            .bold()
    );
}

/// Shown when Ctrl+C cancels a run; the write in flight may or may not land
pub const INTERRUPTED_NOTICE: &str = "Received CTRL+C, stopping; rows already written remain written";

pub fn print_interrupt_notice() {
    eprintln!("\n{}", INTERRUPTED_NOTICE.yellow());
}

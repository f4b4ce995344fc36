//! Command-line argument definitions for roster sync
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::app::services::reconciler::Flow;
use crate::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the roster import tool
///
/// Reconciles CSV exports from the enrollment platform against the roster,
/// creating new records or updating class schedules on matching ones.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "roster-sync",
    version,
    about = "Reconcile enrollment-platform CSV exports against the student roster",
    long_about = "Imports CSV exports from the enrollment platform into the student roster. \
                  Supports appending the enrollment log, adding new students, and updating \
                  the class and days of students already on the roster."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Import a CSV export into the roster
    Import(ImportArgs),
    /// Parse and clean a CSV export without touching the roster
    Inspect(InspectArgs),
}

/// Arguments for the import command
#[derive(Debug, Clone, Parser)]
pub struct ImportArgs {
    /// Import flow to run
    #[arg(value_enum, value_name = "FLOW")]
    pub flow: Flow,

    /// CSV export to import
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Configuration file (TOML)
    ///
    /// Defaults to roster-sync/config.toml under the platform config directory
    /// when that file exists.
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Directory holding the roster collections, overriding the config file
    #[arg(long = "store-dir", value_name = "PATH")]
    pub store_dir: Option<PathBuf>,

    /// Compute the summary without writing to the roster
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors and the final notice
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Arguments for the inspect command
#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    /// CSV export to inspect
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Flow whose cleaning rules to apply
    #[arg(short = 'f', long = "flow", value_enum)]
    pub flow: Flow,

    /// Show at most this many rows
    #[arg(short = 'n', long = "limit", value_name = "ROWS")]
    pub limit: Option<usize>,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Option<&Commands> {
        self.command.as_ref()
    }
}

impl ImportArgs {
    /// Validate the import arguments before any work starts
    pub fn validate(&self) -> Result<()> {
        if !self.file.is_file() {
            return Err(Error::configuration(format!(
                "Input file does not exist: {}",
                self.file.display()
            )));
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.is_file() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            log_level_for(self.verbose)
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl InspectArgs {
    pub fn get_log_level(&self) -> &'static str {
        log_level_for(self.verbose)
    }
}

fn log_level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

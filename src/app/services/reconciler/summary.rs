//! Import run summaries and user-facing notices

use std::fmt;

use super::flows::Flow;
use super::decisions::{RowOutcome, SkipReason};
use crate::app::models::Identity;
use crate::app::services::csv_import::CleanStats;

/// Outcome of one row, kept for diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct RowReport {
    /// 1-based data row number in the source file
    pub row_number: usize,
    pub outcome: RowOutcome,
    pub identity: Option<Identity>,
    /// Present for skipped rows
    pub reason: Option<SkipReason>,
}

/// The final notice shown to the user for a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunNotice {
    /// At least one record was written
    Success(usize),
    /// Rows were read but none needed a write
    NothingToDo,
    /// The input held no usable rows
    NoRows,
}

impl fmt::Display for RunNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunNotice::Success(1) => f.write_str("Successfully imported 1 record"),
            RunNotice::Success(n) => write!(f, "Successfully imported {} records", n),
            RunNotice::NothingToDo => f.write_str("Nothing to import: every row is already up to date"),
            RunNotice::NoRows => f.write_str("No rows found in the file"),
        }
    }
}

/// Everything a caller needs to report on one import run
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSummary {
    pub flow: Flow,

    /// One line per successful write, in row order
    pub lines: Vec<String>,

    /// One report per reconciled row, in row order
    pub reports: Vec<RowReport>,

    pub success_count: usize,
    pub unmatched_count: usize,

    /// The student flagged for manual enrollment (the last unmatched one)
    pub missing_student: Option<Identity>,

    /// Form where a missing student can be enrolled
    pub enrollment_form_url: String,

    pub clean_stats: CleanStats,
}

impl ImportSummary {
    pub fn new(flow: Flow, enrollment_form_url: impl Into<String>) -> Self {
        Self {
            flow,
            lines: Vec::new(),
            reports: Vec::new(),
            success_count: 0,
            unmatched_count: 0,
            missing_student: None,
            enrollment_form_url: enrollment_form_url.into(),
            clean_stats: CleanStats::default(),
        }
    }

    /// Record a committed write
    pub fn record_write(
        &mut self,
        row_number: usize,
        outcome: RowOutcome,
        identity: Option<Identity>,
        line: String,
    ) {
        self.success_count += 1;
        self.lines.push(line);
        self.reports.push(RowReport {
            row_number,
            outcome,
            identity,
            reason: None,
        });
    }

    /// Record a skipped row
    pub fn record_skip(
        &mut self,
        row_number: usize,
        outcome: RowOutcome,
        identity: Option<Identity>,
        reason: SkipReason,
    ) {
        if outcome == RowOutcome::SkippedUnmatched {
            self.unmatched_count += 1;
            if let Some(identity) = &identity {
                self.missing_student = Some(identity.clone());
            }
        }
        self.reports.push(RowReport {
            row_number,
            outcome,
            identity,
            reason: Some(reason),
        });
    }

    /// Number of rows that ended in `outcome`
    pub fn count(&self, outcome: RowOutcome) -> usize {
        self.reports.iter().filter(|r| r.outcome == outcome).count()
    }

    pub fn rows_processed(&self) -> usize {
        self.reports.len()
    }

    pub fn notice(&self) -> RunNotice {
        if self.reports.is_empty() {
            RunNotice::NoRows
        } else if self.success_count > 0 {
            RunNotice::Success(self.success_count)
        } else {
            RunNotice::NothingToDo
        }
    }

    /// Prompt pointing staff at the enrollment form for the flagged student
    pub fn missing_student_prompt(&self) -> Option<String> {
        self.missing_student.as_ref().map(|student| {
            format!(
                "{} is not on the roster. Enroll them first: {}",
                student, self.enrollment_form_url
            )
        })
    }

    /// Get a summary string of the run
    pub fn summary(&self) -> String {
        format!(
            "{}: {} rows, {} created, {} updated, {} duplicate, {} unmatched, {} unparseable",
            self.flow,
            self.rows_processed(),
            self.count(RowOutcome::Created),
            self.count(RowOutcome::Updated),
            self.count(RowOutcome::SkippedDuplicate),
            self.unmatched_count,
            self.count(RowOutcome::SkippedUnparseable)
        )
    }
}

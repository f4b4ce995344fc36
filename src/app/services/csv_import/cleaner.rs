//! Row cleaning for enrollment-platform exports
//!
//! The export merges repeated cells across the physical rows of one
//! registration, leaving them blank on all but the first row. Forward-fill
//! mode repairs that; strict mode instead drops anything that does not look
//! like a complete data row.

use tracing::debug;

use super::stats::CleanStats;
use crate::app::models::{CleanedRow, RawRow};
use crate::constants::columns;

/// How rows are repaired and filtered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleaningMode {
    /// Drop rows whose identity is empty or which repeat a header token
    Strict {
        /// Columns whose cell equal to the column's own name marks a stray header row
        sentinel_columns: Vec<String>,
    },

    /// Carry the last non-empty value of each column down into blank cells
    ForwardFill { fill_columns: Vec<String> },
}

impl CleaningMode {
    /// Strict mode guarding the student and birth-date columns
    pub fn strict() -> Self {
        Self::Strict {
            sentinel_columns: vec![columns::STUDENT.to_string(), columns::BIRTH_DATE.to_string()],
        }
    }

    pub fn forward_fill<I, S>(fill_columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::ForwardFill {
            fill_columns: fill_columns.into_iter().map(Into::into).collect(),
        }
    }
}

/// Cleaned rows and statistics
#[derive(Debug, Clone, Default)]
pub struct CleanResult {
    pub rows: Vec<CleanedRow>,
    pub stats: CleanStats,
}

/// Cleans parsed rows for one import flow
///
/// Every kept cell is whitespace-trimmed. Rows are processed strictly in
/// input order: forward-fill depends on it.
#[derive(Debug, Clone)]
pub struct RowCleaner {
    mode: CleaningMode,
    identity_column: String,
    required_cells: Vec<String>,
    trim_headers: bool,
}

impl RowCleaner {
    pub fn new(mode: CleaningMode) -> Self {
        Self {
            mode,
            identity_column: columns::STUDENT.to_string(),
            required_cells: Vec::new(),
            trim_headers: true,
        }
    }

    /// Column holding the combined student name
    pub fn with_identity_column(mut self, column: impl Into<String>) -> Self {
        self.identity_column = column.into();
        self
    }

    /// Additional cells that must be non-empty for a row to be kept
    pub fn with_required_cells<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_cells = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Keep header keys exactly as parsed instead of trimming them
    pub fn without_header_trimming(mut self) -> Self {
        self.trim_headers = false;
        self
    }

    pub fn mode(&self) -> &CleaningMode {
        &self.mode
    }

    /// Clean a row sequence, in order
    pub fn clean(&self, rows: Vec<RawRow>) -> CleanResult {
        let mut stats = CleanStats::new();
        stats.input_rows = rows.len();

        let mut carried: Vec<(String, String)> = match &self.mode {
            CleaningMode::ForwardFill { fill_columns } => fill_columns
                .iter()
                .map(|column| (column.clone(), String::new()))
                .collect(),
            CleaningMode::Strict { .. } => Vec::new(),
        };

        let mut cleaned = Vec::with_capacity(rows.len());

        for row in rows {
            let row_number = row.row_number;
            let mut cells = self.trim_cells(row);

            if let CleaningMode::ForwardFill { .. } = self.mode {
                stats.cells_filled += fill_forward(&mut cells, &mut carried);
            }

            let identity_empty = cell(&cells, &self.identity_column)
                .is_none_or(|value| value.is_empty());
            if identity_empty {
                debug!("Row {}: dropped, empty identity", row_number);
                stats.dropped_empty_identity += 1;
                continue;
            }

            if let CleaningMode::Strict { sentinel_columns } = &self.mode {
                let sentinel = sentinel_columns
                    .iter()
                    .find(|column| cell(&cells, column) == Some(column.as_str()));
                if let Some(column) = sentinel {
                    debug!("Row {}: dropped, repeated header '{}'", row_number, column);
                    stats.dropped_header_rows += 1;
                    continue;
                }
            }

            let missing = self
                .required_cells
                .iter()
                .find(|column| cell(&cells, column).is_none_or(|value| value.is_empty()));
            if let Some(column) = missing {
                debug!("Row {}: dropped, empty '{}'", row_number, column);
                stats.dropped_missing_cells += 1;
                continue;
            }

            cleaned.push(CleanedRow::new(row_number, cells));
        }

        stats.rows_kept = cleaned.len();
        debug!("{}", stats.summary());

        CleanResult {
            rows: cleaned,
            stats,
        }
    }

    fn trim_cells(&self, row: RawRow) -> Vec<(String, String)> {
        row.into_cells()
            .into_iter()
            .map(|(header, value)| {
                let header = if self.trim_headers {
                    header.trim().to_string()
                } else {
                    header
                };
                (header, value.trim().to_string())
            })
            .collect()
    }
}

fn cell<'a>(cells: &'a [(String, String)], column: &str) -> Option<&'a str> {
    cells
        .iter()
        .find(|(header, _)| header == column)
        .map(|(_, value)| value.as_str())
}

/// Fill blank cells from `carried`, and remember non-blank ones; returns cells filled
///
/// A fill column missing from the row entirely is added with the carried value.
fn fill_forward(cells: &mut Vec<(String, String)>, carried: &mut [(String, String)]) -> usize {
    let mut filled = 0;

    for (column, last) in carried.iter_mut() {
        match cells.iter_mut().find(|(header, _)| header == column) {
            Some((_, value)) if !value.is_empty() => *last = value.clone(),
            Some((_, value)) => {
                if !last.is_empty() {
                    *value = last.clone();
                    filled += 1;
                }
            }
            None => {
                if !last.is_empty() {
                    cells.push((column.clone(), last.clone()));
                    filled += 1;
                }
            }
        }
    }

    filled
}

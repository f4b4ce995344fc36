//! CSV parser for enrollment-platform exports
//!
//! Reads header-first CSV (quoted fields, embedded commas, ragged rows) into
//! ordered [`RawRow`]s. Blank lines never surface as rows.

use std::path::Path;
use tracing::{debug, info, warn};

use super::stats::ParseStats;
use crate::app::models::RawRow;
use crate::constants::CSV_EXTENSION;
use crate::{Error, Result};

/// Parsed CSV content: header row, data rows, and statistics
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    /// Column headers exactly as they appear in the file
    pub headers: Vec<String>,

    /// Data rows in file order
    pub rows: Vec<RawRow>,

    pub stats: ParseStats,
}

impl ParseResult {
    /// True when the input produced no usable rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether a column is present in the header (compared after trimming)
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h.trim() == column)
    }

    /// Columns from `required` that the header lacks, in the order given
    pub fn missing_columns<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|column| !self.has_column(column))
            .collect()
    }
}

/// Parser for header-first CSV exports
#[derive(Debug, Clone, Default)]
pub struct CsvParser;

impl CsvParser {
    pub fn new() -> Self {
        Self
    }

    /// Read and parse a `.csv` file
    ///
    /// A file without the `.csv` extension is rejected before it is read.
    /// Content that cannot be parsed yields an empty result, not an error.
    pub async fn parse_file(&self, file_path: &Path) -> Result<ParseResult> {
        let bytes = read_csv_file(file_path).await?;

        let result = self.parse_bytes(&bytes);
        info!(
            "Parsed {} rows from {} ({} columns)",
            result.rows.len(),
            file_path.display(),
            result.headers.len()
        );
        Ok(result)
    }

    /// Read and parse a `.csv` file, failing on content the reader cannot decode
    ///
    /// Where [`parse_file`](Self::parse_file) degrades to zero rows, a broken
    /// header or record here is an [`Error::CsvParsing`] naming the file and
    /// the record.
    pub async fn parse_file_checked(&self, file_path: &Path) -> Result<ParseResult> {
        let bytes = read_csv_file(file_path).await?;

        let mut stats = ParseStats::new();
        let (headers, rows) = self.read_records(&bytes, &mut stats).map_err(|e| {
            Error::csv_parsing(
                file_path.display().to_string(),
                format!("unreadable content {}", failure_location(&stats)),
                Some(e),
            )
        })?;

        info!("Parsed {} rows from {}", rows.len(), file_path.display());
        Ok(ParseResult {
            headers,
            rows,
            stats,
        })
    }

    pub fn parse_str(&self, content: &str) -> ParseResult {
        self.parse_bytes(content.as_bytes())
    }

    /// Parse CSV bytes
    ///
    /// Any structural failure (unreadable header, invalid UTF-8, broken
    /// record) discards the whole input: the result has no rows and the
    /// failure is recorded in the stats.
    pub fn parse_bytes(&self, content: &[u8]) -> ParseResult {
        let mut stats = ParseStats::new();

        match self.read_records(content, &mut stats) {
            Ok((headers, rows)) => ParseResult {
                headers,
                rows,
                stats,
            },
            Err(e) => {
                let location = failure_location(&stats);
                warn!("Unparseable CSV {}; discarding input: {}", location, e);
                stats.errors.push(format!("CSV parse error {}: {}", location, e));
                ParseResult {
                    stats,
                    ..Default::default()
                }
            }
        }
    }

    fn read_records(
        &self,
        content: &[u8],
        stats: &mut ParseStats,
    ) -> std::result::Result<(Vec<String>, Vec<RawRow>), csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(content);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        if headers.iter().all(|h| h.trim().is_empty()) {
            debug!("CSV input has no header row");
            return Ok((Vec::new(), Vec::new()));
        }

        let mut rows = Vec::new();
        for result in reader.records() {
            stats.total_records += 1;
            let record = result?;

            if record.len() > headers.len() {
                stats.ragged_records += 1;
            }
            // Cells beyond the header are dropped; missing cells stay absent
            let cells = headers
                .iter()
                .zip(record.iter())
                .map(|(header, value)| (header.clone(), value.to_string()))
                .collect();
            rows.push(RawRow::new(rows.len() + 1, cells));
        }

        stats.rows_parsed = rows.len();
        debug!(
            "Parsed {} rows ({} ragged)",
            stats.rows_parsed, stats.ragged_records
        );

        Ok((headers, rows))
    }
}

async fn read_csv_file(file_path: &Path) -> Result<Vec<u8>> {
    ensure_csv_extension(file_path)?;
    info!("Parsing CSV file: {}", file_path.display());

    tokio::fs::read(file_path)
        .await
        .map_err(|e| Error::io(format!("Failed to read file {}", file_path.display()), e))
}

fn failure_location(stats: &ParseStats) -> String {
    if stats.total_records == 0 {
        "in header".to_string()
    } else {
        format!("at record {}", stats.total_records)
    }
}

/// Reject paths whose extension is not `.csv` (case-insensitive)
pub fn ensure_csv_extension(file_path: &Path) -> Result<()> {
    let is_csv = file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(CSV_EXTENSION));

    if is_csv {
        Ok(())
    } else {
        Err(Error::input_rejected(format!(
            "'{}' is not a .csv file",
            file_path.display()
        )))
    }
}

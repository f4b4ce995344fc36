//! CSV import for enrollment-platform exports
//!
//! This module turns raw CSV text into cleaned rows ready for reconciliation.
//! Parsing is deliberately forgiving: an unreadable export yields zero rows
//! instead of an error, and the caller reports "nothing to import".
//!
//! ## Architecture
//!
//! - [`parser`] - CSV text/bytes/file to ordered [`RawRow`]s
//! - [`cleaner`] - trimming, forward-fill of merged cells, header/sentinel row removal
//! - [`stats`] - parse and clean statistics
//!
//! ## Usage
//!
//! ```rust
//! use roster_sync::app::services::csv_import::{CleaningMode, CsvParser, RowCleaner};
//!
//! let csv = "Student,Enrolled\n\"Smith, John\",04/25/2025 @ 12:08 pm\n,\n";
//! let parsed = CsvParser::new().parse_str(csv);
//! let cleaner = RowCleaner::new(CleaningMode::forward_fill(["Student", "Enrolled"]));
//! let cleaned = cleaner.clean(parsed.rows);
//!
//! assert_eq!(cleaned.rows.len(), 2);
//! assert_eq!(cleaned.rows[1].get("Student"), Some("Smith, John"));
//! ```
//!
//! [`RawRow`]: crate::app::models::RawRow

pub mod cleaner;
pub mod parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use cleaner::{CleanResult, CleaningMode, RowCleaner};
pub use parser::{CsvParser, ParseResult};
pub use stats::{CleanStats, ParseStats};

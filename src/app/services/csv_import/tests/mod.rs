//! Test utilities for CSV import testing
//!
//! Shared CSV fixtures used across the parser and cleaner test modules.

use std::io::Write;
use tempfile::NamedTempFile;

use crate::app::models::RawRow;


/// Schedule-update export with a stray header row and a row missing its days
pub fn create_schedule_csv() -> String {
    r#"Student,Class,Days
"Smith, John",Suzume (ages 3-4),"Mon, Wed"
"Tanaka, Aiko",HIBARI afternoon,Tue
Student,Class,Days
"Lee, Ben",Uguisu,
"#
    .to_string()
}

/// Enrollment-log export with merged Student/Enrolled cells
pub fn create_enrollment_log_csv() -> String {
    r#"Student,Enrolled,Class,Fee
"Smith, John",04/25/2025 @ 12:08 pm,Suzume,120
,,Hibari,80

"Tanaka, Aiko",04/26/2025 @ 9:15 am,Uguisu,120
,,Tsubame,60
"#
    .to_string()
}

/// Build a raw row from header/value pairs
pub fn raw_row(row_number: usize, pairs: &[(&str, &str)]) -> RawRow {
    RawRow::from_pairs(row_number, pairs.iter().copied())
}

/// Helper to create a temporary file with the given suffix and content
pub fn create_temp_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut temp_file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}

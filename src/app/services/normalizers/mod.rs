//! Field normalizers for enrollment-platform exports
//!
//! Pure functions that turn raw cell text into typed values. None of them
//! fail loudly: an unusable cell becomes `None` (or an empty identity) and
//! the reconciler turns that into a skip outcome.
//!
//! - [`names`] - "Last, First" splitting
//! - [`dates`] - date-of-birth and enrollment-timestamp dialects
//! - [`schedule`] - class-label classification, weekday lists, ages
//! - [`formatter`] - schema-driven conversion of a whole row into a write payload

pub mod dates;
pub mod formatter;
pub mod names;
pub mod schedule;

#[cfg(test)]
pub mod tests;

pub use dates::{parse_date_of_birth, parse_enrollment_timestamp, parse_stored_timestamp};
pub use formatter::{FieldSchema, FieldType, format_row};
pub use names::split_full_name;
pub use schedule::{ClassTable, classify_class_label, extract_age_years, parse_weekday_list};

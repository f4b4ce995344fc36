//! Date parsing for the two export dialects
//!
//! Birth dates arrive as `MM/DD/YYYY`; enrollment timestamps as
//! `MM/DD/YYYY @ h:mm am`. The two parsers are not interchangeable.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse a `MM/DD/YYYY` date of birth
///
/// Exactly three slash-separated numeric components forming a valid
/// calendar date; anything else is `None`. No time zone is involved.
pub fn parse_date_of_birth(raw: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = raw.trim().split('/').collect();
    let [month, day, year] = parts.as_slice() else {
        return None;
    };

    let month = parse_component(month)?;
    let day = parse_component(day)?;
    let year = parse_component(year)?;

    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

fn parse_component(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

const ENROLLMENT_FORMATS: &[&str] = &[
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

/// Parse an enrollment timestamp such as `04/25/2025 @ 12:08 pm`
///
/// The `@` separator is removed and whitespace collapsed before parsing. A
/// bare `MM/DD/YYYY` is accepted as midnight.
pub fn parse_enrollment_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let cleaned = raw.replacen('@', " ", 1);
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        return None;
    }

    let upper = cleaned.to_uppercase();
    ENROLLMENT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&upper, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(&upper, "%m/%d/%Y")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Parse an enrollment timestamp read back from the store
///
/// Stored cells are either the export dialect (text fields) or ISO 8601
/// (date fields written by this tool).
pub fn parse_stored_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    parse_enrollment_timestamp(raw)
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc()))
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

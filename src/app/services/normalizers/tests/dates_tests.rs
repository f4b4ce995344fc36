//! Tests for the date dialects

use chrono::{Datelike, NaiveDate, Timelike};

use crate::app::services::normalizers::{
    parse_date_of_birth, parse_enrollment_timestamp, parse_stored_timestamp,
};

#[test]
fn test_date_of_birth_components() {
    let date = parse_date_of_birth("04/25/2010").unwrap();
    assert_eq!((date.year(), date.month(), date.day()), (2010, 4, 25));
}

#[test]
fn test_date_of_birth_without_padding() {
    assert_eq!(
        parse_date_of_birth("4/5/2010"),
        NaiveDate::from_ymd_opt(2010, 4, 5)
    );
}

#[test]
fn test_date_of_birth_rejects_other_dialects() {
    assert_eq!(parse_date_of_birth("2010/04/25"), None);
    assert_eq!(parse_date_of_birth("2010-04-25"), None);
    assert_eq!(parse_date_of_birth("04/25"), None);
    assert_eq!(parse_date_of_birth("04/25/2010/1"), None);
    assert_eq!(parse_date_of_birth("Apr/25/2010"), None);
    assert_eq!(parse_date_of_birth(""), None);
}

#[test]
fn test_date_of_birth_rejects_impossible_dates() {
    assert_eq!(parse_date_of_birth("02/30/2010"), None);
    assert_eq!(parse_date_of_birth("13/01/2010"), None);
}

#[test]
fn test_date_of_birth_rejects_enrollment_dialect() {
    assert_eq!(parse_date_of_birth("04/25/2025 @ 12:08 pm"), None);
}

#[test]
fn test_enrollment_timestamp() {
    let ts = parse_enrollment_timestamp("04/25/2025 @ 12:08 pm").unwrap();
    assert_eq!((ts.year(), ts.month(), ts.day()), (2025, 4, 25));
    assert_eq!((ts.hour(), ts.minute()), (12, 8));

    let ts = parse_enrollment_timestamp("04/26/2025 @ 9:15 am").unwrap();
    assert_eq!((ts.hour(), ts.minute()), (9, 15));

    let ts = parse_enrollment_timestamp("04/26/2025 @ 9:15 PM").unwrap();
    assert_eq!(ts.hour(), 21);
}

#[test]
fn test_enrollment_timestamp_without_time() {
    let ts = parse_enrollment_timestamp("04/26/2025").unwrap();
    assert_eq!((ts.hour(), ts.minute()), (0, 0));
}

#[test]
fn test_enrollment_timestamp_invalid() {
    assert_eq!(parse_enrollment_timestamp(""), None);
    assert_eq!(parse_enrollment_timestamp("@"), None);
    assert_eq!(parse_enrollment_timestamp("yesterday @ noon"), None);
    assert_eq!(parse_enrollment_timestamp("2025-04-25T12:08:00"), None);
}

#[test]
fn test_stored_timestamp_accepts_iso() {
    let expected = parse_enrollment_timestamp("04/25/2025 @ 12:08 pm");
    assert_eq!(parse_stored_timestamp("2025-04-25T12:08:00"), expected);
    assert_eq!(parse_stored_timestamp("2025-04-25T12:08:00Z"), expected);
    assert_eq!(parse_stored_timestamp("04/25/2025 @ 12:08 pm"), expected);
    assert_eq!(parse_stored_timestamp("not a date"), None);
}

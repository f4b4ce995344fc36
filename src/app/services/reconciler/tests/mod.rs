//! Tests for the reconciler, its payloads and the import runner

pub mod decisions_tests;
pub mod payload_tests;
pub mod runner_tests;

use crate::app::models::{CleanedRow, ExistingRecord};
use serde_json::{Map, Value};

pub const ADD_STUDENT_HEADER: &str = "Student,Birth Date,Age,Acct First Name,Acct Last Name,Email,Acct Cell,Acct First Name 2,Acct Last Name 2,Email 2,Acct Cell 2";

/// Build a cleaned row from header/value pairs
pub fn cleaned_row(row_number: usize, pairs: &[(&str, &str)]) -> CleanedRow {
    CleanedRow::new(
        row_number,
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

/// Create a stored record from field/text pairs
pub fn create_record(id: &str, pairs: &[(&str, &str)]) -> ExistingRecord {
    let fields: Map<String, Value> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect();
    ExistingRecord::new(id, fields)
}

/// A record of the participant collection
pub fn create_participant(id: &str, first: &str, last: &str) -> ExistingRecord {
    create_record(id, &[("First Name", first), ("Last Name", last)])
}

/// A record of the student collection
pub fn create_student(id: &str, first: &str, last: &str) -> ExistingRecord {
    create_record(
        id,
        &[("Participant First Name", first), ("Participant Last Name", last)],
    )
}

/// Add-student export with one line per student name
pub fn create_add_student_csv(students: &[&str]) -> String {
    let mut csv = format!("{}\n", ADD_STUDENT_HEADER);
    for student in students {
        csv.push_str(&format!(
            "\"{}\",04/25/2018,7y 2m,Jane,Doe,jane@example.com,555-0100,,,,\n",
            student
        ));
    }
    csv
}

/// Schedule-update export; each entry is (student, class, days)
pub fn create_schedule_csv(rows: &[(&str, &str, &str)]) -> String {
    let mut csv = String::from("Student,Class,Days\n");
    for (student, class, days) in rows {
        csv.push_str(&format!("\"{}\",\"{}\",\"{}\"\n", student, class, days));
    }
    csv
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

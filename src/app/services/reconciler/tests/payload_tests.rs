//! Tests for fact extraction and payload construction

use super::*;
use crate::app::models::{FieldValue, Identity, SelectOption};
use crate::app::services::normalizers::ClassTable;
use crate::app::services::reconciler::{
    enrollment_facts, schedule_facts, schedule_payload, student_payload,
};
use chrono::NaiveDate;

fn full_add_student_row() -> crate::app::models::CleanedRow {
    cleaned_row(
        1,
        &[
            ("Student", "Smith, John"),
            ("Birth Date", "04/25/2018"),
            ("Age", "7y 2m"),
            ("Acct First Name", "Jane"),
            ("Acct Last Name", "Smith"),
            ("Email", "jane@example.com"),
            ("Acct Cell", "555-0100"),
            ("Acct First Name 2", "Ken"),
            ("Acct Last Name 2", "Smith"),
            ("Email 2", ""),
            ("Acct Cell 2", ""),
            ("How did you find out about Aozora Community?", "A friend"),
        ],
    )
}

#[test]
fn test_enrollment_facts() {
    let facts = enrollment_facts(&full_add_student_row());

    assert_eq!(facts.date_of_birth, NaiveDate::from_ymd_opt(2018, 4, 25));
    assert_eq!(facts.age_years, Some(7));
    assert_eq!(facts.primary_contact.email, "jane@example.com");
    assert_eq!(facts.secondary_contact.first_name, "Ken");
    assert_eq!(facts.secondary_contact.phone, "");
    assert_eq!(facts.referral_source.as_deref(), Some("A friend"));
}

#[test]
fn test_enrollment_facts_absent_cells() {
    let row = cleaned_row(1, &[("Student", "Smith, John"), ("Birth Date", "2018/04/25")]);
    let facts = enrollment_facts(&row);

    // Wrong dialect is null, not an error
    assert_eq!(facts.date_of_birth, None);
    assert_eq!(facts.age_years, None);
    assert_eq!(facts.primary_contact.first_name, "");
    assert_eq!(facts.referral_source, None);
}

#[test]
fn test_student_payload() {
    let facts = enrollment_facts(&full_add_student_row());
    let fields = student_payload(&Identity::new("John", "Smith"), &facts);

    assert_eq!(fields["Participant First Name"], FieldValue::text("John"));
    assert_eq!(fields["Participant Last Name"], FieldValue::text("Smith"));
    assert_eq!(
        fields["Date of Birth"],
        FieldValue::Date(NaiveDate::from_ymd_opt(2018, 4, 25).unwrap())
    );
    assert_eq!(fields["Age"], FieldValue::from(7u32));
    assert_eq!(fields["Parent 1 - Email Address"], FieldValue::text("jane@example.com"));
    assert_eq!(fields["Phone Number (Parent 2)"], FieldValue::text(""));
    assert_eq!(
        fields["How did you find out about Aozora Community?"],
        FieldValue::text("A friend")
    );
}

#[test]
fn test_student_payload_nulls() {
    let row = cleaned_row(1, &[("Student", "Smith, John")]);
    let fields = student_payload(&Identity::new("John", "Smith"), &enrollment_facts(&row));

    assert_eq!(fields["Date of Birth"], FieldValue::Null);
    assert_eq!(fields["Age"], FieldValue::Null);
    assert!(!fields.contains_key("How did you find out about Aozora Community?"));
}

#[test]
fn test_schedule_facts_and_payload() {
    let row = cleaned_row(
        1,
        &[("Student", "Smith, John"), ("Class", "hibari / suzume"), ("Days", "Mon, , Wed, Mon")],
    );
    let facts = schedule_facts(&row, &ClassTable::default());

    // Table order decides, not position in the label
    assert_eq!(facts.class_label, "Suzume");
    assert_eq!(facts.raw_days, "Mon, , Wed, Mon");
    assert_eq!(
        facts.days,
        vec![
            SelectOption::new("Mon"),
            SelectOption::new("Wed"),
            SelectOption::new("Mon")
        ]
    );

    let fields = schedule_payload(&facts);
    assert_eq!(fields.len(), 2);
    assert_eq!(fields["Class"], FieldValue::select("Suzume"));
    assert_eq!(fields["Days"], FieldValue::MultiSelect(facts.days.clone()));
}

#[test]
fn test_schedule_facts_fallback_label() {
    let row = cleaned_row(1, &[("Class", "Open play"), ("Days", "Fri")]);
    assert_eq!(schedule_facts(&row, &ClassTable::default()).class_label, "TBD");
}

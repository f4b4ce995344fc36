//! Tests for per-row decisions

use super::*;
use crate::app::models::{Identity, RecordId};
use crate::app::services::candidate_index::{CandidateIndex, IdentityFields};
use crate::app::services::normalizers::FieldSchema;
use crate::app::services::normalizers::FieldType;
use crate::app::services::reconciler::{
    Decision, Flow, Reconciler, RowOutcome, SkipReason, Snapshot, enrollment_baseline,
};
use chrono::NaiveDate;

fn participant_snapshot() -> Snapshot {
    let records = vec![
        create_participant("rec000001", "john", "smith"),
        create_participant("rec000002", "Aiko", "Tanaka"),
    ];
    let (index, _) = CandidateIndex::from_records(
        "participants",
        IdentityFields::new("First Name", "Last Name"),
        records,
    );
    Snapshot::Index(index)
}

fn student_snapshot() -> Snapshot {
    let (index, _) = CandidateIndex::from_records(
        "students",
        IdentityFields::new("Participant First Name", "Participant Last Name"),
        vec![create_student("rec000001", "Aiko", "Tanaka")],
    );
    Snapshot::Index(index)
}

#[test]
fn test_schedule_update_matches_case_insensitively() {
    let reconciler = Reconciler::new(Flow::ScheduleUpdate, participant_snapshot());
    let row = cleaned_row(
        4,
        &[("Student", " SMITH ,  John "), ("Class", "Suzume AM"), ("Days", "Mon, Wed")],
    );

    match reconciler.decide(&row) {
        Decision::Update {
            id, identity, line, ..
        } => {
            assert_eq!(id, RecordId("rec000001".to_string()));
            assert_eq!(identity, Identity::new("John", "SMITH"));
            assert_eq!(line, "John SMITH → Suzume (Mon, Wed)");
        }
        other => panic!("expected update, got {:?}", other),
    }
}

#[test]
fn test_schedule_update_unmatched() {
    let reconciler = Reconciler::new(Flow::ScheduleUpdate, participant_snapshot());
    let row = cleaned_row(1, &[("Student", "Lee, Ben"), ("Class", "Hibari"), ("Days", "Tue")]);

    let decision = reconciler.decide(&row);
    assert_eq!(
        decision,
        Decision::Skip {
            outcome: RowOutcome::SkippedUnmatched,
            reason: SkipReason::NotOnRoster,
            identity: Some(Identity::new("Ben", "Lee")),
        }
    );
}

#[test]
fn test_unsplittable_name_is_unparseable() {
    let reconciler = Reconciler::new(Flow::ScheduleUpdate, participant_snapshot());
    let row = cleaned_row(1, &[("Student", "John Smith"), ("Class", "Hibari"), ("Days", "Tue")]);

    let decision = reconciler.decide(&row);
    assert_eq!(decision.outcome(), RowOutcome::SkippedUnparseable);
    assert!(matches!(
        decision,
        Decision::Skip {
            reason: SkipReason::NameNotSplittable { .. },
            identity: None,
            ..
        }
    ));
}

#[test]
fn test_add_student_existing_is_duplicate() {
    let reconciler = Reconciler::new(Flow::AddStudent, student_snapshot());
    let row = cleaned_row(1, &[("Student", "tanaka, aiko")]);

    assert_eq!(reconciler.decide(&row).outcome(), RowOutcome::SkippedDuplicate);
}

#[test]
fn test_add_student_created_in_run_is_duplicate() {
    let mut reconciler = Reconciler::new(Flow::AddStudent, student_snapshot());
    let row = cleaned_row(1, &[("Student", "Smith, John")]);

    let identity = match reconciler.decide(&row) {
        Decision::Create {
            identity: Some(identity),
            line,
            ..
        } => {
            assert_eq!(line, "John Smith");
            identity
        }
        other => panic!("expected create, got {:?}", other),
    };

    reconciler.record_created(&identity);
    let again = cleaned_row(2, &[("Student", "SMITH, JOHN")]);
    assert_eq!(reconciler.decide(&again).outcome(), RowOutcome::SkippedDuplicate);
}

#[test]
fn test_enrollment_log_baseline_filter() {
    let baseline = NaiveDate::from_ymd_opt(2025, 4, 25)
        .and_then(|d| d.and_hms_opt(12, 8, 0))
        .unwrap();
    let reconciler = Reconciler::new(Flow::EnrollmentLog, Snapshot::Baseline(Some(baseline)));

    let same = cleaned_row(1, &[("Student", "Smith, John"), ("Enrolled", "04/25/2025 @ 12:08 pm")]);
    let later = cleaned_row(2, &[("Student", "Tanaka, Aiko"), ("Enrolled", "04/25/2025 @ 12:09 pm")]);
    let broken = cleaned_row(3, &[("Student", "Lee, Ben"), ("Enrolled", "yesterday")]);

    assert_eq!(reconciler.decide(&same).outcome(), RowOutcome::SkippedDuplicate);
    assert_eq!(reconciler.decide(&broken).outcome(), RowOutcome::SkippedUnparseable);

    match reconciler.decide(&later) {
        Decision::Create { line, identity, .. } => {
            assert_eq!(line, "Tanaka, Aiko (04/25/2025 @ 12:09 pm)");
            assert_eq!(identity, Some(Identity::new("Aiko", "Tanaka")));
        }
        other => panic!("expected create, got {:?}", other),
    }
}

#[test]
fn test_enrollment_log_without_baseline_creates() {
    let reconciler = Reconciler::new(Flow::EnrollmentLog, Snapshot::Baseline(None));
    let row = cleaned_row(1, &[("Student", "Smith, John"), ("Enrolled", "01/01/2000 @ 1:00 am")]);

    assert_eq!(reconciler.decide(&row).outcome(), RowOutcome::Created);
}

#[test]
fn test_enrollment_log_uses_schema() {
    let schema = FieldSchema::new([("Student", FieldType::SingleLineText), ("Fee", FieldType::Number)]);
    let reconciler =
        Reconciler::new(Flow::EnrollmentLog, Snapshot::Baseline(None)).with_schema(schema);
    let row = cleaned_row(
        1,
        &[
            ("Student", "Smith, John"),
            ("Enrolled", "04/25/2025 @ 12:08 pm"),
            ("Fee", "120"),
        ],
    );

    match reconciler.decide(&row) {
        Decision::Create { fields, .. } => {
            assert_eq!(fields.len(), 2);
            assert!(fields.contains_key("Fee"));
            assert!(!fields.contains_key("Enrolled"));
        }
        other => panic!("expected create, got {:?}", other),
    }
}

#[test]
fn test_enrollment_baseline_is_latest_parseable() {
    let records = vec![
        create_record("rec000001", &[("Enrolled", "04/25/2025 @ 12:08 pm")]),
        create_record("rec000002", &[("Enrolled", "2025-05-01T08:00:00")]),
        create_record("rec000003", &[("Enrolled", "not a date")]),
        create_record("rec000004", &[]),
    ];

    let expected = NaiveDate::from_ymd_opt(2025, 5, 1).and_then(|d| d.and_hms_opt(8, 0, 0));
    assert_eq!(enrollment_baseline(&records, "Enrolled"), expected);
    assert_eq!(enrollment_baseline(&[], "Enrolled"), None);
}

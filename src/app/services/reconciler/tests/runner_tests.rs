//! Tests for the import run loop

use super::*;
use crate::Error;
use crate::app::adapters::memory::MemoryStore;
use crate::app::adapters::record_store::RecordStore;
use crate::app::models::Identity;
use crate::app::services::csv_import::CsvParser;
use crate::app::services::reconciler::{Flow, ImportRunner, RowOutcome, RunNotice};

fn parse(csv: &str) -> crate::app::services::csv_import::ParseResult {
    CsvParser::new().parse_str(csv)
}

#[tokio::test]
async fn test_add_student_run_is_idempotent() {
    let store = MemoryStore::new("Student Basic Info");
    let runner = ImportRunner::new(Flow::AddStudent);
    let csv = create_add_student_csv(&["Smith, John", "Tanaka, Aiko", "smith, john"]);

    let first = runner.run_parsed(parse(&csv), &store).await.unwrap();
    assert_eq!(first.notice(), RunNotice::Success(2));
    assert_eq!(first.lines, vec!["John Smith", "Aiko Tanaka"]);
    assert_eq!(first.count(RowOutcome::SkippedDuplicate), 1);
    assert_eq!(store.record_count().await, 2);

    let second = runner.run_parsed(parse(&csv), &store).await.unwrap();
    assert_eq!(second.notice(), RunNotice::NothingToDo);
    assert_eq!(second.success_count, 0);
    assert_eq!(second.count(RowOutcome::SkippedDuplicate), 3);
    assert_eq!(store.record_count().await, 2);
}

#[tokio::test]
async fn test_add_student_writes_payload() {
    let store = MemoryStore::new("Student Basic Info");
    let runner = ImportRunner::new(Flow::AddStudent);

    runner
        .run_parsed(parse(&create_add_student_csv(&["Smith, John"])), &store)
        .await
        .unwrap();

    let records = store.records().await;
    assert_eq!(records[0].cell_as_string("Participant First Name"), "John");
    assert_eq!(records[0].cell_as_string("Date of Birth"), "2018-04-25");
    assert_eq!(records[0].cell_as_string("Age"), "7");
    assert_eq!(records[0].cell_as_string("Parent 2 - First Name"), "");
}

#[tokio::test]
async fn test_schedule_update_unmatched_leaves_store_untouched() {
    let store = MemoryStore::with_records(
        "All Participants with Class",
        vec![
            create_participant("rec000001", "john", "smith"),
            create_participant("rec000002", "Aiko", "Tanaka"),
        ],
    );
    let runner = ImportRunner::new(Flow::ScheduleUpdate);
    let csv = create_schedule_csv(&[
        (" Smith , JOHN ", "Suzume (ages 3-4)", "Mon, Wed"),
        ("Lee, Ben", "Hibari", "Tue"),
        ("Tanaka, Aiko", "Tsubame PM", "Thu"),
    ]);

    let summary = runner.run_parsed(parse(&csv), &store).await.unwrap();

    assert_eq!(summary.success_count, 2);
    assert_eq!(summary.unmatched_count, 1);
    assert_eq!(summary.count(RowOutcome::SkippedUnmatched), 1);
    assert_eq!(
        summary.lines,
        vec!["JOHN Smith → Suzume (Mon, Wed)", "Aiko Tanaka → Tsubame (Thu)"]
    );
    assert_eq!(summary.missing_student, Some(Identity::new("Ben", "Lee")));
    assert_eq!(store.writes_attempted().await, 2);

    let records = store.records().await;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].cell_as_string("Class"), "Suzume");
    assert_eq!(records[0].cell_as_string("Days"), "Mon, Wed");
    assert_eq!(records[1].cell_as_string("Class"), "Tsubame");
}

#[tokio::test]
async fn test_schedule_update_overwrites_previous_values() {
    let store = MemoryStore::with_records(
        "All Participants with Class",
        vec![create_record(
            "rec000001",
            &[("First Name", "John"), ("Last Name", "Smith"), ("Class", "Hibari"), ("Days", "Fri")],
        )],
    );
    let runner = ImportRunner::new(Flow::ScheduleUpdate);
    let csv = create_schedule_csv(&[("Smith, John", "mystery class", "Mon")]);

    runner.run_parsed(parse(&csv), &store).await.unwrap();

    let records = store.records().await;
    assert_eq!(records[0].cell_as_string("Class"), "TBD");
    assert_eq!(records[0].cell_as_string("Days"), "Mon");
}

#[tokio::test]
async fn test_write_failure_aborts_remaining_rows() {
    let store = MemoryStore::new("Student Basic Info").failing_on_write(3);
    let runner = ImportRunner::new(Flow::AddStudent);
    let csv = create_add_student_csv(&["A, One", "B, Two", "C, Three", "D, Four"]);

    let err = runner.run_parsed(parse(&csv), &store).await.unwrap_err();

    match err {
        Error::ImportAborted { row, committed, .. } => {
            assert_eq!(row, 3);
            assert_eq!(committed, 2);
        }
        other => panic!("expected ImportAborted, got {:?}", other),
    }
    // Rows 1-2 stay committed, row 4 is never attempted
    assert_eq!(store.record_count().await, 2);
    assert_eq!(store.writes_attempted().await, 3);
}

#[tokio::test]
async fn test_snapshot_is_fetched_once() {
    let store = MemoryStore::with_records(
        "All Participants with Class",
        vec![create_participant("rec000001", "John", "Smith")],
    );
    let runner = ImportRunner::new(Flow::ScheduleUpdate);
    let rows: Vec<(&str, &str, &str)> = (0..20)
        .map(|_| ("Smith, John", "Hibari", "Mon"))
        .collect();

    let summary = runner
        .run_parsed(parse(&create_schedule_csv(&rows)), &store)
        .await
        .unwrap();

    assert_eq!(summary.success_count, 20);
    assert_eq!(store.fetch_count().await, 1);
}

#[tokio::test]
async fn test_fetch_failure_writes_nothing() {
    let store = MemoryStore::new("Student Basic Info").failing_fetch();
    let runner = ImportRunner::new(Flow::AddStudent);

    let err = runner
        .run_parsed(parse(&create_add_student_csv(&["Smith, John"])), &store)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Store(_)));
    assert_eq!(store.writes_attempted().await, 0);
}

#[tokio::test]
async fn test_enrollment_log_against_baseline() {
    let store = MemoryStore::with_records(
        "Enrollsy Import",
        vec![create_record("rec000001", &[("Enrolled", "04/25/2025 @ 12:08 pm")])],
    );
    let runner = ImportRunner::new(Flow::EnrollmentLog);

    let summary = runner
        .run_parsed(parse(&create_enrollment_log_csv()), &store)
        .await
        .unwrap();

    assert_eq!(summary.count(RowOutcome::SkippedDuplicate), 2);
    assert_eq!(summary.success_count, 2);
    assert_eq!(
        summary.lines,
        vec![
            "Tanaka, Aiko (04/26/2025 @ 9:15 am)",
            "Tanaka, Aiko (04/26/2025 @ 9:15 am)"
        ]
    );
    assert_eq!(summary.clean_stats.cells_filled, 4);

    let records = store.records().await;
    assert_eq!(records.len(), 3);
    assert_eq!(records[2].cell_as_string("Class"), "Tsubame");
    assert_eq!(records[2].cell_as_string("Student"), "Tanaka, Aiko");
}

#[tokio::test]
async fn test_enrollment_log_into_empty_store() {
    let store = MemoryStore::new("Enrollsy Import");
    let runner = ImportRunner::new(Flow::EnrollmentLog);

    let summary = runner
        .run_parsed(parse(&create_enrollment_log_csv()), &store)
        .await
        .unwrap();

    assert_eq!(summary.notice(), RunNotice::Success(4));
}

#[tokio::test]
async fn test_missing_columns_rejected_before_fetch() {
    let store = MemoryStore::new("All Participants with Class");
    let runner = ImportRunner::new(Flow::ScheduleUpdate);

    let err = runner
        .run_parsed(parse("Student,Class\n\"Smith, John\",Hibari\n"), &store)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InputRejected { .. }));
    assert!(err.to_string().contains("Days"));
    assert_eq!(store.fetch_count().await, 0);
}

#[tokio::test]
async fn test_empty_input_reports_no_rows() {
    let store = MemoryStore::new("Student Basic Info");
    let runner = ImportRunner::new(Flow::AddStudent);

    let header_only = format!("{}\n", ADD_STUDENT_HEADER);

    for csv in ["", "\"unterminated\n", header_only.as_str()] {
        let summary = runner.run_parsed(parse(csv), &store).await.unwrap();
        assert_eq!(summary.notice(), RunNotice::NoRows);
    }
    assert_eq!(store.fetch_count().await, 0);
}

#[tokio::test]
async fn test_rows_dropped_by_cleaner_report_no_rows() {
    let store = MemoryStore::new("All Participants with Class");
    let runner = ImportRunner::new(Flow::ScheduleUpdate);
    let csv = "Student,Class,Days\nStudent,Class,Days\n\"Smith, John\",Hibari,\n";

    let summary = runner.run_parsed(parse(csv), &store).await.unwrap();

    assert_eq!(summary.notice(), RunNotice::NoRows);
    assert_eq!(summary.clean_stats.rows_dropped(), 2);
}

#[tokio::test]
async fn test_run_file_rejects_wrong_extension() {
    let store = MemoryStore::new("Student Basic Info");
    let runner = ImportRunner::new(Flow::AddStudent);
    let file = crate::app::services::csv_import::tests::create_temp_file(
        ".txt",
        &create_add_student_csv(&["Smith, John"]),
    );

    let err = runner.run_file(file.path(), &store).await.unwrap_err();

    assert!(matches!(err, Error::InputRejected { .. }));
    assert_eq!(store.collection(), "Student Basic Info");
}

#[tokio::test]
async fn test_run_file_reads_csv() {
    let store = MemoryStore::new("Student Basic Info");
    let runner = ImportRunner::new(Flow::AddStudent);
    let file = crate::app::services::csv_import::tests::create_temp_file(
        ".CSV",
        &create_add_student_csv(&["Smith, John"]),
    );

    let summary = runner.run_file(file.path(), &store).await.unwrap();

    assert_eq!(summary.notice(), RunNotice::Success(1));
}

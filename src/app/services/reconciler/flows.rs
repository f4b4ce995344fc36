//! Flow descriptors
//!
//! Each import flow is one parameterization of the same reconciler: the
//! columns it needs, how its rows are cleaned, which collection fields hold
//! the identity, and what it does with a matched or unmatched row.

use std::fmt;

use crate::app::services::candidate_index::IdentityFields;
use crate::app::services::csv_import::{CleaningMode, RowCleaner};
use crate::constants::{columns, participant_fields, student_fields};

/// The supported import flows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Flow {
    /// Append new rows of the enrollment-platform log
    EnrollmentLog,
    /// Create roster entries for students not yet on the roster
    AddStudent,
    /// Overwrite class and days of students already on the roster
    ScheduleUpdate,
}

impl Flow {
    pub const ALL: [Flow; 3] = [Flow::EnrollmentLog, Flow::AddStudent, Flow::ScheduleUpdate];

    pub fn as_str(&self) -> &'static str {
        match self {
            Flow::EnrollmentLog => "enrollment-log",
            Flow::AddStudent => "add-student",
            Flow::ScheduleUpdate => "schedule-update",
        }
    }

    /// Build the descriptor for this flow
    pub fn descriptor(self) -> FlowDescriptor {
        match self {
            Flow::EnrollmentLog => FlowDescriptor {
                flow: self,
                required_columns: vec![columns::STUDENT, columns::ENROLLED],
                cleaner: RowCleaner::new(CleaningMode::forward_fill([
                    columns::STUDENT,
                    columns::ENROLLED,
                ])),
                identity_fields: None,
                policy: DecisionPolicy::CreateAfterBaseline,
            },
            Flow::AddStudent => FlowDescriptor {
                flow: self,
                required_columns: vec![
                    columns::STUDENT,
                    columns::BIRTH_DATE,
                    columns::AGE,
                    columns::ACCT_FIRST_NAME,
                    columns::ACCT_LAST_NAME,
                    columns::EMAIL,
                    columns::ACCT_CELL,
                    columns::ACCT_FIRST_NAME_2,
                    columns::ACCT_LAST_NAME_2,
                    columns::EMAIL_2,
                    columns::ACCT_CELL_2,
                ],
                cleaner: RowCleaner::new(CleaningMode::strict()),
                identity_fields: Some(IdentityFields::new(
                    student_fields::FIRST_NAME,
                    student_fields::LAST_NAME,
                )),
                policy: DecisionPolicy::CreateIfAbsent,
            },
            Flow::ScheduleUpdate => FlowDescriptor {
                flow: self,
                required_columns: vec![columns::STUDENT, columns::CLASS, columns::DAYS],
                cleaner: RowCleaner::new(CleaningMode::strict())
                    .with_required_cells([columns::CLASS, columns::DAYS]),
                identity_fields: Some(IdentityFields::new(
                    participant_fields::FIRST_NAME,
                    participant_fields::LAST_NAME,
                )),
                policy: DecisionPolicy::UpdateIfPresent,
            },
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a flow does with each row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionPolicy {
    /// Create when the enrollment timestamp is newer than anything stored
    CreateAfterBaseline,
    /// Create when the identity is not on the roster yet
    CreateIfAbsent,
    /// Update the matched record; skip identities not on the roster
    UpdateIfPresent,
}

/// Column schema and decision policy of one flow
#[derive(Debug, Clone)]
pub struct FlowDescriptor {
    pub flow: Flow,

    /// Header columns that must be present in the CSV
    pub required_columns: Vec<&'static str>,

    pub cleaner: RowCleaner,

    /// Name fields of the target collection, for flows that match identities
    pub identity_fields: Option<IdentityFields>,

    pub policy: DecisionPolicy,
}

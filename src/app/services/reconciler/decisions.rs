//! Per-row reconciliation decisions
//!
//! The reconciler is pure: it looks at one cleaned row and the run snapshot
//! and says what should be written. Writes are issued by the runner.

use chrono::NaiveDateTime;
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

use super::flows::{DecisionPolicy, Flow};
use super::payload::{enrollment_facts, schedule_facts, schedule_payload, student_payload};
use crate::app::models::{
    CleanedRow, ExistingRecord, FieldMap, Identity, IdentityKey, MatchResult, RecordId,
};
use crate::app::services::candidate_index::CandidateIndex;
use crate::app::services::normalizers::{
    ClassTable, FieldSchema, format_row, parse_enrollment_timestamp, parse_stored_timestamp,
    split_full_name,
};
use crate::constants::columns;

/// Terminal outcome of one row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowOutcome {
    Created,
    Updated,
    SkippedUnmatched,
    SkippedDuplicate,
    SkippedUnparseable,
}

impl RowOutcome {
    pub fn is_write(&self) -> bool {
        matches!(self, RowOutcome::Created | RowOutcome::Updated)
    }
}

impl fmt::Display for RowOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RowOutcome::Created => "created",
            RowOutcome::Updated => "updated",
            RowOutcome::SkippedUnmatched => "skipped (unmatched)",
            RowOutcome::SkippedDuplicate => "skipped (duplicate)",
            RowOutcome::SkippedUnparseable => "skipped (unparseable)",
        };
        f.write_str(label)
    }
}

/// Why a row was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The student cell has no "Last, First" comma
    NameNotSplittable { raw: String },
    /// The enrollment timestamp does not parse
    EnrolledUnparseable { raw: String },
    /// Enrollment is not newer than the latest one already stored
    NotAfterBaseline { enrolled: NaiveDateTime, baseline: NaiveDateTime },
    /// The identity is already on the roster, or was created earlier in this run
    AlreadyOnRoster,
    /// The identity is not on the roster
    NotOnRoster,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NameNotSplittable { raw } => {
                write!(f, "name '{}' is not in \"Last, First\" form", raw)
            }
            SkipReason::EnrolledUnparseable { raw } => {
                write!(f, "enrollment time '{}' could not be parsed", raw)
            }
            SkipReason::NotAfterBaseline { enrolled, baseline } => write!(
                f,
                "enrolled {} is not after latest stored enrollment {}",
                enrolled, baseline
            ),
            SkipReason::AlreadyOnRoster => f.write_str("already on the roster"),
            SkipReason::NotOnRoster => f.write_str("not on the roster"),
        }
    }
}

/// What to do with one row
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Create {
        fields: FieldMap,
        identity: Option<Identity>,
        line: String,
    },
    Update {
        id: RecordId,
        fields: FieldMap,
        identity: Identity,
        line: String,
    },
    Skip {
        outcome: RowOutcome,
        reason: SkipReason,
        identity: Option<Identity>,
    },
}

impl Decision {
    fn skip(outcome: RowOutcome, reason: SkipReason, identity: Option<Identity>) -> Self {
        Decision::Skip {
            outcome,
            reason,
            identity,
        }
    }

    /// The outcome this decision ends in once its write succeeds
    pub fn outcome(&self) -> RowOutcome {
        match self {
            Decision::Create { .. } => RowOutcome::Created,
            Decision::Update { .. } => RowOutcome::Updated,
            Decision::Skip { outcome, .. } => *outcome,
        }
    }
}

/// State read from the store once, before the row loop
#[derive(Debug, Clone)]
pub enum Snapshot {
    /// Existing records indexed by identity
    Index(CandidateIndex),
    /// Latest enrollment timestamp already stored, if any
    Baseline(Option<NaiveDateTime>),
}

/// Latest parseable enrollment timestamp among stored records
pub fn enrollment_baseline(records: &[ExistingRecord], field: &str) -> Option<NaiveDateTime> {
    records
        .iter()
        .filter_map(|record| parse_stored_timestamp(&record.cell_as_string(field)))
        .max()
}

/// Decides create / update / skip for the rows of one run
#[derive(Debug)]
pub struct Reconciler {
    policy: DecisionPolicy,
    snapshot: Snapshot,
    classes: ClassTable,
    schema: FieldSchema,
    // Identities created earlier in this run
    created: HashSet<IdentityKey>,
}

impl Reconciler {
    pub fn new(flow: Flow, snapshot: Snapshot) -> Self {
        Self {
            policy: flow.descriptor().policy,
            snapshot,
            classes: ClassTable::default(),
            schema: FieldSchema::default(),
            created: HashSet::new(),
        }
    }

    pub fn with_class_table(mut self, classes: ClassTable) -> Self {
        self.classes = classes;
        self
    }

    /// Field schema of the enrollment-log collection
    pub fn with_schema(mut self, schema: FieldSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Decide the fate of one row
    pub fn decide(&self, row: &CleanedRow) -> Decision {
        let decision = match self.policy {
            DecisionPolicy::CreateAfterBaseline => self.decide_enrollment(row),
            DecisionPolicy::CreateIfAbsent => self.decide_add_student(row),
            DecisionPolicy::UpdateIfPresent => self.decide_schedule_update(row),
        };
        debug!("Row {}: {}", row.row_number, decision.outcome());
        decision
    }

    /// Remember an identity created by this run
    pub fn record_created(&mut self, identity: &Identity) {
        self.created.insert(identity.key());
    }

    fn decide_enrollment(&self, row: &CleanedRow) -> Decision {
        let student = row.get_or_empty(columns::STUDENT);
        let raw = row.get_or_empty(columns::ENROLLED);
        let identity = Some(split_full_name(student)).filter(|identity| !identity.is_empty());

        let Some(enrolled) = parse_enrollment_timestamp(raw) else {
            return Decision::skip(
                RowOutcome::SkippedUnparseable,
                SkipReason::EnrolledUnparseable {
                    raw: raw.to_string(),
                },
                identity,
            );
        };

        if let Snapshot::Baseline(Some(baseline)) = &self.snapshot {
            if enrolled <= *baseline {
                return Decision::skip(
                    RowOutcome::SkippedDuplicate,
                    SkipReason::NotAfterBaseline {
                        enrolled,
                        baseline: *baseline,
                    },
                    identity,
                );
            }
        }

        Decision::Create {
            fields: format_row(row, &self.schema),
            identity,
            line: format!("{} ({})", student, raw),
        }
    }

    fn decide_add_student(&self, row: &CleanedRow) -> Decision {
        let identity = match self.split_identity(row) {
            Ok(identity) => identity,
            Err(skip) => return skip,
        };

        if self.is_known(&identity) {
            return Decision::skip(
                RowOutcome::SkippedDuplicate,
                SkipReason::AlreadyOnRoster,
                Some(identity),
            );
        }

        let facts = enrollment_facts(row);
        Decision::Create {
            fields: student_payload(&identity, &facts),
            line: identity.to_string(),
            identity: Some(identity),
        }
    }

    fn decide_schedule_update(&self, row: &CleanedRow) -> Decision {
        let identity = match self.split_identity(row) {
            Ok(identity) => identity,
            Err(skip) => return skip,
        };

        let matched = match &self.snapshot {
            Snapshot::Index(index) => index.match_identity(&identity),
            Snapshot::Baseline(_) => MatchResult::Unmatched,
        };

        let Some(record) = matched.record() else {
            return Decision::skip(
                RowOutcome::SkippedUnmatched,
                SkipReason::NotOnRoster,
                Some(identity),
            );
        };

        let facts = schedule_facts(row, &self.classes);
        Decision::Update {
            id: record.id.clone(),
            fields: schedule_payload(&facts),
            line: format!("{} → {} ({})", identity, facts.class_label, facts.raw_days),
            identity,
        }
    }

    fn split_identity(&self, row: &CleanedRow) -> Result<Identity, Decision> {
        let raw = row.get_or_empty(columns::STUDENT);
        let identity = split_full_name(raw);
        if identity.is_empty() {
            Err(Decision::skip(
                RowOutcome::SkippedUnparseable,
                SkipReason::NameNotSplittable {
                    raw: raw.to_string(),
                },
                None,
            ))
        } else {
            Ok(identity)
        }
    }

    fn is_known(&self, identity: &Identity) -> bool {
        let indexed = match &self.snapshot {
            Snapshot::Index(index) => index.contains(identity),
            Snapshot::Baseline(_) => false,
        };
        indexed || self.created.contains(&identity.key())
    }
}

//! Reconciliation of cleaned rows against the roster
//!
//! One parameterized reconciler serves all three import flows. The flow is
//! selected once at run start and fixes the column schema, the cleaning mode,
//! the identity fields and the decision policy.
//!
//! # Architecture
//!
//! - [`flows`] - flow enum and per-flow descriptors
//! - [`payload`] - fact extraction and write payload construction
//! - [`decisions`] - per-row create / update / skip decisions
//! - [`runner`] - sequential run loop, store writes, abort semantics
//! - [`summary`] - run summary, row reports and user notices
//!
//! # Row states
//!
//! Every row ends in exactly one of `Created`, `Updated`, `SkippedUnmatched`,
//! `SkippedDuplicate` or `SkippedUnparseable`. Nothing is retried. A failed
//! write aborts the run with `Error::ImportAborted`.

pub mod decisions;
pub mod flows;
pub mod payload;
pub mod runner;
pub mod summary;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use decisions::{
    Decision, Reconciler, RowOutcome, SkipReason, Snapshot, enrollment_baseline,
};
pub use flows::{DecisionPolicy, Flow, FlowDescriptor};
pub use payload::{enrollment_facts, schedule_facts, schedule_payload, student_payload};
pub use runner::ImportRunner;
pub use summary::{ImportSummary, RowReport, RunNotice};

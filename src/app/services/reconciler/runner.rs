//! Import run orchestration
//!
//! Drives the cleaned rows of one file through the reconciler, strictly in
//! order, and issues the writes. The store is read exactly once per run,
//! before the first row. The first failed write ends the run; writes already
//! committed stay committed.

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tracing::{debug, error, info, warn};

use super::flows::{Flow, FlowDescriptor};
use super::decisions::{Decision, Reconciler, RowOutcome, Snapshot, enrollment_baseline};
use super::summary::ImportSummary;
use crate::app::adapters::record_store::{RecordStore, StoreError};
use crate::app::models::CleanedRow;
use crate::app::services::candidate_index::CandidateIndex;
use crate::app::services::csv_import::{CleanResult, CsvParser, ParseResult};
use crate::app::services::normalizers::{ClassTable, FieldSchema};
use crate::config::Config;
use crate::constants::{DEFAULT_ENROLLMENT_FORM_URL, enrollment_fields};
use crate::{Error, Result};

/// Runs one import flow against one record store
///
/// # Example
///
/// ```rust
/// use roster_sync::app::adapters::memory::MemoryStore;
/// use roster_sync::app::services::csv_import::CsvParser;
/// use roster_sync::{Flow, ImportRunner, RunNotice};
///
/// # async fn example() -> roster_sync::Result<()> {
/// let store = MemoryStore::new("Student Basic Info");
/// let csv = "Student,Birth Date,Age,Acct First Name,Acct Last Name,Email,Acct Cell,\
///            Acct First Name 2,Acct Last Name 2,Email 2,Acct Cell 2\n\
///            \"Smith, John\",04/25/2018,7y 0m,Jane,Smith,jane@example.com,555-0100,,,,\n";
///
/// let runner = ImportRunner::new(Flow::AddStudent);
/// let summary = runner.run_parsed(CsvParser::new().parse_str(csv), &store).await?;
///
/// assert_eq!(summary.notice(), RunNotice::Success(1));
/// assert_eq!(summary.lines, vec!["John Smith".to_string()]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ImportRunner {
    descriptor: FlowDescriptor,
    parser: CsvParser,
    classes: ClassTable,
    schema: FieldSchema,
    enrollment_form_url: String,
    show_progress: bool,
}

impl ImportRunner {
    /// Create a runner with default class table, schema and form URL
    pub fn new(flow: Flow) -> Self {
        Self {
            descriptor: flow.descriptor(),
            parser: CsvParser::new(),
            classes: ClassTable::default(),
            schema: FieldSchema::default(),
            enrollment_form_url: DEFAULT_ENROLLMENT_FORM_URL.to_string(),
            show_progress: false,
        }
    }

    /// Create a runner using the class table, schema and form URL from `config`
    pub fn from_config(flow: Flow, config: &Config) -> Self {
        Self::new(flow)
            .with_class_table(config.classes.clone())
            .with_schema(config.enrollment_log_schema.clone())
            .with_enrollment_form_url(config.enrollment_form_url.clone())
    }

    pub fn with_class_table(mut self, classes: ClassTable) -> Self {
        self.classes = classes;
        self
    }

    /// Field schema used to format enrollment-log rows
    pub fn with_schema(mut self, schema: FieldSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_enrollment_form_url(mut self, url: impl Into<String>) -> Self {
        self.enrollment_form_url = url.into();
        self
    }

    /// Show a progress bar while rows are written
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn flow(&self) -> Flow {
        self.descriptor.flow
    }

    pub fn descriptor(&self) -> &FlowDescriptor {
        &self.descriptor
    }

    /// Validate the header of parsed input and clean its rows
    ///
    /// Input that produced no rows cleans to no rows. A header missing any
    /// column the flow requires is rejected before a single row is looked at.
    pub fn prepare(&self, parsed: ParseResult) -> Result<CleanResult> {
        if parsed.is_empty() {
            if parsed.stats.has_errors() {
                warn!("Input could not be parsed: {}", parsed.stats.errors.join("; "));
            }
            return Ok(CleanResult::default());
        }

        let missing = parsed.missing_columns(&self.descriptor.required_columns);
        if !missing.is_empty() {
            return Err(Error::input_rejected(format!(
                "missing required column(s) for {}: {}",
                self.flow(),
                missing.join(", ")
            )));
        }

        Ok(self.descriptor.cleaner.clean(parsed.rows))
    }

    /// Import a `.csv` file into `store`
    pub async fn run_file(&self, file_path: &Path, store: &dyn RecordStore) -> Result<ImportSummary> {
        let parsed = self.parser.parse_file(file_path).await?;
        self.run_parsed(parsed, store).await
    }

    /// Import already-parsed input into `store`
    pub async fn run_parsed(
        &self,
        parsed: ParseResult,
        store: &dyn RecordStore,
    ) -> Result<ImportSummary> {
        let cleaned = self.prepare(parsed)?;
        let mut summary = self.run_rows(cleaned.rows, store).await?;
        summary.clean_stats = cleaned.stats;
        Ok(summary)
    }

    /// Reconcile cleaned rows against `store`, in order
    ///
    /// # Errors
    /// * `Error::Store` when the snapshot fetch fails; nothing is written
    /// * `Error::ImportAborted` when a write fails; later rows are not attempted
    pub async fn run_rows(
        &self,
        rows: Vec<CleanedRow>,
        store: &dyn RecordStore,
    ) -> Result<ImportSummary> {
        let mut summary = ImportSummary::new(self.flow(), self.enrollment_form_url.clone());
        if rows.is_empty() {
            info!("No rows to import for {}", self.flow());
            return Ok(summary);
        }

        info!(
            "Starting {} import of {} rows into '{}'",
            self.flow(),
            rows.len(),
            store.collection()
        );

        let snapshot = self.load_snapshot(store).await?;
        let mut reconciler = Reconciler::new(self.flow(), snapshot)
            .with_class_table(self.classes.clone())
            .with_schema(self.schema.clone());

        let pb = self
            .show_progress
            .then(|| Self::create_progress_bar(rows.len() as u64, self.flow()));

        for row in &rows {
            match reconciler.decide(row) {
                Decision::Create {
                    fields,
                    identity,
                    line,
                } => match store.create_record(fields).await {
                    Ok(id) => {
                        debug!("Row {}: created {} ({})", row.row_number, id, line);
                        if let Some(identity) = &identity {
                            reconciler.record_created(identity);
                        }
                        summary.record_write(row.row_number, RowOutcome::Created, identity, line);
                    }
                    Err(e) => return Err(Self::abort(row.row_number, &summary, e, pb.as_ref())),
                },
                Decision::Update {
                    id,
                    fields,
                    identity,
                    line,
                } => match store.update_record(&id, fields).await {
                    Ok(()) => {
                        debug!("Row {}: updated {} ({})", row.row_number, id, line);
                        summary.record_write(
                            row.row_number,
                            RowOutcome::Updated,
                            Some(identity),
                            line,
                        );
                    }
                    Err(e) => return Err(Self::abort(row.row_number, &summary, e, pb.as_ref())),
                },
                Decision::Skip {
                    outcome,
                    reason,
                    identity,
                } => {
                    if outcome == RowOutcome::SkippedUnmatched {
                        warn!("Row {}: {}", row.row_number, reason);
                    } else {
                        debug!("Row {}: {} ({})", row.row_number, outcome, reason);
                    }
                    summary.record_skip(row.row_number, outcome, identity, reason);
                }
            }

            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }

        if let Some(pb) = pb {
            pb.finish_with_message(format!("{} complete", self.flow()));
        }

        info!("{}", summary.summary());
        Ok(summary)
    }

    /// Read the state the flow decides against
    ///
    /// Identity flows index the whole collection by name. The enrollment-log
    /// flow only needs the latest stored enrollment timestamp.
    pub async fn load_snapshot(&self, store: &dyn RecordStore) -> Result<Snapshot> {
        match &self.descriptor.identity_fields {
            Some(identity_fields) => {
                let (index, _stats) =
                    CandidateIndex::load(store, identity_fields.clone(), &[]).await?;
                Ok(Snapshot::Index(index))
            }
            None => {
                let records = store
                    .fetch_all(Some(&[enrollment_fields::ENROLLED][..]))
                    .await?;
                let baseline = enrollment_baseline(&records, enrollment_fields::ENROLLED);
                match baseline {
                    Some(latest) => info!("Latest stored enrollment: {}", latest),
                    None => info!("No stored enrollments; every parseable row is new"),
                }
                Ok(Snapshot::Baseline(baseline))
            }
        }
    }

    fn abort(
        row_number: usize,
        summary: &ImportSummary,
        source: StoreError,
        pb: Option<&ProgressBar>,
    ) -> Error {
        if let Some(pb) = pb {
            pb.abandon();
        }

        error!(
            "Write for row {} failed after {} committed write(s): {}",
            row_number, summary.success_count, source
        );
        for report in summary.reports.iter().filter(|r| r.outcome.is_write()) {
            error!("  committed row {} ({})", report.row_number, report.outcome);
        }

        Error::import_aborted(row_number, summary.success_count, source)
    }

    /// Create a progress bar for row processing
    fn create_progress_bar(total: u64, flow: Flow) -> ProgressBar {
        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb.set_message(format!("Importing ({})", flow));
        pb
    }
}

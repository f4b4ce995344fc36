//! Roster Sync Library
//!
//! A Rust library for reconciling CSV exports from an enrollment platform
//! against an existing roster of student records.
//!
//! This library provides tools for:
//! - Parsing loosely-structured CSV exports into ordered rows
//! - Repairing merged-cell artifacts by forward-filling blank cells
//! - Normalizing person names, dates, ages and free-text class labels
//! - Indexing existing roster records for O(1) identity lookups
//! - Deciding create / update / skip per row and writing through a store adapter
//! - Producing a human-readable summary of every import run

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod candidate_index;
        pub mod csv_import;
        pub mod normalizers;
        pub mod reconciler;
    }
    pub mod adapters {
        pub mod json_file;
        pub mod memory;
        pub mod record_store;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::adapters::record_store::{RecordStore, StoreError};
pub use app::models::{CleanedRow, Identity, RawRow};
pub use app::services::reconciler::{Flow, ImportRunner, ImportSummary, RunNotice};
pub use config::Config;

/// Result type alias for roster import operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for roster import operations
///
/// Row-level validation problems (an unsplittable name, an unparseable date,
/// a student that is not on the roster) are not errors: they become skip
/// outcomes in the run summary. Only input-level rejections and failures at
/// the record-store boundary surface here.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// The input file cannot be used for the selected flow
    #[error("Input rejected: {reason}")]
    InputRejected { reason: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A read from the record store failed
    #[error("Record store error: {0}")]
    Store(#[from] StoreError),

    /// A write failed part way through a run; earlier writes stay applied
    #[error("Import aborted at row {row} after {committed} committed write(s): {source}")]
    ImportAborted {
        row: usize,
        committed: usize,
        #[source]
        source: StoreError,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an input rejection
    pub fn input_rejected(reason: impl Into<String>) -> Self {
        Self::InputRejected {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an aborted-run error for a failed write
    pub fn import_aborted(row: usize, committed: usize, source: StoreError) -> Self {
        Self::ImportAborted {
            row,
            committed,
            source,
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// Whether this error came from the record-store boundary
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Self::Store(_) | Self::ImportAborted { .. })
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::Configuration {
            message: format!("Invalid config file: {}", error),
        }
    }
}

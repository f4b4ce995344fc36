//! Application constants for roster sync
//!
//! This module contains the column names of the enrollment-platform export,
//! the field names of the roster collections, and the default values used
//! throughout the import engine.

// =============================================================================
// CSV Export Columns
// =============================================================================

/// Columns of the enrollment-platform CSV export
pub mod columns {
    /// Combined student name, formatted "Last, First"
    pub const STUDENT: &str = "Student";

    /// Registration timestamp, formatted "MM/DD/YYYY @ h:mm am"
    pub const ENROLLED: &str = "Enrolled";

    /// Free-text class label
    pub const CLASS: &str = "Class";

    /// Comma-separated weekday list
    pub const DAYS: &str = "Days";

    /// Date of birth, formatted "MM/DD/YYYY"
    pub const BIRTH_DATE: &str = "Birth Date";

    /// Age, formatted like "7y 3m"
    pub const AGE: &str = "Age";

    pub const ACCT_FIRST_NAME: &str = "Acct First Name";
    pub const ACCT_LAST_NAME: &str = "Acct Last Name";
    pub const EMAIL: &str = "Email";
    pub const ACCT_CELL: &str = "Acct Cell";

    pub const ACCT_FIRST_NAME_2: &str = "Acct First Name 2";
    pub const ACCT_LAST_NAME_2: &str = "Acct Last Name 2";
    pub const EMAIL_2: &str = "Email 2";
    pub const ACCT_CELL_2: &str = "Acct Cell 2";

    /// Referral question, passed through verbatim when present
    pub const REFERRAL_SOURCE: &str = "How did you find out about Aozora Community?";
}

// =============================================================================
// Roster Collection Fields
// =============================================================================

/// Fields of the "Student Basic Info" collection written by the add-student flow
pub mod student_fields {
    pub const FIRST_NAME: &str = "Participant First Name";
    pub const LAST_NAME: &str = "Participant Last Name";
    pub const DATE_OF_BIRTH: &str = "Date of Birth";
    pub const AGE: &str = "Age";

    pub const PARENT_1_FIRST_NAME: &str = "Parent 1 - First Name";
    pub const PARENT_1_LAST_NAME: &str = "Parent 1 - Last Name";
    pub const PARENT_1_EMAIL: &str = "Parent 1 - Email Address";
    pub const PARENT_1_PHONE: &str = "Phone Number (Parent 1)";

    pub const PARENT_2_FIRST_NAME: &str = "Parent 2 - First Name";
    pub const PARENT_2_LAST_NAME: &str = "Parent 2 - Last Name";
    pub const PARENT_2_EMAIL: &str = "Parent 2 - Email Address";
    pub const PARENT_2_PHONE: &str = "Phone Number (Parent 2)";

    pub const REFERRAL_SOURCE: &str = "How did you find out about Aozora Community?";
}

/// Fields of the "All Participants with Class" collection
pub mod participant_fields {
    pub const FIRST_NAME: &str = "First Name";
    pub const LAST_NAME: &str = "Last Name";
    pub const CLASS: &str = "Class";
    pub const DAYS: &str = "Days";
}

/// Fields of the "Enrollsy Import" collection read when computing the baseline
pub mod enrollment_fields {
    pub const ENROLLED: &str = "Enrolled";
}

// =============================================================================
// Collection Names
// =============================================================================

pub const DEFAULT_ENROLLMENT_LOG_COLLECTION: &str = "Enrollsy Import";
pub const DEFAULT_STUDENT_COLLECTION: &str = "Student Basic Info";
pub const DEFAULT_PARTICIPANT_COLLECTION: &str = "All Participants with Class";

// =============================================================================
// Class Classification
// =============================================================================

/// Keyword to label pairs, checked in this order; the first keyword found wins
pub const DEFAULT_CLASS_KEYWORDS: &[(&str, &str)] = &[
    ("SUZUME", "Suzume"),
    ("HIBARI", "Hibari"),
    ("UGUISU", "Uguisu"),
    ("TSUBAME", "Tsubame"),
];

/// Label used when no keyword matches
pub const DEFAULT_FALLBACK_CLASS_LABEL: &str = "TBD";

// =============================================================================
// Input Handling
// =============================================================================

/// Required file extension for CSV input
pub const CSV_EXTENSION: &str = "csv";

/// Form where staff enroll a student the roster does not know about yet
pub const DEFAULT_ENROLLMENT_FORM_URL: &str =
    "https://airtable.com/appJeOfBr9YbqvNXZ/pagJLHpFMpnQSpWT1/form";

/// Config directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "roster-sync";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.toml";

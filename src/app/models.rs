//! Data models for roster imports
//!
//! This module contains the core data structures for representing CSV rows,
//! student identities, the facts derived from a row, and the records held by
//! the external roster store.

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

// =============================================================================
// CSV Rows
// =============================================================================

/// One parsed CSV data row: header to raw cell value, in CSV column order
///
/// Produced by the CSV parser and consumed by the row cleaner. Never mutated
/// after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based data row number in the source file (header excluded)
    pub row_number: usize,

    cells: Vec<(String, String)>,
}

impl RawRow {
    pub fn new(row_number: usize, cells: Vec<(String, String)>) -> Self {
        Self { row_number, cells }
    }

    /// Build a row from header/value pairs, numbering it `row_number`
    pub fn from_pairs<K, V>(row_number: usize, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(
            row_number,
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Raw value of a column, if the column exists
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(header, _)| header == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn cells(&self) -> &[(String, String)] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<(String, String)> {
        self.cells
    }
}

/// A row after trimming and forward-fill; the unit of work for one
/// reconciliation attempt
///
/// A cleaned row that survived cleaning always has a non-empty student cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedRow {
    /// 1-based data row number in the source file (header excluded)
    pub row_number: usize,

    cells: Vec<(String, String)>,
}

impl CleanedRow {
    pub(crate) fn new(row_number: usize, cells: Vec<(String, String)>) -> Self {
        Self { row_number, cells }
    }

    /// Trimmed value of a column, if the column exists
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(header, _)| header == column)
            .map(|(_, value)| value.as_str())
    }

    /// Trimmed value of a column, or `""` when absent
    pub fn get_or_empty(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    /// Value of a column when present and non-empty
    pub fn non_empty(&self, column: &str) -> Option<&str> {
        self.get(column).filter(|value| !value.is_empty())
    }

    pub fn cells(&self) -> &[(String, String)] {
        &self.cells
    }
}

// =============================================================================
// Identity
// =============================================================================

/// A student identity, stored with its original casing
///
/// Both halves are non-empty after a successful name split; an empty identity
/// marks a name that could not be split.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    pub first: String,
    pub last: String,
}

impl Identity {
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            last: last.into(),
        }
    }

    /// True when either half is blank
    pub fn is_empty(&self) -> bool {
        self.first.trim().is_empty() || self.last.trim().is_empty()
    }

    /// Normalized matching key: trimmed, lowercased first and last name
    pub fn key(&self) -> IdentityKey {
        IdentityKey::new(&self.first, &self.last)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first, self.last)
    }
}

/// Case- and whitespace-insensitive identity key used for matching
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey {
    first: String,
    last: String,
}

impl IdentityKey {
    pub fn new(first: &str, last: &str) -> Self {
        Self {
            first: first.trim().to_lowercase(),
            last: last.trim().to_lowercase(),
        }
    }
}

// =============================================================================
// Derived Facts
// =============================================================================

/// Schedule attributes derived from one row of the schedule-update flow
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleFacts {
    /// Class label from the keyword table, or the fallback label
    pub class_label: String,

    /// Weekday options in CSV order; duplicates are kept
    pub days: Vec<SelectOption>,

    /// The days cell as it appeared in the CSV, for the summary line
    pub raw_days: String,
}

/// Contact details of one parent or guardian; blank when absent from the row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFacts {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// Attributes derived from one row of the add-student flow
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrollmentFacts {
    pub date_of_birth: Option<NaiveDate>,
    pub age_years: Option<u32>,
    pub primary_contact: ContactFacts,
    pub secondary_contact: ContactFacts,
    pub referral_source: Option<String>,
}

// =============================================================================
// Store Records
// =============================================================================

/// Identifier of a record in the external store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-only snapshot of a record already present in the external store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistingRecord {
    pub id: RecordId,

    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl ExistingRecord {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: RecordId(id.into()),
            fields,
        }
    }

    /// Cell value rendered as text
    ///
    /// Strings are returned as-is, named options as their name, option lists
    /// as comma-joined names, numbers and booleans via their display form,
    /// and missing or null cells as `""`.
    pub fn cell_as_string(&self, field: &str) -> String {
        self.fields.get(field).map(value_as_string).unwrap_or_default()
    }

    /// Apply a field map on top of this record (overwrite, not merge)
    pub fn apply(&mut self, fields: &FieldMap) {
        for (name, value) in fields {
            self.fields.insert(name.clone(), value.to_json());
        }
    }
}

fn value_as_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(value_as_string)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(obj) => obj.get("name").map(value_as_string).unwrap_or_default(),
    }
}

/// Outcome of resolving one row's identity against the candidate index
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchResult<'a> {
    Matched(&'a ExistingRecord),
    Unmatched,
}

impl<'a> MatchResult<'a> {
    pub fn record(&self) -> Option<&'a ExistingRecord> {
        match self {
            MatchResult::Matched(record) => Some(record),
            MatchResult::Unmatched => None,
        }
    }
}

// =============================================================================
// Write Payloads
// =============================================================================

/// A named option for single- and multi-select fields
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectOption {
    pub name: String,
}

impl SelectOption {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A typed value in a write payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Integer(i64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Select(SelectOption),
    MultiSelect(Vec<SelectOption>),
    Null,
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn select(name: impl Into<String>) -> Self {
        Self::Select(SelectOption::new(name))
    }

    /// JSON form as it is sent to the store
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            FieldValue::Integer(i) => Value::from(*i),
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
            FieldValue::DateTime(dt) => Value::String(dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
            FieldValue::Select(option) => select_json(option),
            FieldValue::MultiSelect(options) => {
                Value::Array(options.iter().map(select_json).collect())
            }
            FieldValue::Null => Value::Null,
        }
    }
}

fn select_json(option: &SelectOption) -> Value {
    let mut obj = Map::new();
    obj.insert("name".to_string(), Value::String(option.name.clone()));
    Value::Object(obj)
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// Field name to value payload for a create or update, in insertion order
pub type FieldMap = IndexMap<String, FieldValue>;

/// Convert a payload to the JSON object shape stored on records
pub fn field_map_to_json(fields: &FieldMap) -> Map<String, Value> {
    fields
        .iter()
        .map(|(name, value)| (name.clone(), value.to_json()))
        .collect()
}

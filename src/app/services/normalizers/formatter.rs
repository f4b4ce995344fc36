//! Schema-driven row formatting
//!
//! Converts a cleaned CSV row into a write payload using the field types of
//! the target collection. Used by the enrollment-log flow, whose rows carry
//! arbitrary passthrough columns.

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::dates::{parse_date_of_birth, parse_enrollment_timestamp};
use super::schedule::parse_weekday_list;
use crate::app::models::{CleanedRow, FieldMap, FieldValue};

/// Field types of the target collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    SingleLineText,
    MultilineText,
    Number,
    Checkbox,
    Date,
    SingleSelect,
    MultipleSelects,
    /// Any other type; values pass through as text
    #[serde(other)]
    Other,
}

/// A named, typed field of the target collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

/// Field list of the target collection
///
/// An empty schema writes every column of the row as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSchema {
    pub fields: Vec<SchemaField>,
}

impl FieldSchema {
    pub fn new(fields: impl IntoIterator<Item = (impl Into<String>, FieldType)>) -> Self {
        Self {
            fields: fields
                .into_iter()
                .map(|(name, field_type)| SchemaField {
                    name: name.into(),
                    field_type,
                })
                .collect(),
        }
    }

    pub fn is_passthrough(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Build the write payload for one row
///
/// Only schema fields whose column exists in the row are written.
pub fn format_row(row: &CleanedRow, schema: &FieldSchema) -> FieldMap {
    if schema.is_passthrough() {
        return row
            .cells()
            .iter()
            .map(|(header, value)| (header.clone(), FieldValue::text(value.as_str())))
            .collect();
    }

    schema
        .fields
        .iter()
        .filter_map(|field| {
            row.get(&field.name)
                .map(|raw| (field.name.clone(), format_value(raw, field.field_type)))
        })
        .collect()
}

/// Convert one cell according to its field type
pub fn format_value(raw: &str, field_type: FieldType) -> FieldValue {
    match field_type {
        FieldType::SingleLineText | FieldType::MultilineText | FieldType::Other => {
            FieldValue::text(raw)
        }
        FieldType::Number => parse_leading_number(raw).into(),
        FieldType::Checkbox => FieldValue::Bool(raw.eq_ignore_ascii_case("true") || raw == "1"),
        FieldType::Date => parse_enrollment_timestamp(raw)
            .or_else(|| parse_date_of_birth(raw).and_then(|d| d.and_hms_opt(0, 0, 0)))
            .or_else(|| {
                NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
            .map(FieldValue::DateTime)
            .unwrap_or(FieldValue::Null),
        FieldType::SingleSelect => FieldValue::select(raw),
        FieldType::MultipleSelects => FieldValue::MultiSelect(parse_weekday_list(raw)),
    }
}

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").expect("number pattern is valid")
});

/// Parse the numeric prefix of a cell (`"120 USD"` is 120)
fn parse_leading_number(raw: &str) -> Option<FieldValue> {
    LEADING_NUMBER
        .find(raw.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .map(FieldValue::Number)
}

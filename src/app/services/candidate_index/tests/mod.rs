//! Shared test utilities and fixtures for candidate index tests

use crate::app::models::ExistingRecord;
use serde_json::{Map, Value, json};


use super::IdentityFields;

/// Identity fields of the participant collection
pub fn participant_fields() -> IdentityFields {
    IdentityFields::new("First Name", "Last Name")
}

/// Create a participant record with the given id and name
pub fn create_participant(id: &str, first: &str, last: &str) -> ExistingRecord {
    let mut fields = Map::new();
    fields.insert("First Name".to_string(), Value::String(first.to_string()));
    fields.insert("Last Name".to_string(), Value::String(last.to_string()));
    fields.insert("Class".to_string(), json!({ "name": "TBD" }));
    ExistingRecord::new(id, fields)
}

/// A small roster with one duplicated identity and one blank name
pub fn create_roster() -> Vec<ExistingRecord> {
    vec![
        create_participant("rec000001", "John", "Smith"),
        create_participant("rec000002", "Aiko", "Tanaka"),
        create_participant("rec000003", " JOHN ", "smith"),
        create_participant("rec000004", "", "Nobody"),
    ]
}

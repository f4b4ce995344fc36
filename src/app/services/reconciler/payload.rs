//! Fact extraction and write payloads

use crate::app::models::{
    CleanedRow, ContactFacts, EnrollmentFacts, FieldMap, FieldValue, Identity, ScheduleFacts,
};
use crate::app::services::normalizers::{
    ClassTable, extract_age_years, parse_date_of_birth, parse_weekday_list,
};
use crate::constants::{columns, participant_fields, student_fields};

/// Derive add-student facts from a row; absent cells become `None` or `""`
pub fn enrollment_facts(row: &CleanedRow) -> EnrollmentFacts {
    EnrollmentFacts {
        date_of_birth: row.non_empty(columns::BIRTH_DATE).and_then(parse_date_of_birth),
        age_years: row.non_empty(columns::AGE).and_then(extract_age_years),
        primary_contact: ContactFacts {
            first_name: row.get_or_empty(columns::ACCT_FIRST_NAME).to_string(),
            last_name: row.get_or_empty(columns::ACCT_LAST_NAME).to_string(),
            email: row.get_or_empty(columns::EMAIL).to_string(),
            phone: row.get_or_empty(columns::ACCT_CELL).to_string(),
        },
        secondary_contact: ContactFacts {
            first_name: row.get_or_empty(columns::ACCT_FIRST_NAME_2).to_string(),
            last_name: row.get_or_empty(columns::ACCT_LAST_NAME_2).to_string(),
            email: row.get_or_empty(columns::EMAIL_2).to_string(),
            phone: row.get_or_empty(columns::ACCT_CELL_2).to_string(),
        },
        referral_source: row.get(columns::REFERRAL_SOURCE).map(str::to_string),
    }
}

/// Derive schedule facts from a row
pub fn schedule_facts(row: &CleanedRow, classes: &ClassTable) -> ScheduleFacts {
    let raw_days = row.get_or_empty(columns::DAYS);
    ScheduleFacts {
        class_label: classes.classify(row.get_or_empty(columns::CLASS)).to_string(),
        days: parse_weekday_list(raw_days),
        raw_days: raw_days.to_string(),
    }
}

/// Fields written when creating a student record
pub fn student_payload(identity: &Identity, facts: &EnrollmentFacts) -> FieldMap {
    let mut fields = FieldMap::new();
    fields.insert(
        student_fields::FIRST_NAME.to_string(),
        FieldValue::text(identity.first.as_str()),
    );
    fields.insert(
        student_fields::LAST_NAME.to_string(),
        FieldValue::text(identity.last.as_str()),
    );
    fields.insert(
        student_fields::DATE_OF_BIRTH.to_string(),
        facts.date_of_birth.into(),
    );
    fields.insert(student_fields::AGE.to_string(), facts.age_years.into());

    insert_contact(
        &mut fields,
        &facts.primary_contact,
        [
            student_fields::PARENT_1_FIRST_NAME,
            student_fields::PARENT_1_LAST_NAME,
            student_fields::PARENT_1_EMAIL,
            student_fields::PARENT_1_PHONE,
        ],
    );
    insert_contact(
        &mut fields,
        &facts.secondary_contact,
        [
            student_fields::PARENT_2_FIRST_NAME,
            student_fields::PARENT_2_LAST_NAME,
            student_fields::PARENT_2_EMAIL,
            student_fields::PARENT_2_PHONE,
        ],
    );

    if let Some(referral) = &facts.referral_source {
        fields.insert(
            student_fields::REFERRAL_SOURCE.to_string(),
            FieldValue::text(referral.as_str()),
        );
    }

    fields
}

fn insert_contact(fields: &mut FieldMap, contact: &ContactFacts, names: [&str; 4]) {
    let [first, last, email, phone] = names;
    fields.insert(first.to_string(), FieldValue::text(contact.first_name.as_str()));
    fields.insert(last.to_string(), FieldValue::text(contact.last_name.as_str()));
    fields.insert(email.to_string(), FieldValue::text(contact.email.as_str()));
    fields.insert(phone.to_string(), FieldValue::text(contact.phone.as_str()));
}

/// Fields overwritten on a matched participant
pub fn schedule_payload(facts: &ScheduleFacts) -> FieldMap {
    let mut fields = FieldMap::new();
    fields.insert(
        participant_fields::CLASS.to_string(),
        FieldValue::select(facts.class_label.as_str()),
    );
    fields.insert(
        participant_fields::DAYS.to_string(),
        FieldValue::MultiSelect(facts.days.clone()),
    );
    fields
}

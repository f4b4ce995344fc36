//! Class labels, weekday lists and ages

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::app::models::SelectOption;
use crate::constants::{DEFAULT_CLASS_KEYWORDS, DEFAULT_FALLBACK_CLASS_LABEL};

/// One keyword and the class label it selects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassKeyword {
    pub keyword: String,
    pub label: String,
}

/// Ordered keyword table used to classify free-text class labels
///
/// Keywords are checked in table order and the first one contained in the
/// label wins, regardless of where it appears in the label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassTable {
    pub keywords: Vec<ClassKeyword>,
    pub fallback: String,
}

impl Default for ClassTable {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_CLASS_KEYWORDS
                .iter()
                .map(|(keyword, label)| ClassKeyword {
                    keyword: keyword.to_string(),
                    label: label.to_string(),
                })
                .collect(),
            fallback: DEFAULT_FALLBACK_CLASS_LABEL.to_string(),
        }
    }
}

impl ClassTable {
    /// Classify a raw class label (case-insensitive substring match)
    pub fn classify(&self, raw: &str) -> &str {
        let upper = raw.to_uppercase();
        self.keywords
            .iter()
            .find(|entry| upper.contains(&entry.keyword.to_uppercase()))
            .map(|entry| entry.label.as_str())
            .unwrap_or(&self.fallback)
    }
}

/// Classify a raw class label with the default keyword table
pub fn classify_class_label(raw: &str) -> String {
    ClassTable::default().classify(raw).to_string()
}

/// Split a comma-separated weekday list into named options
///
/// Tokens are trimmed and empty ones dropped; order and duplicates are kept.
pub fn parse_weekday_list(raw: &str) -> Vec<SelectOption> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(SelectOption::new)
        .collect()
}

static AGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)y").expect("age pattern is valid"));

/// Extract the whole years from an age cell such as `7y 3m`
///
/// The number must start the cell and be followed directly by `y`.
pub fn extract_age_years(raw: &str) -> Option<u32> {
    AGE_PATTERN
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|years| years.as_str().parse().ok())
}

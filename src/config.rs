//! Configuration management for roster sync
//!
//! Settings are resolved in layers: built-in defaults, then an optional TOML
//! file, then command-line overrides applied by the CLI.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::app::services::normalizers::{ClassTable, FieldSchema};
use crate::app::services::reconciler::Flow;
use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_ENROLLMENT_FORM_URL,
    DEFAULT_ENROLLMENT_LOG_COLLECTION, DEFAULT_PARTICIPANT_COLLECTION, DEFAULT_STUDENT_COLLECTION,
};
use crate::{Error, Result};

/// Target collection of each import flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    pub enrollment_log: String,
    pub add_student: String,
    pub schedule_update: String,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            enrollment_log: DEFAULT_ENROLLMENT_LOG_COLLECTION.to_string(),
            add_student: DEFAULT_STUDENT_COLLECTION.to_string(),
            schedule_update: DEFAULT_PARTICIPANT_COLLECTION.to_string(),
        }
    }
}

/// Global configuration for roster imports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub collections: CollectionConfig,

    /// Directory holding one JSON file per collection
    pub store_dir: PathBuf,

    /// Form shown to staff when a student is not on the roster
    pub enrollment_form_url: String,

    /// Typed fields of the enrollment-log collection; empty writes every column as text
    pub enrollment_log_schema: FieldSchema,

    /// Keyword table for class-label classification
    pub classes: ClassTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            collections: CollectionConfig::default(),
            store_dir: Self::default_store_dir(),
            enrollment_form_url: DEFAULT_ENROLLMENT_FORM_URL.to_string(),
            enrollment_log_schema: FieldSchema::default(),
            classes: ClassTable::default(),
        }
    }
}

impl Config {
    /// Per-user config file location, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Per-user data directory for the JSON-file store
    pub fn default_store_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Load and parse a TOML config file
    pub async fn load_file(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Resolve defaults and the config file
    ///
    /// An explicit path must exist. Without one, the per-user file is read
    /// when present and defaults are used otherwise.
    pub async fn load_layered(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_file(path).await;
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::load_file(&path).await,
            _ => {
                debug!("No config file found; using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Override the store directory
    pub fn with_store_dir(mut self, store_dir: impl Into<PathBuf>) -> Self {
        self.store_dir = store_dir.into();
        self
    }

    /// Target collection of a flow
    pub fn collection_for(&self, flow: Flow) -> &str {
        match flow {
            Flow::EnrollmentLog => &self.collections.enrollment_log,
            Flow::AddStudent => &self.collections.add_student,
            Flow::ScheduleUpdate => &self.collections.schedule_update,
        }
    }

    /// Check the configuration for values the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        for flow in Flow::ALL {
            if self.collection_for(flow).trim().is_empty() {
                return Err(Error::configuration(format!(
                    "collection name for {} must not be empty",
                    flow
                )));
            }
        }

        if self.classes.keywords.is_empty() {
            return Err(Error::configuration("class keyword table must not be empty"));
        }

        if let Some(entry) = self
            .classes
            .keywords
            .iter()
            .find(|entry| entry.keyword.trim().is_empty() || entry.label.trim().is_empty())
        {
            return Err(Error::configuration(format!(
                "class keyword '{}' -> '{}' has an empty keyword or label",
                entry.keyword, entry.label
            )));
        }

        if self.classes.fallback.trim().is_empty() {
            return Err(Error::configuration("fallback class label must not be empty"));
        }

        if self
            .enrollment_log_schema
            .fields
            .iter()
            .any(|field| field.name.trim().is_empty())
        {
            return Err(Error::configuration(
                "enrollment log schema has a field without a name",
            ));
        }

        Ok(())
    }
}

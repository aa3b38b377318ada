//! Result store trait and record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::difficulty::DifficultyAssessment;
use crate::extractor::ExtractedFields;

/// One fully extracted and classified model, as assembled by a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRecord {
    /// Search term this record was found under.
    pub search_term: String,
    pub title: String,
    pub url: String,
    pub thumbnail_url: String,
    #[serde(flatten)]
    pub fields: ExtractedFields,
    #[serde(flatten)]
    pub difficulty: DifficultyAssessment,
}

/// A record as read back from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Surrogate key; increases with insertion order.
    pub id: i64,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub record: ModelRecord,
}

/// All records of one search term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermGroup {
    pub term: String,
    /// In discovery order.
    pub records: Vec<StoredRecord>,
}

/// Error type for result store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

/// Trait for result storage backends.
pub trait ResultStore: Send + Sync {
    /// Delete every record stored for `term`, then insert `records`.
    ///
    /// Both steps commit together. An empty `records` clears the term.
    /// Returns the number of records inserted.
    fn replace_for_term(&self, term: &str, records: &[ModelRecord]) -> Result<usize, StoreError>;

    /// All records grouped by term. The most recently scanned term comes
    /// first; records inside a group keep discovery order.
    fn read_all_grouped_by_term(&self) -> Result<Vec<TermGroup>, StoreError>;

    /// Number of records stored for `term`.
    fn count_for_term(&self, term: &str) -> Result<usize, StoreError>;
}
